//! Logging initialisation for the Quill binary.

use crate::LoggingSection;
use quill_error::{ConfigError, QuillResult};
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Options for the tracing subscriber.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name recorded on startup
    pub service_name: String,
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON lines
    pub json_logs: bool,
    /// Raise the default level to `debug` even when `RUST_LOG` is set
    pub verbose: bool,
}

impl ObservabilityConfig {
    /// Create a configuration for `service_name` at `info` level.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            log_level: "info".to_string(),
            json_logs: false,
            verbose: false,
        }
    }

    /// Take level and format from the `[logging]` section.
    pub fn from_section(section: &LoggingSection) -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
            .with_log_level(section.level().clone())
            .with_json_logs(*section.json())
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Force debug output, as `--verbose` does.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self.with_log_level("debug")
    }

    /// Build the level filter from a `RUST_LOG` value.
    ///
    /// `rust_log` wins over `log_level` when it parses. With `verbose` set,
    /// the default level is raised to `debug` on top of whichever was chosen;
    /// per-target directives from `rust_log` are kept.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `log_level` is used and is not a valid
    /// filter directive.
    pub fn env_filter(&self, rust_log: Option<&str>) -> QuillResult<EnvFilter> {
        let filter = match rust_log.map(EnvFilter::try_new) {
            Some(Ok(filter)) => filter,
            _ => EnvFilter::try_new(&self.log_level).map_err(|e| {
                ConfigError::new(format!("Invalid log filter '{}': {}", self.log_level, e))
            })?,
        };

        if self.verbose {
            Ok(filter.add_directive(LevelFilter::DEBUG.into()))
        } else {
            Ok(filter)
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level, except that
/// `verbose` always raises the default to `debug`. Logs go to stderr so
/// command output on stdout stays pipeable.
///
/// # Errors
///
/// Returns a `ConfigError` if the level is not a valid filter directive or a
/// subscriber is already installed.
pub fn init_observability(config: &ObservabilityConfig) -> QuillResult<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = config.env_filter(rust_log.as_deref())?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install subscriber: {}", e)))?;

    tracing::debug!(service = %config.service_name, "Logging initialised");
    Ok(())
}
