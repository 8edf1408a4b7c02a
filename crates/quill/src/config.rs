//! Layered configuration for the Quill binary.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from quill.toml)
//! - ~/.config/quill/quill.toml
//! - ./quill.toml

use config::{Config, File, FileFormat};
use derive_getters::Getters;
use quill_cache::StoryCacheConfig;
use quill_error::{ConfigError, QuillError, QuillResult};
use quill_models::ChatCompletionConfig;
use quill_sequel::DEFAULT_MAX_ANCESTOR_DEPTH;
use quill_store::RestConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../quill.toml");

/// Chat completion provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct GenerationSection {
    /// API root of an OpenAI-compatible endpoint
    base_url: String,
    /// Model name
    model: String,
    /// Environment variable holding the bearer token
    #[serde(default)]
    api_key_env: Option<String>,
    /// Sampling temperature
    #[serde(default)]
    temperature: Option<f32>,
    /// Completion length limit
    #[serde(default)]
    max_tokens: Option<u32>,
    /// Request timeout in seconds
    #[serde(default = "default_generation_timeout")]
    request_timeout_secs: u64,
}

fn default_generation_timeout() -> u64 {
    120
}

impl GenerationSection {
    /// Build driver settings, reading the API key from the environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the driver config cannot be assembled.
    pub fn driver_config(&self) -> QuillResult<ChatCompletionConfig> {
        let api_key = self
            .api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok());
        ChatCompletionConfig::builder()
            .base_url(self.base_url.clone())
            .model(self.model.clone())
            .api_key(api_key)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()
            .map_err(|e| {
                QuillError::from(ConfigError::new(format!(
                    "Invalid [generation] settings: {}",
                    e
                )))
            })
    }
}

/// Hosted story backend settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct StoreSection {
    /// Project URL; empty means no hosted backend is configured
    #[serde(default)]
    base_url: String,
    /// Environment variable holding the public API key
    #[serde(default)]
    api_key_env: Option<String>,
    /// Environment variable holding a user session token
    #[serde(default)]
    access_token_env: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_store_timeout")]
    request_timeout_secs: u64,
}

fn default_store_timeout() -> u64 {
    30
}

impl StoreSection {
    /// Whether a hosted backend is configured.
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Build REST client settings, reading credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when no backend URL is configured or the API
    /// key variable is unset.
    pub fn rest_config(&self) -> QuillResult<RestConfig> {
        if !self.is_configured() {
            return Err(ConfigError::new(
                "No [store] base_url configured; pass --library FILE to use a local library",
            )
            .into());
        }
        let key_var = self
            .api_key_env
            .as_deref()
            .ok_or_else(|| ConfigError::new("[store] api_key_env is not set"))?;
        let api_key = std::env::var(key_var).map_err(|_| {
            ConfigError::new(format!("Environment variable {} is not set", key_var))
        })?;
        let access_token = self
            .access_token_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok());

        RestConfig::builder()
            .base_url(self.base_url.clone())
            .api_key(api_key)
            .access_token(access_token)
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()
            .map_err(|e| {
                QuillError::from(ConfigError::new(format!("Invalid [store] settings: {}", e)))
            })
    }
}

/// Sequel pipeline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SequelSection {
    /// How far series resolution walks up a sequel chain
    #[serde(default = "default_max_ancestor_depth")]
    max_ancestor_depth: usize,
}

fn default_max_ancestor_depth() -> usize {
    DEFAULT_MAX_ANCESTOR_DEPTH
}

impl Default for SequelSection {
    fn default() -> Self {
        Self {
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LoggingSection {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Top-level Quill configuration.
///
/// # Example
///
/// ```no_run
/// use quill::QuillConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = QuillConfig::load()?;
/// println!("Model: {}", config.generation().model());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct QuillConfig {
    /// Chat completion provider
    generation: GenerationSection,
    /// Hosted story backend
    #[serde(default)]
    store: StoreSection,
    /// Story read cache
    #[serde(default)]
    cache: StoryCacheConfig,
    /// Sequel pipeline
    #[serde(default)]
    sequel: SequelSection,
    /// Log output
    #[serde(default)]
    logging: LoggingSection,
}

impl QuillConfig {
    /// Load configuration from a specific file, on top of the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> QuillResult<Self> {
        debug!("Loading configuration from file");
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a present file cannot be parsed.
    #[instrument]
    pub fn load() -> QuillResult<Self> {
        debug!("Loading layered configuration");
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let home_config = config_dir.join("quill").join("quill.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("quill").required(false));
        Self::finish(builder)
    }

    /// The bundled defaults alone.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the bundled file fails to parse.
    pub fn bundled() -> QuillResult<Self> {
        Self::finish(
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)),
        )
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> QuillResult<Self> {
        builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| {
                QuillError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
