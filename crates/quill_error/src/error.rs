//! Top-level error wrapper types.

use crate::{
    BackendError, BuilderError, ConfigError, GenerationError, HttpError, JsonError, SequelError,
    SequelErrorKind, StoreError,
};

/// Foundation error enum aggregating every concern-specific error.
///
/// # Examples
///
/// ```
/// use quill_error::{QuillError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: QuillError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum QuillErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Story or series store error
    #[from(StoreError)]
    Store(StoreError),
    /// Generation client error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Sequel pipeline error
    #[from(SequelError)]
    Sequel(SequelError),
}

/// Quill error with kind discrimination.
///
/// # Examples
///
/// ```
/// use quill_error::{ConfigError, QuillResult};
///
/// fn might_fail() -> QuillResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Quill Error: {}", _0)]
pub struct QuillError(Box<QuillErrorKind>);

impl QuillError {
    /// Create a new error from a kind.
    pub fn new(kind: QuillErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &QuillErrorKind {
        &self.0
    }

    /// Whether this error represents a deliberate cancellation.
    ///
    /// Cancellation is not a failure: callers should suppress error
    /// reporting when this returns true.
    ///
    /// ```
    /// use quill_error::{GenerationError, GenerationErrorKind, QuillError};
    ///
    /// let err: QuillError = GenerationError::new(GenerationErrorKind::Aborted).into();
    /// assert!(err.is_cancellation());
    /// ```
    pub fn is_cancellation(&self) -> bool {
        match self.kind() {
            QuillErrorKind::Generation(e) => e.is_aborted(),
            QuillErrorKind::Sequel(e) => matches!(e.kind, SequelErrorKind::Cancelled(_)),
            _ => false,
        }
    }

    /// The innermost message without location decoration.
    ///
    /// Suitable for showing to an end user.
    pub fn message(&self) -> String {
        match self.kind() {
            QuillErrorKind::Http(e) => e.message.clone(),
            QuillErrorKind::Json(e) => e.message.clone(),
            QuillErrorKind::Backend(e) => e.message.clone(),
            QuillErrorKind::Config(e) => e.message.clone(),
            QuillErrorKind::Builder(e) => e.kind().to_string(),
            QuillErrorKind::Store(e) => e.kind.to_string(),
            QuillErrorKind::Generation(e) => e.kind.to_string(),
            QuillErrorKind::Sequel(e) => e.kind.to_string(),
        }
    }
}

// Generic From implementation for any type that converts to QuillErrorKind
impl<T> From<T> for QuillError
where
    T: Into<QuillErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Quill operations.
pub type QuillResult<T> = std::result::Result<T, QuillError>;
