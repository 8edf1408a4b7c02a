//! Generation client error types.

/// Specific error conditions for AI generation calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The call observed a cancellation request and stopped
    #[display("Generation aborted")]
    Aborted,
    /// The provider returned an error
    #[display("Generation failed: {}", _0)]
    Failed(String),
    /// The provider answered but the content could not be used
    #[display("Malformed generation result: {}", _0)]
    Malformed(String),
    /// The provider answered with nothing
    #[display("Empty response from {}", _0)]
    EmptyResponse(String),
}

/// Error type for generation calls.
///
/// # Examples
///
/// ```
/// use quill_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::Aborted);
/// assert!(err.is_aborted());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this error is a deliberate abort rather than a failure.
    pub fn is_aborted(&self) -> bool {
        self.kind == GenerationErrorKind::Aborted
    }
}
