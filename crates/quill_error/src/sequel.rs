//! Sequel pipeline error types.

/// Specific error conditions for the sequel pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SequelErrorKind {
    /// The cancellation token fired before the named step could start
    #[display("Cancelled before '{}'", _0)]
    Cancelled(String),
    /// A state transition not allowed by the pipeline
    #[display("Invalid transition from {} to {}", from, to)]
    InvalidTransition {
        /// State the session was in
        from: String,
        /// State that was requested
        to: String,
    },
    /// A step failed and halted the pipeline
    #[display("{} failed: {}", step, message)]
    StepFailed {
        /// Human-readable step label
        step: String,
        /// Underlying failure
        message: String,
    },
    /// The session already reached a terminal state
    #[display("Session already finished in state {}", _0)]
    SessionFinished(String),
}

/// Error type for the sequel pipeline.
///
/// # Examples
///
/// ```
/// use quill_error::{SequelError, SequelErrorKind};
///
/// let err = SequelError::new(SequelErrorKind::StepFailed {
///     step: "Creating title".to_string(),
///     message: "provider returned 503".to_string(),
/// });
/// assert_eq!(err.kind.to_string(), "Creating title failed: provider returned 503");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Sequel Error: {} at line {} in {}", kind, line, file)]
pub struct SequelError {
    /// The specific error condition
    pub kind: SequelErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SequelError {
    /// Create a new SequelError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SequelErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
