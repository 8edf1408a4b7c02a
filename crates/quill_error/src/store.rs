//! Store error types.

/// Kinds of story and series store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// Requested row does not exist
    #[display("Not found: {}", _0)]
    NotFound(String),
    /// Write would violate a uniqueness constraint
    #[display("Conflict: {}", _0)]
    Conflict(String),
    /// Remote backend rejected the request
    #[display("Request failed with status {}: {}", status, message)]
    Request {
        /// HTTP status code returned by the backend
        status: u16,
        /// Response body or reason
        message: String,
    },
    /// Row could not be decoded into a domain type
    #[display("Failed to decode row: {}", _0)]
    Decode(String),
    /// Backend is unreachable
    #[display("Store unavailable: {}", _0)]
    Unavailable(String),
}

/// Store error with location tracking.
///
/// # Examples
///
/// ```
/// use quill_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::NotFound("story S1".to_string()));
/// assert!(format!("{}", err).contains("Not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
