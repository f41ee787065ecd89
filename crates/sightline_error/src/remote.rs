//! Generative service error types.

/// Failures talking to the external generative service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RemoteCallErrorKind {
    /// No credential was configured for the live service
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// Building the HTTP client failed
    #[display("Failed to create HTTP client: {}", _0)]
    ClientCreation(String),
    /// The request could not be sent or the body could not be read
    #[display("Request failed: {}", _0)]
    Request(String),
    /// The service answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
    /// The service answered without any usable candidate text
    #[display("Empty response from generative service")]
    EmptyResponse,
    /// The response did not match the declared schema
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
}

/// Generative service error with source location tracking.
///
/// # Examples
///
/// ```
/// use sightline_error::{RemoteCallError, RemoteCallErrorKind};
///
/// let err = RemoteCallError::new(RemoteCallErrorKind::Http {
///     status_code: 503,
///     message: "overloaded".to_string(),
/// });
/// assert!(format!("{}", err).contains("503"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Remote Call Error: {} at line {} in {}", kind, line, file)]
pub struct RemoteCallError {
    /// The kind of error that occurred
    pub kind: RemoteCallErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RemoteCallError {
    /// Create a new RemoteCallError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RemoteCallErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
