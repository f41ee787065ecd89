//! Frame extraction error types.

/// Failure modes of single-frame video sampling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExtractionErrorKind {
    /// Staging the video bytes for the decoder failed
    #[display("Failed to stage video for decoding: {}", _0)]
    Io(String),
    /// The decoder could not read duration or dimensions
    #[display("Error loading video file: {}", _0)]
    Probe(String),
    /// Seeking to or decoding the sampled frame failed
    #[display("Failed to decode frame: {}", _0)]
    Decode(String),
    /// Decoded pixels could not be placed on a raster surface
    #[display("Could not get drawing surface: {}", _0)]
    Surface(String),
    /// Still image encoding failed
    #[display("Frame encoding failed: {}", _0)]
    Encode(String),
    /// The decoder did not finish within the configured time
    #[display("Frame extraction timed out after {}s", _0)]
    Timeout(u64),
}

/// Frame extraction error with source location tracking.
///
/// # Examples
///
/// ```
/// use sightline_error::{ExtractionError, ExtractionErrorKind};
///
/// let err = ExtractionError::new(ExtractionErrorKind::Encode("buffer full".to_string()));
/// assert!(format!("{}", err).contains("buffer full"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Extraction Error: {} at line {} in {}", kind, line, file)]
pub struct ExtractionError {
    /// The kind of error that occurred
    pub kind: ExtractionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExtractionError {
    /// Create a new ExtractionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExtractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
