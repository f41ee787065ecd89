//! Step precondition error types.

/// A step was invoked without the prior output it depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PreconditionErrorKind {
    /// The upload step is completed by the upload gate, not by advancing
    #[display("No file uploaded. Please upload an image or video first.")]
    UploadRequired,
    /// No analysis image is available yet
    #[display("No image frame to process. Please upload a file.")]
    MissingAnalysisImage,
    /// The labels step needs a narrative
    #[display("Narrative not found.")]
    MissingNarrative,
    /// Detection and filtering need proposed labels
    #[display("Labels not found.")]
    MissingLabels,
    /// Filtering and masking need detected boxes
    #[display("Bounding boxes not found.")]
    MissingBoxes,
    /// A video frame is still being extracted
    #[display("Video frame extraction is still in progress.")]
    ExtractionInProgress,
    /// The summary step is terminal
    #[display("Pipeline complete. Restart to analyze another file.")]
    PipelineComplete,
}

/// Precondition error with source location tracking.
///
/// # Examples
///
/// ```
/// use sightline_error::{PreconditionError, PreconditionErrorKind};
///
/// let err = PreconditionError::new(PreconditionErrorKind::MissingLabels);
/// assert_eq!(err.kind, PreconditionErrorKind::MissingLabels);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Precondition Error: {} at line {} in {}", kind, line, file)]
pub struct PreconditionError {
    /// The missing precondition
    pub kind: PreconditionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PreconditionError {
    /// Create a new PreconditionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PreconditionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
