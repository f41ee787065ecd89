//! Top-level error wrapper types.

use crate::{
    ConfigError, ExtractionError, PreconditionError, RemoteCallError, UnsupportedMediaError,
};

/// Every error condition the wizard can surface.
///
/// # Examples
///
/// ```
/// use sightline_error::{SightlineError, UnsupportedMediaError};
///
/// let err: SightlineError = UnsupportedMediaError::new("application/pdf").into();
/// assert!(format!("{}", err).contains("Unsupported file type"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SightlineErrorKind {
    /// Upload with a MIME type other than image or video
    #[from(UnsupportedMediaError)]
    UnsupportedMedia(UnsupportedMediaError),
    /// Video decode, seek, surface or encode failure
    #[from(ExtractionError)]
    Extraction(ExtractionError),
    /// Step invoked without its required prior output
    #[from(PreconditionError)]
    Precondition(PreconditionError),
    /// External generative service failure or malformed response
    #[from(RemoteCallError)]
    RemoteCall(RemoteCallError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Sightline error with kind discrimination.
///
/// # Examples
///
/// ```
/// use sightline_error::{PreconditionError, PreconditionErrorKind, SightlineResult};
///
/// fn might_fail() -> SightlineResult<()> {
///     Err(PreconditionError::new(PreconditionErrorKind::MissingBoxes))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert_eq!(err.user_message(), "Bounding boxes not found.");
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Sightline Error: {}", _0)]
pub struct SightlineError(Box<SightlineErrorKind>);

impl SightlineError {
    /// Create a new error from a kind.
    pub fn new(kind: SightlineErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SightlineErrorKind {
        &self.0
    }

    /// Message suitable for showing to the user, without source locations.
    pub fn user_message(&self) -> String {
        match self.kind() {
            SightlineErrorKind::UnsupportedMedia(e) => e.to_string(),
            SightlineErrorKind::Extraction(e) => {
                format!("Error extracting frame from video: {}", e.kind)
            }
            SightlineErrorKind::Precondition(e) => e.kind.to_string(),
            SightlineErrorKind::RemoteCall(e) => format!("An error occurred: {}", e.kind),
            SightlineErrorKind::Config(e) => e.message.clone(),
        }
    }
}

// Generic From implementation for any type that converts to SightlineErrorKind
impl<T> From<T> for SightlineError
where
    T: Into<SightlineErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Sightline operations.
pub type SightlineResult<T> = std::result::Result<T, SightlineError>;
