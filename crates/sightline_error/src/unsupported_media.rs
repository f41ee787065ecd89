//! Upload rejection errors.

/// An upload whose declared MIME type is neither `image/*` nor `video/*`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "Unsupported file type. Please upload an image or MP4 video file. (got '{}')",
    mime
)]
pub struct UnsupportedMediaError {
    /// The MIME type that was rejected
    pub mime: String,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl UnsupportedMediaError {
    /// Create a new UnsupportedMediaError for the rejected MIME type.
    ///
    /// # Examples
    ///
    /// ```
    /// use sightline_error::UnsupportedMediaError;
    ///
    /// let err = UnsupportedMediaError::new("application/pdf");
    /// assert!(err.to_string().contains("application/pdf"));
    /// ```
    #[track_caller]
    pub fn new(mime: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            mime: mime.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
