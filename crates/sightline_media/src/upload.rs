//! Upload classification.

use sightline_core::MediaKind;
use sightline_error::{SightlineResult, UnsupportedMediaError};
use std::path::Path;
use tracing::debug;

/// Decides which uploads the wizard accepts.
///
/// # Examples
///
/// ```
/// use sightline_core::MediaKind;
/// use sightline_media::UploadGate;
///
/// assert_eq!(UploadGate::classify("video/mp4").unwrap(), MediaKind::Video);
/// assert!(UploadGate::classify("application/pdf").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadGate;

impl UploadGate {
    /// Map a declared MIME type to a media kind.
    ///
    /// Matching is on the top-level type only and ignores case.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedMediaError` for anything other than `image/*` or `video/*`.
    pub fn classify(mime: &str) -> SightlineResult<MediaKind> {
        let normalized = mime.trim().to_ascii_lowercase();
        let kind = if normalized.starts_with("image/") {
            MediaKind::Image
        } else if normalized.starts_with("video/") {
            MediaKind::Video
        } else {
            debug!(mime, "Rejecting upload");
            return Err(UnsupportedMediaError::new(mime).into());
        };
        Ok(kind)
    }
}

/// Guess a MIME type from a file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}
