//! Uploaded media and analysis image references.

use base64::Engine as _;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Kind of media accepted by the upload gate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A still image, used directly as the analysis image
    #[display("image")]
    Image,
    /// A video, sampled to a single still frame
    #[display("video")]
    Video,
}

/// A file handed to the upload gate.
///
/// # Examples
///
/// ```
/// use sightline_core::MediaUpload;
///
/// let upload = MediaUpload::builder()
///     .file_name("cab.mp4")
///     .mime("video/mp4")
///     .bytes(vec![0u8; 16])
///     .build()
///     .unwrap();
/// assert_eq!(upload.mime(), "video/mp4");
/// assert_eq!(upload.len(), 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Getters)]
#[builder(setter(into))]
pub struct MediaUpload {
    /// Original file name, for display
    file_name: String,
    /// Declared MIME type
    mime: String,
    /// Raw file contents
    bytes: Vec<u8>,
}

impl MediaUpload {
    /// Creates a new builder for `MediaUpload`.
    pub fn builder() -> MediaUploadBuilder {
        MediaUploadBuilder::default()
    }

    /// Size of the upload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the upload carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The still image submitted to analysis steps.
///
/// Either the uploaded image itself or a JPEG frame sampled from an uploaded video.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StillImage {
    /// MIME type of the encoded image
    mime: String,
    /// Encoded image bytes
    bytes: Vec<u8>,
}

impl StillImage {
    /// Wrap encoded image bytes.
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// A JPEG still, as produced by frame extraction.
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self::new("image/jpeg", bytes)
    }

    /// Standard base64 encoding of the image bytes, as sent inline to the service.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}
