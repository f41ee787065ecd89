//! Single-frame sampling from uploaded video.

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use sightline_core::StillImage;
use sightline_error::{ExtractionError, ExtractionErrorKind, SightlineResult};
use sightline_interface::{VideoDecoder, VideoProbe};
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Latest point sampled, in seconds.
pub const MAX_SEEK_SECS: f64 = 1.0;

/// JPEG quality of extracted stills.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Position to sample for a video of the given duration: one second in, or
/// the midpoint of clips shorter than two seconds.
///
/// # Examples
///
/// ```
/// use sightline_media::seek_position;
///
/// assert_eq!(seek_position(0.5), 0.25);
/// assert_eq!(seek_position(10.0), 1.0);
/// ```
pub fn seek_position(duration_secs: f64) -> f64 {
    (duration_secs / 2.0).min(MAX_SEEK_SECS)
}

/// Produces the analysis image for a video upload.
///
/// Each call stages the bytes in a temporary file, probes the video, decodes
/// one frame at [`seek_position`] and encodes it as JPEG. The staged file is
/// removed on every exit path. There are no retries.
#[derive(Clone)]
pub struct FrameExtractor {
    decoder: Arc<dyn VideoDecoder>,
    jpeg_quality: u8,
}

impl std::fmt::Debug for FrameExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameExtractor")
            .field("jpeg_quality", &self.jpeg_quality)
            .finish_non_exhaustive()
    }
}

impl FrameExtractor {
    /// Create an extractor over `decoder` at the default JPEG quality.
    pub fn new(decoder: Arc<dyn VideoDecoder>) -> Self {
        Self {
            decoder,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Override the JPEG quality (clamped to 1..=100).
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// JPEG quality used for encoding.
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// Sample one still frame from `video`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError` if the bytes cannot be staged, the video cannot
    /// be probed or decoded, the pixels do not fit the frame dimensions, or
    /// JPEG encoding fails.
    #[instrument(skip_all, fields(bytes = video.len()))]
    pub async fn extract(&self, video: &[u8]) -> SightlineResult<StillImage> {
        let staged = stage(video)?;
        let path = staged.path();
        debug!(path = %path.display(), "Staged video for decoding");

        let probe = self.decoder.probe(path).await?;
        validate_probe(&probe)?;

        let position = seek_position(*probe.duration_secs());
        debug!(
            duration_secs = probe.duration_secs(),
            width = probe.width(),
            height = probe.height(),
            position,
            "Seeking to sample frame"
        );
        let frame = self.decoder.frame_at(path, position, &probe).await?;
        drop(staged);

        let (width, height) = (*frame.width(), *frame.height());
        let surface = RgbImage::from_raw(width, height, frame.into_rgb()).ok_or_else(|| {
            ExtractionError::new(ExtractionErrorKind::Surface(format!(
                "pixel buffer does not fit a {}x{} frame",
                width, height
            )))
        })?;

        let jpeg = encode_jpeg(&surface, self.jpeg_quality)?;
        info!(width, height, jpeg_bytes = jpeg.len(), "Extracted analysis frame");
        Ok(StillImage::jpeg(jpeg))
    }
}

fn stage(video: &[u8]) -> SightlineResult<tempfile::NamedTempFile> {
    let io_error =
        |e: std::io::Error| ExtractionError::new(ExtractionErrorKind::Io(e.to_string()));
    let mut file = tempfile::Builder::new()
        .prefix("sightline-")
        .suffix(".video")
        .tempfile()
        .map_err(io_error)?;
    file.write_all(video).map_err(io_error)?;
    file.flush().map_err(io_error)?;
    Ok(file)
}

fn validate_probe(probe: &VideoProbe) -> SightlineResult<()> {
    let duration = *probe.duration_secs();
    if !duration.is_finite() || duration <= 0.0 {
        return Err(ExtractionError::new(ExtractionErrorKind::Probe(format!(
            "invalid duration {}",
            duration
        )))
        .into());
    }
    if *probe.width() == 0 || *probe.height() == 0 {
        return Err(ExtractionError::new(ExtractionErrorKind::Probe(format!(
            "invalid dimensions {}x{}",
            probe.width(),
            probe.height()
        )))
        .into());
    }
    Ok(())
}

fn encode_jpeg(surface: &RgbImage, quality: u8) -> SightlineResult<Vec<u8>> {
    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, quality);
    surface
        .write_with_encoder(encoder)
        .map_err(|e| ExtractionError::new(ExtractionErrorKind::Encode(e.to_string())))?;
    Ok(jpeg)
}
