//! Video decoding seam used by frame extraction.

use async_trait::async_trait;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use sightline_error::SightlineResult;
use std::path::Path;

/// Duration and displayed dimensions of a video, after any rotation metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct VideoProbe {
    /// Duration in seconds
    duration_secs: f64,
    /// Displayed width in pixels
    width: u32,
    /// Displayed height in pixels
    height: u32,
}

impl VideoProbe {
    /// Create a probe result.
    pub fn new(duration_secs: f64, width: u32, height: u32) -> Self {
        Self {
            duration_secs,
            width,
            height,
        }
    }
}

/// One decoded frame as packed RGB24 pixels at native size.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RawFrame {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Packed `R, G, B` bytes, row major
    rgb: Vec<u8>,
}

impl RawFrame {
    /// Wrap decoded pixels.
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Self {
        Self { width, height, rgb }
    }

    /// Consume the frame, returning its pixel buffer.
    pub fn into_rgb(self) -> Vec<u8> {
        self.rgb
    }
}

/// Reads metadata from and decodes single frames out of a staged video file.
///
/// Failures are reported as `ExtractionError`.
#[async_trait]
pub trait VideoDecoder: Send + Sync {
    /// Read duration and native dimensions.
    async fn probe(&self, path: &Path) -> SightlineResult<VideoProbe>;

    /// Seek to `position_secs` and decode exactly one frame.
    async fn frame_at(
        &self,
        path: &Path,
        position_secs: f64,
        probe: &VideoProbe,
    ) -> SightlineResult<RawFrame>;
}
