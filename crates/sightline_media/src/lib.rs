//! Upload classification and video frame extraction for Sightline.
//!
//! - [`UploadGate`] accepts `image/*` and `video/*` uploads and rejects everything else
//! - [`FrameExtractor`] samples one JPEG still from a video through a [`VideoDecoder`](sightline_interface::VideoDecoder)
//! - [`FfmpegDecoder`] is the decoder backed by the `ffprobe` and `ffmpeg` binaries

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extractor;
mod ffmpeg;
mod upload;

pub use extractor::{DEFAULT_JPEG_QUALITY, FrameExtractor, MAX_SEEK_SECS, seek_position};
pub use ffmpeg::{FfmpegDecoder, parse_probe};
pub use upload::{UploadGate, mime_for_path};
