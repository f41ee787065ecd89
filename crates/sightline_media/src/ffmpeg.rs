//! Video decoder backed by the ffprobe and ffmpeg binaries.

use async_trait::async_trait;
use serde::Deserialize;
use sightline_error::{ExtractionError, ExtractionErrorKind, SightlineResult};
use sightline_interface::{RawFrame, VideoDecoder, VideoProbe};
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Decodes by shelling out to `ffprobe` and `ffmpeg`.
///
/// Every invocation is bounded by a timeout; a child that outlives it is killed.
#[derive(Debug, Clone)]
pub struct FfmpegDecoder {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
    timeout: Duration,
}

impl FfmpegDecoder {
    /// Create a decoder using the given binaries.
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
            timeout,
        }
    }

    async fn run(
        &self,
        mut command: Command,
        failure: fn(String) -> ExtractionErrorKind,
    ) -> SightlineResult<Output> {
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                ExtractionError::new(ExtractionErrorKind::Timeout(self.timeout.as_secs()))
            })?
            .map_err(|e| ExtractionError::new(failure(e.to_string())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::new(failure(format!(
                "{} ({})",
                stderr.trim(),
                output.status
            )))
            .into());
        }
        Ok(output)
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    #[serde(default)]
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
    #[serde(default)]
    side_data_list: Vec<ProbeSideData>,
    #[serde(default)]
    tags: Option<ProbeTags>,
}

#[derive(Debug, Deserialize)]
struct ProbeSideData {
    rotation: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ProbeTags {
    rotate: Option<String>,
}

impl ProbeStream {
    /// Display rotation in degrees, from the display matrix or the legacy `rotate` tag.
    fn rotation(&self) -> i64 {
        let from_matrix = self
            .side_data_list
            .iter()
            .filter_map(|d| d.rotation.as_ref())
            .find_map(|v| match v {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => s.trim().parse().ok(),
                _ => None,
            });
        let from_tag = || {
            self.tags
                .as_ref()
                .and_then(|t| t.rotate.as_deref())
                .and_then(|r| r.trim().parse::<f64>().ok())
        };
        from_matrix.or_else(from_tag).unwrap_or_default().round() as i64
    }

    /// True when frames are displayed a quarter turn from their coded orientation.
    fn is_quarter_turn(&self) -> bool {
        self.rotation().rem_euclid(180) == 90
    }
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Read duration and displayed dimensions from `ffprobe -of json` output.
///
/// ffmpeg applies rotation metadata when decoding, so a quarter-turn stream
/// reports its coded width and height swapped.
///
/// # Errors
///
/// Returns `ExtractionError` (`Probe`) if the output lacks a video stream or duration.
pub fn parse_probe(stdout: &[u8]) -> SightlineResult<VideoProbe> {
    let probe_error = |message: String| ExtractionError::new(ExtractionErrorKind::Probe(message));

    let output: ProbeOutput = serde_json::from_slice(stdout)
        .map_err(|e| probe_error(format!("unreadable probe output: {}", e)))?;

    let stream = output
        .streams
        .iter()
        .find(|s| s.width.is_some() && s.height.is_some())
        .ok_or_else(|| probe_error("no video stream".to_string()))?;

    let duration = output
        .format
        .and_then(|f| f.duration)
        .ok_or_else(|| probe_error("unknown duration".to_string()))?;
    let duration_secs: f64 = duration
        .trim()
        .parse()
        .map_err(|_| probe_error(format!("unreadable duration '{}'", duration)))?;

    let (width, height) = (
        stream.width.unwrap_or_default(),
        stream.height.unwrap_or_default(),
    );
    let (width, height) = if stream.is_quarter_turn() {
        (height, width)
    } else {
        (width, height)
    };
    Ok(VideoProbe::new(duration_secs, width, height))
}

#[async_trait]
impl VideoDecoder for FfmpegDecoder {
    #[instrument(skip(self), fields(ffprobe = %self.ffprobe.display()))]
    async fn probe(&self, path: &Path) -> SightlineResult<VideoProbe> {
        let mut command = Command::new(&self.ffprobe);
        command
            .args(["-v", "error"])
            .args(["-select_streams", "v:0"])
            .args(["-show_entries", "stream=width,height:stream_side_data=rotation:stream_tags=rotate:format=duration"])
            .args(["-of", "json"])
            .arg(path);

        let output = self.run(command, ExtractionErrorKind::Probe).await?;
        let probe = parse_probe(&output.stdout)?;
        debug!(?probe, "Probed video");
        Ok(probe)
    }

    #[instrument(skip(self, probe), fields(ffmpeg = %self.ffmpeg.display()))]
    async fn frame_at(
        &self,
        path: &Path,
        position_secs: f64,
        probe: &VideoProbe,
    ) -> SightlineResult<RawFrame> {
        let mut command = Command::new(&self.ffmpeg);
        command
            .args(["-hide_banner", "-loglevel", "error", "-nostdin"])
            .args(["-ss", &format!("{:.3}", position_secs)])
            .arg("-i")
            .arg(path)
            .args(["-an", "-sn"])
            .args(["-frames:v", "1"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-"]);

        let output = self.run(command, ExtractionErrorKind::Decode).await?;
        if output.stdout.is_empty() {
            return Err(ExtractionError::new(ExtractionErrorKind::Decode(format!(
                "no frame at {:.3}s",
                position_secs
            )))
            .into());
        }
        debug!(bytes = output.stdout.len(), "Decoded frame");
        Ok(RawFrame::new(*probe.width(), *probe.height(), output.stdout))
    }
}
