//! Shared fixtures for wizard tests.

use async_trait::async_trait;
use sightline_core::{BoundingBox, LabelCategories, MediaUpload, StillImage};
use sightline_error::{
    ExtractionError, ExtractionErrorKind, PreconditionErrorKind, RemoteCallError,
    RemoteCallErrorKind, SightlineError, SightlineErrorKind, SightlineResult,
};
use sightline_interface::{AnnotationService, RawFrame, VideoDecoder, VideoProbe};
use sightline_models::MockAnnotationService;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock service without simulated latency.
#[allow(dead_code)]
pub fn mock_service() -> Arc<dyn AnnotationService> {
    Arc::new(MockAnnotationService::new(Duration::ZERO))
}

/// Service whose every call fails with HTTP 503.
#[derive(Debug, Default)]
pub struct FailingService {
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl FailingService {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> SightlineResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RemoteCallError::new(RemoteCallErrorKind::Http {
            status_code: 503,
            message: "Model is overloaded".to_string(),
        })
        .into())
    }
}

#[async_trait]
impl AnnotationService for FailingService {
    async fn generate_narrative(&self, _image: &StillImage) -> SightlineResult<String> {
        self.fail()
    }

    async fn propose_labels(&self, _narrative: &str) -> SightlineResult<LabelCategories> {
        self.fail()
    }

    async fn generate_boxes(
        &self,
        _labels: &[&str],
        _image: &StillImage,
    ) -> SightlineResult<Vec<BoundingBox>> {
        self.fail()
    }

    fn is_mock(&self) -> bool {
        false
    }
}

#[allow(dead_code)]
/// Decoder producing a flat grey 8x6 frame, or failing to probe.
#[derive(Debug, Clone, Copy)]
pub struct GreyDecoder {
    pub fail: bool,
}

#[async_trait]
impl VideoDecoder for GreyDecoder {
    async fn probe(&self, _path: &Path) -> SightlineResult<VideoProbe> {
        if self.fail {
            return Err(ExtractionError::new(ExtractionErrorKind::Probe(
                "invalid data found when processing input".to_string(),
            ))
            .into());
        }
        Ok(VideoProbe::new(4.0, 8, 6))
    }

    async fn frame_at(
        &self,
        _path: &Path,
        _position_secs: f64,
        probe: &VideoProbe,
    ) -> SightlineResult<RawFrame> {
        let (w, h) = (*probe.width(), *probe.height());
        Ok(RawFrame::new(w, h, vec![128u8; (w * h * 3) as usize]))
    }
}

#[allow(dead_code)]
pub fn upload(file_name: &str, mime: &str) -> MediaUpload {
    MediaUpload::builder()
        .file_name(file_name)
        .mime(mime)
        .bytes(vec![0xFF, 0xD8, 0xFF, 0xD9])
        .build()
        .expect("valid upload")
}

#[allow(dead_code)]
pub fn precondition_kind(err: &SightlineError) -> PreconditionErrorKind {
    match err.kind() {
        SightlineErrorKind::Precondition(e) => e.kind.clone(),
        other => panic!("expected precondition error, got {other}"),
    }
}
