// End-to-end wizard runs through the facade crate.
//
// The generative service and the video decoder are replaced by in-process
// fakes so these tests need neither network access nor ffmpeg.

use async_trait::async_trait;
use serde_json::json;
use sightline::{
    FrameExtractor, GenerativeDriver, LiveAnnotationService, MediaUpload, PreconditionErrorKind,
    RawFrame, RemoteCallError, RemoteCallErrorKind, SightlineErrorKind, SightlineResult, StepId,
    StillImage, VideoDecoder, VideoProbe, WizardSession,
};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Driver answering from a fixed queue of results.
#[derive(Debug, Default)]
struct QueueDriver {
    replies: Mutex<VecDeque<SightlineResult<serde_json::Value>>>,
    images_seen: Mutex<Vec<String>>,
}

impl QueueDriver {
    fn new(replies: Vec<SightlineResult<serde_json::Value>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            images_seen: Mutex::new(Vec::new()),
        }
    }

    fn pop(&self) -> SightlineResult<serde_json::Value> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteCallError::new(RemoteCallErrorKind::EmptyResponse).into()))
    }
}

#[async_trait]
impl GenerativeDriver for QueueDriver {
    async fn generate_text(&self, _prompt: &str, image: &StillImage) -> SightlineResult<String> {
        self.images_seen.lock().unwrap().push(image.mime().clone());
        Ok(self.pop()?.as_str().unwrap_or_default().to_string())
    }

    async fn generate_json(
        &self,
        _prompt: &str,
        image: Option<&StillImage>,
        _schema: &serde_json::Value,
    ) -> SightlineResult<serde_json::Value> {
        if let Some(image) = image {
            self.images_seen.lock().unwrap().push(image.mime().clone());
        }
        self.pop()
    }

    fn provider_name(&self) -> &'static str {
        "queue"
    }

    fn model_name(&self) -> &str {
        "queue"
    }
}

/// Decoder returning a 16x9 gradient.
#[derive(Debug)]
struct GradientDecoder;

#[async_trait]
impl VideoDecoder for GradientDecoder {
    async fn probe(&self, _path: &Path) -> SightlineResult<VideoProbe> {
        Ok(VideoProbe::new(7.5, 16, 9))
    }

    async fn frame_at(
        &self,
        _path: &Path,
        _pos: f64,
        probe: &VideoProbe,
    ) -> SightlineResult<RawFrame> {
        let (w, h) = (*probe.width(), *probe.height());
        let rgb = (0..w * h)
            .flat_map(|i| {
                let v = (i * 255 / (w * h)) as u8;
                [v, v, 255 - v]
            })
            .collect();
        Ok(RawFrame::new(w, h, rgb))
    }
}

fn video() -> MediaUpload {
    MediaUpload::builder()
        .file_name("cab.mp4")
        .mime("video/mp4")
        .bytes(vec![0u8; 64])
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_live_service_drives_video_to_summary() -> anyhow::Result<()> {
    let driver = Arc::new(QueueDriver::new(vec![
        Ok(json!("A driver is texting while the truck drifts across lane markings.")),
        Ok(json!({
            "driverMonitoring": ["cell phone use", "eyes on road"],
            "roadEnvironment": ["lane markings"],
            "logistics": []
        })),
        Ok(json!([
            {"label": "lane markings", "box": [0.0, 0.8, 1.0, 0.2]},
            {"label": "cell phone use", "box": [0.4, 0.5, 0.1, 0.2]}
        ])),
    ]));
    let service = LiveAnnotationService::new(driver.clone());
    let mut session = WizardSession::new(Arc::new(service), false);
    let extractor = FrameExtractor::new(Arc::new(GradientDecoder));

    session.upload(video(), &extractor).await?;
    let still = session.state().analysis_image.clone().expect("frame extracted");
    let decoded = image::load_from_memory(still.bytes())?;
    assert_eq!((decoded.width(), decoded.height()), (16, 9));

    while !session.state().is_complete() {
        session.advance().await?;
    }

    let view = session.view();
    assert_eq!(view.filtered_labels, Some(vec!["cell phone use".to_string()]));
    assert_eq!(view.mask_label.as_deref(), Some("cell phone use"));
    assert!(!view.mock_mode);
    assert_eq!(
        *driver.images_seen.lock().unwrap(),
        vec!["image/jpeg".to_string(), "image/jpeg".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn test_malformed_boxes_stop_at_detection() -> anyhow::Result<()> {
    let driver = Arc::new(QueueDriver::new(vec![
        Ok(json!("A quiet cab.")),
        Ok(json!({"driverMonitoring": ["drowsiness"]})),
        Ok(json!([{"label": "drowsiness", "box": [0.1, 0.2]}])),
    ]));
    let mut session = WizardSession::new(
        Arc::new(LiveAnnotationService::new(driver)),
        false,
    );
    session.upload(video(), &FrameExtractor::new(Arc::new(GradientDecoder))).await?;

    session.advance().await?;
    session.advance().await?;
    let err = session.advance().await.unwrap_err();

    assert!(matches!(err.kind(), SightlineErrorKind::RemoteCall(_)));
    assert_eq!(session.state().current_step().id, StepId::BoundingBoxes);
    assert!(session.view().error.unwrap().starts_with("An error occurred: Malformed response"));

    session.restart();
    let err = session.advance().await.unwrap_err();
    match err.kind() {
        SightlineErrorKind::Precondition(e) => {
            assert_eq!(e.kind, PreconditionErrorKind::UploadRequired)
        }
        other => panic!("expected precondition error, got {other}"),
    }
    Ok(())
}
