// Tests for WizardSession uploads, extraction bookkeeping and restart.

mod test_utils;

use sightline_core::{MediaKind, StepId, StillImage};
use sightline_error::{PreconditionErrorKind, SightlineErrorKind};
use sightline_media::FrameExtractor;
use sightline_pipeline::{ExtractionOutcome, StepStatus, WizardSession};
use std::sync::Arc;
use test_utils::{FailingService, GreyDecoder, mock_service, precondition_kind, upload};

fn extractor(fail: bool) -> FrameExtractor {
    FrameExtractor::new(Arc::new(GreyDecoder { fail }))
}

#[tokio::test]
async fn test_pdf_upload_rejected_without_mutation() -> anyhow::Result<()> {
    let mut session = WizardSession::new(mock_service(), true);
    session.begin_upload(upload("cab.jpg", "image/jpeg"))?;
    let before = session.state().clone();
    let generation = session.generation();

    let err = session.begin_upload(upload("report.pdf", "application/pdf")).unwrap_err();

    assert!(matches!(err.kind(), SightlineErrorKind::UnsupportedMedia(_)));
    assert_eq!(session.state(), &before);
    assert_eq!(session.generation(), generation);
    assert!(session.view().error.unwrap().contains("Unsupported file type"));
    Ok(())
}

#[tokio::test]
async fn test_image_upload_moves_to_narrative() -> anyhow::Result<()> {
    let mut session = WizardSession::new(mock_service(), true);

    let pending = session.begin_upload(upload("cab.png", "image/png"))?;

    assert!(pending.is_none());
    let state = session.state();
    assert_eq!(state.current_step().id, StepId::Narrative);
    assert_eq!(state.media_kind, Some(MediaKind::Image));
    assert_eq!(state.analysis_image.as_ref().unwrap().mime(), "image/png");
    Ok(())
}

#[tokio::test]
async fn test_advance_blocked_while_extracting() -> anyhow::Result<()> {
    let mut session = WizardSession::new(mock_service(), true);
    let pending = session
        .begin_upload(upload("cab.mp4", "video/mp4"))?
        .expect("video uploads return a ticket");
    assert!(session.view().extracting);

    let err = session.advance().await.unwrap_err();
    assert_eq!(precondition_kind(&err), PreconditionErrorKind::ExtractionInProgress);
    assert_eq!(session.state().current_step().id, StepId::Narrative);

    let applied = session.complete_extraction(pending.run(&extractor(false)).await)?;
    assert!(applied);
    assert!(!session.state().extracting);
    assert_eq!(session.state().analysis_image.as_ref().unwrap().mime(), "image/jpeg");

    session.advance().await?;
    assert_eq!(session.state().current_step().id, StepId::Labels);
    assert!(session.last_error().is_none());
    Ok(())
}

#[tokio::test]
async fn test_stale_extraction_discarded_after_restart() -> anyhow::Result<()> {
    let mut session = WizardSession::new(mock_service(), true);
    let pending = session
        .begin_upload(upload("cab.mp4", "video/mp4"))?
        .expect("video uploads return a ticket");

    session.restart();
    let outcome = pending.run(&extractor(false)).await;
    let applied = session.complete_extraction(outcome)?;

    assert!(!applied);
    assert_eq!(session.state().current_step().id, StepId::Upload);
    assert!(session.state().analysis_image.is_none());
    Ok(())
}

#[tokio::test]
async fn test_stale_extraction_discarded_after_reupload() -> anyhow::Result<()> {
    let mut session = WizardSession::new(mock_service(), true);
    let first = session
        .begin_upload(upload("first.mp4", "video/mp4"))?
        .expect("ticket");
    let second = session
        .begin_upload(upload("second.mp4", "video/mp4"))?
        .expect("ticket");
    assert_ne!(first.generation(), second.generation());

    let stale = ExtractionOutcome::new(first.generation(), Ok(StillImage::jpeg(vec![1, 2, 3])));
    assert!(!session.complete_extraction(stale)?);
    assert!(session.state().extracting);

    assert!(session.complete_extraction(second.run(&extractor(false)).await)?);
    assert_eq!(session.view().media.unwrap().file_name, "second.mp4");
    Ok(())
}

#[tokio::test]
async fn test_extraction_failure_clears_flag_and_reports() -> anyhow::Result<()> {
    let mut session = WizardSession::new(mock_service(), true);

    let err = session
        .upload(upload("broken.mp4", "video/mp4"), &extractor(true))
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), SightlineErrorKind::Extraction(_)));
    let view = session.view();
    assert!(!view.extracting);
    assert!(!view.has_analysis_image);
    assert!(view.media.is_some());
    assert!(
        view.error
            .unwrap()
            .starts_with("Error extracting frame from video: Error loading video file")
    );

    let err = session.advance().await.unwrap_err();
    assert_eq!(precondition_kind(&err), PreconditionErrorKind::MissingAnalysisImage);
    Ok(())
}

#[tokio::test]
async fn test_full_mock_run_reaches_summary() -> anyhow::Result<()> {
    let mut session = WizardSession::new(mock_service(), true);
    session.upload(upload("cab.mp4", "video/mp4"), &extractor(false)).await?;

    let mut executed = Vec::new();
    while !session.state().is_complete() {
        executed.push(session.advance().await?);
    }

    assert_eq!(
        executed,
        vec![
            StepId::Narrative,
            StepId::Labels,
            StepId::BoundingBoxes,
            StepId::FilterBoxes,
            StepId::Masks,
        ]
    );
    let view = session.view();
    assert!(view.complete);
    assert!(view.mock_mode);
    assert_eq!(
        view.filtered_labels.unwrap(),
        vec!["cell phone use", "seatbelt fastened", "hands on wheel"]
    );
    assert_eq!(view.mask_label.as_deref(), Some("cell phone use"));
    assert!(view.steps[..6].iter().all(|s| s.status == StepStatus::Complete));
    assert_eq!(view.steps[6].status, StepStatus::Current);

    let before = session.state().clone();
    let err = session.advance().await.unwrap_err();
    assert_eq!(precondition_kind(&err), PreconditionErrorKind::PipelineComplete);
    assert_eq!(session.state(), &before);
    Ok(())
}

#[tokio::test]
async fn test_restart_is_idempotent_from_any_step() -> anyhow::Result<()> {
    let fresh = WizardSession::new(mock_service(), true).view();

    for steps_taken in 0..=5 {
        let mut session = WizardSession::new(mock_service(), true);
        session.upload(upload("cab.jpg", "image/jpeg"), &extractor(false)).await?;
        for _ in 0..steps_taken {
            session.advance().await?;
        }

        session.restart();
        let once = session.view();
        session.restart();
        let twice = session.view();

        assert_eq!(once, fresh);
        assert_eq!(twice, fresh);
    }
    Ok(())
}

#[tokio::test]
async fn test_failed_step_records_error_until_next_success() -> anyhow::Result<()> {
    let mut session = WizardSession::new(Arc::new(FailingService::default()), false);
    session.begin_upload(upload("cab.jpg", "image/jpeg"))?;

    let err = session.advance().await.unwrap_err();

    assert!(matches!(err.kind(), SightlineErrorKind::RemoteCall(_)));
    assert_eq!(session.state().current_step().id, StepId::Narrative);
    assert_eq!(
        session.last_error(),
        Some("An error occurred: HTTP 503 error: Model is overloaded")
    );

    session.restart();
    assert!(session.last_error().is_none());
    Ok(())
}

#[tokio::test]
async fn test_view_serializes_wire_names() -> anyhow::Result<()> {
    let mut session = WizardSession::new(mock_service(), true);
    session.begin_upload(upload("cab.jpg", "image/jpeg"))?;
    session.advance().await?;
    session.advance().await?;
    session.advance().await?;

    let json = serde_json::to_value(session.view())?;

    assert_eq!(json["current_step"], "FILTER_BOXES");
    assert_eq!(json["labels"]["driverMonitoring"][0], "cell phone use");
    assert_eq!(json["boxes"][0]["box"][0], 0.45);
    assert_eq!(json["steps"][0]["status"], "complete");
    Ok(())
}
