//! A wizard run with upload, extraction and restart bookkeeping.

use crate::{SessionState, SessionView, StepSequencer};
use sightline_core::{MediaKind, MediaUpload, StepId, StillImage};
use sightline_error::SightlineResult;
use sightline_interface::AnnotationService;
use sightline_media::{FrameExtractor, UploadGate};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Work order for extracting the analysis frame of an accepted video.
///
/// Carries the session generation at upload time so a result that arrives
/// after a restart or re-upload can be recognized and dropped.
#[derive(Debug, Clone)]
pub struct PendingExtraction {
    generation: u64,
    video: Vec<u8>,
}

impl PendingExtraction {
    /// Generation of the session that issued this ticket.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run the extraction.
    pub async fn run(self, extractor: &FrameExtractor) -> ExtractionOutcome {
        let result = extractor.extract(&self.video).await;
        ExtractionOutcome {
            generation: self.generation,
            result,
        }
    }
}

/// Finished extraction, to be handed back to [`WizardSession::complete_extraction`].
#[derive(Debug)]
pub struct ExtractionOutcome {
    generation: u64,
    result: SightlineResult<StillImage>,
}

impl ExtractionOutcome {
    /// Wrap a result produced for the given generation.
    pub fn new(generation: u64, result: SightlineResult<StillImage>) -> Self {
        Self { generation, result }
    }

    /// Generation this outcome belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// One user's wizard run.
///
/// `advance` takes `&mut self` and holds it across the remote call, so at
/// most one step is in flight per session.
#[derive(Debug)]
pub struct WizardSession {
    sequencer: StepSequencer,
    state: SessionState,
    generation: u64,
    last_error: Option<String>,
    mock_mode: bool,
}

impl WizardSession {
    /// Start a session at the upload step.
    pub fn new(service: Arc<dyn AnnotationService>, mock_mode: bool) -> Self {
        Self {
            sequencer: StepSequencer::new(service),
            state: SessionState::default(),
            generation: 0,
            last_error: None,
            mock_mode,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Counter bumped by every upload and restart.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Message of the most recent failure, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True when running on canned data.
    pub fn mock_mode(&self) -> bool {
        self.mock_mode
    }

    /// Read-only snapshot for rendering.
    pub fn view(&self) -> SessionView {
        SessionView::new(&self.state, self.last_error.clone(), self.mock_mode)
    }

    fn record<T>(&mut self, result: SightlineResult<T>) -> SightlineResult<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(e) => {
                warn!(error = %e.user_message(), "Wizard action failed");
                self.last_error = Some(e.user_message());
            }
        }
        result
    }

    /// Accept a new upload, replacing any run in progress.
    ///
    /// Images become the analysis image immediately. Videos mark the session
    /// as extracting and return a ticket to run the extraction with.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedMediaError` for anything but `image/*` or `video/*`;
    /// the state is left untouched.
    #[instrument(
        skip_all,
        fields(file = %upload.file_name(), mime = %upload.mime(), bytes = upload.len())
    )]
    pub fn begin_upload(
        &mut self,
        upload: MediaUpload,
    ) -> SightlineResult<Option<PendingExtraction>> {
        let kind = UploadGate::classify(upload.mime());
        let kind = self.record(kind)?;

        self.generation += 1;
        let mut state = SessionState {
            step_index: StepId::Narrative.index(),
            media_kind: Some(kind),
            ..SessionState::default()
        };

        let pending = match kind {
            MediaKind::Image => {
                state.analysis_image =
                    Some(StillImage::new(upload.mime().clone(), upload.bytes().clone()));
                None
            }
            MediaKind::Video => {
                state.extracting = true;
                Some(PendingExtraction {
                    generation: self.generation,
                    video: upload.bytes().clone(),
                })
            }
        };
        state.media = Some(upload);
        self.state = state;
        info!(%kind, generation = self.generation, "Upload accepted");
        Ok(pending)
    }

    /// Apply a finished extraction.
    ///
    /// Returns `Ok(false)` when the outcome belongs to an earlier generation
    /// and was discarded.
    ///
    /// # Errors
    ///
    /// Returns the extraction error for a current-generation failure. The
    /// extracting flag is cleared and the upload kept.
    pub fn complete_extraction(&mut self, outcome: ExtractionOutcome) -> SightlineResult<bool> {
        if outcome.generation != self.generation || !self.state.extracting {
            debug!(
                outcome = outcome.generation,
                current = self.generation,
                "Discarding stale extraction result"
            );
            return Ok(false);
        }

        self.state.extracting = false;
        let image = self.record(outcome.result)?;
        self.state.analysis_image = Some(image);
        Ok(true)
    }

    /// Upload and, for videos, extract the analysis frame before returning.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedMediaError` or `ExtractionError`.
    pub async fn upload(
        &mut self,
        upload: MediaUpload,
        extractor: &FrameExtractor,
    ) -> SightlineResult<()> {
        if let Some(pending) = self.begin_upload(upload)? {
            let outcome = pending.run(extractor).await;
            self.complete_extraction(outcome)?;
        }
        Ok(())
    }

    /// Run the current step and commit its output.
    ///
    /// Returns the step that was executed. On failure the state is unchanged
    /// and the error message is recorded for the view.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionError` or `RemoteCallError`.
    pub async fn advance(&mut self) -> SightlineResult<StepId> {
        let step = self.state.current_step().id;
        let next = self.sequencer.advance(&self.state).await;
        let next = self.record(next)?;
        self.state = next;
        Ok(step)
    }

    /// Clear every output and return to the upload step.
    ///
    /// Any extraction still running for the previous generation will be
    /// discarded on completion.
    pub fn restart(&mut self) {
        self.generation += 1;
        self.state = SessionState::default();
        self.last_error = None;
        info!(generation = self.generation, "Session restarted");
    }
}
