//! Runs one wizard step at a time.

use crate::SessionState;
use sightline_core::{BoundingBox, LabelCategories, MaskSelection, StepId, StillImage};
use sightline_error::{PreconditionError, PreconditionErrorKind, SightlineResult};
use sightline_interface::AnnotationService;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument};

/// Substring that marks the most safety-critical detection.
const CRITICAL_LABEL: &str = "cell phone";

/// Executes the action bound to the current step.
///
/// The sequencer holds no state of its own; each call reads a
/// [`SessionState`] and returns the successor.
#[derive(Clone)]
pub struct StepSequencer {
    service: Arc<dyn AnnotationService>,
}

impl std::fmt::Debug for StepSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepSequencer")
            .field("mock", &self.service.is_mock())
            .finish()
    }
}

fn missing(kind: PreconditionErrorKind) -> sightline_error::SightlineError {
    PreconditionError::new(kind).into()
}

fn require_image(state: &SessionState) -> SightlineResult<&StillImage> {
    if state.extracting {
        return Err(missing(PreconditionErrorKind::ExtractionInProgress));
    }
    state
        .analysis_image
        .as_ref()
        .ok_or_else(|| missing(PreconditionErrorKind::MissingAnalysisImage))
}

fn require_labels(state: &SessionState) -> SightlineResult<&LabelCategories> {
    state
        .labels
        .as_ref()
        .ok_or_else(|| missing(PreconditionErrorKind::MissingLabels))
}

fn require_boxes(state: &SessionState) -> SightlineResult<&[BoundingBox]> {
    state
        .boxes
        .as_deref()
        .ok_or_else(|| missing(PreconditionErrorKind::MissingBoxes))
}

impl StepSequencer {
    /// Create a sequencer over an annotation service.
    pub fn new(service: Arc<dyn AnnotationService>) -> Self {
        Self { service }
    }

    /// The injected annotation service.
    pub fn service(&self) -> &Arc<dyn AnnotationService> {
        &self.service
    }

    /// Run the current step and return the next state.
    ///
    /// On success the returned state carries the step's output and an index
    /// one greater than the input. The input state is never modified.
    ///
    /// # Errors
    ///
    /// - `PreconditionError` if the step's inputs are missing, a frame is
    ///   still being extracted, or the step is Upload or Summary
    /// - `RemoteCallError` from the annotation service
    #[instrument(skip_all, fields(step = %state.current_step().id, index = state.step_index))]
    pub async fn advance(&self, state: &SessionState) -> SightlineResult<SessionState> {
        let step = state.current_step();
        info!(name = step.name, "Running step");

        let mut next = state.clone();
        match step.id {
            StepId::Upload => return Err(missing(PreconditionErrorKind::UploadRequired)),
            StepId::Narrative => {
                let image = require_image(state)?;
                next.narrative = Some(self.service.generate_narrative(image).await?);
            }
            StepId::Labels => {
                require_image(state)?;
                let narrative = state
                    .narrative
                    .as_deref()
                    .ok_or_else(|| missing(PreconditionErrorKind::MissingNarrative))?;
                next.labels = Some(self.service.propose_labels(narrative).await?);
            }
            StepId::BoundingBoxes => {
                let image = require_image(state)?;
                let labels = require_labels(state)?;
                next.boxes = Some(
                    self.service
                        .generate_boxes(&labels.all_labels(), image)
                        .await?,
                );
            }
            StepId::FilterBoxes => {
                let labels = require_labels(state)?;
                let boxes = require_boxes(state)?;
                next.filtered_labels = Some(filter_driver_monitoring(labels, boxes));
            }
            StepId::Masks => {
                let boxes = require_boxes(state)?;
                next.mask = Some(MaskSelection {
                    label: select_mask_label(boxes),
                });
            }
            StepId::Summary => return Err(missing(PreconditionErrorKind::PipelineComplete)),
        }

        next.step_index += 1;
        info!(next = %next.current_step().id, "Step complete");
        Ok(next)
    }
}

/// Labels of detected boxes that belong to the driver-monitoring bucket.
///
/// Keeps box order and drops repeats.
///
/// # Examples
///
/// ```
/// use sightline_core::{BoundingBox, LabelCategories};
/// use sightline_pipeline::filter_driver_monitoring;
///
/// let labels = LabelCategories {
///     driver_monitoring: vec!["cell phone use".into()],
///     road_environment: vec!["car".into()],
///     logistics: vec![],
/// };
/// let boxes = [
///     BoundingBox::new("cell phone use", [0.1, 0.1, 0.1, 0.1]),
///     BoundingBox::new("car", [0.5, 0.5, 0.2, 0.2]),
/// ];
/// assert_eq!(filter_driver_monitoring(&labels, &boxes), vec!["cell phone use"]);
/// ```
pub fn filter_driver_monitoring(labels: &LabelCategories, boxes: &[BoundingBox]) -> Vec<String> {
    let important: HashSet<&str> = labels.driver_monitoring.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    boxes
        .iter()
        .map(|b| b.label.as_str())
        .filter(|label| important.contains(label) && seen.insert(*label))
        .map(str::to_string)
        .collect()
}

/// The label to segment: the first box mentioning a cell phone, otherwise
/// the first box, otherwise none.
pub fn select_mask_label(boxes: &[BoundingBox]) -> Option<String> {
    boxes
        .iter()
        .find(|b| b.label.to_lowercase().contains(CRITICAL_LABEL))
        .or_else(|| boxes.first())
        .map(|b| b.label.clone())
}
