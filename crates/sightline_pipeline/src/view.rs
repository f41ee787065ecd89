//! Read-only presentation of a session.

use crate::SessionState;
use serde::Serialize;
use sightline_core::{BoundingBox, LabelCategories, MediaKind, STEPS, StepId};

/// Progress of one step relative to the current index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Already executed
    Complete,
    /// Runs next
    Current,
    /// Not yet reached
    Pending,
}

/// One entry of the progress stepper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    /// Step identifier
    pub id: StepId,
    /// Short display name
    pub name: &'static str,
    /// Progress
    pub status: StepStatus,
}

/// Summary of the accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaSummary {
    /// Original file name
    pub file_name: String,
    /// Declared MIME type
    pub mime: String,
    /// Image or video
    pub kind: MediaKind,
    /// Size in bytes
    pub bytes: usize,
}

/// Snapshot of a wizard session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    /// Step that runs next
    pub current_step: StepId,
    /// Card heading of the current step
    pub title: &'static str,
    /// Card body of the current step
    pub description: &'static str,
    /// All steps with their progress
    pub steps: Vec<StepView>,
    /// The accepted upload, if any
    pub media: Option<MediaSummary>,
    /// True once an analysis image is available
    pub has_analysis_image: bool,
    /// True while a video frame is being extracted
    pub extracting: bool,
    /// Scene narrative
    pub narrative: Option<String>,
    /// Proposed labels
    pub labels: Option<LabelCategories>,
    /// Detected boxes
    pub boxes: Option<Vec<BoundingBox>>,
    /// Labels kept by the filter step
    pub filtered_labels: Option<Vec<String>>,
    /// Label chosen for segmentation, once the masks step has run
    pub mask_label: Option<String>,
    /// True once the masks step has run
    pub masks_generated: bool,
    /// Message of the most recent failure
    pub error: Option<String>,
    /// True when running on canned data
    pub mock_mode: bool,
    /// True on the terminal summary step
    pub complete: bool,
}

impl SessionView {
    pub(crate) fn new(state: &SessionState, error: Option<String>, mock_mode: bool) -> Self {
        let current = state.current_step();
        let steps = STEPS
            .iter()
            .enumerate()
            .map(|(i, step)| StepView {
                id: step.id,
                name: step.name,
                status: match i.cmp(&state.step_index) {
                    std::cmp::Ordering::Less => StepStatus::Complete,
                    std::cmp::Ordering::Equal => StepStatus::Current,
                    std::cmp::Ordering::Greater => StepStatus::Pending,
                },
            })
            .collect();

        let media = state.media.as_ref().zip(state.media_kind).map(|(m, kind)| MediaSummary {
            file_name: m.file_name().clone(),
            mime: m.mime().clone(),
            kind,
            bytes: m.len(),
        });

        Self {
            current_step: current.id,
            title: current.title,
            description: current.description,
            steps,
            media,
            has_analysis_image: state.analysis_image.is_some(),
            extracting: state.extracting,
            narrative: state.narrative.clone(),
            labels: state.labels.clone(),
            boxes: state.boxes.clone(),
            filtered_labels: state.filtered_labels.clone(),
            mask_label: state.mask.as_ref().and_then(|m| m.label.clone()),
            masks_generated: state.mask.is_some(),
            error,
            mock_mode,
            complete: state.is_complete(),
        }
    }
}
