//! Explicit state of one wizard run.

use sightline_core::{
    BoundingBox, LabelCategories, MaskSelection, MediaKind, MediaUpload, STEPS, Step, StillImage,
};

/// Everything a wizard run has produced so far.
///
/// An output is `None` until its step has executed. `step_index` always
/// points into [`STEPS`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    /// Index of the step to run next
    pub step_index: usize,
    /// The accepted upload
    pub media: Option<MediaUpload>,
    /// Kind of the accepted upload
    pub media_kind: Option<MediaKind>,
    /// Image submitted to the remote steps
    pub analysis_image: Option<StillImage>,
    /// True while a video frame is being extracted
    pub extracting: bool,
    /// Scene narrative
    pub narrative: Option<String>,
    /// Proposed labels
    pub labels: Option<LabelCategories>,
    /// Detected boxes
    pub boxes: Option<Vec<BoundingBox>>,
    /// Driver-monitoring labels kept by the filter step
    pub filtered_labels: Option<Vec<String>>,
    /// Label chosen for segmentation
    pub mask: Option<MaskSelection>,
}

impl SessionState {
    /// The step that runs next.
    pub fn current_step(&self) -> &'static Step {
        &STEPS[self.step_index.min(STEPS.len() - 1)]
    }

    /// True on the terminal summary step.
    pub fn is_complete(&self) -> bool {
        self.step_index + 1 >= STEPS.len()
    }
}
