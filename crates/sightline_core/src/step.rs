//! The fixed, ordered wizard step table.

use serde::{Deserialize, Serialize};

/// Identifier of a wizard step.
///
/// Variants are declared in execution order, so `StepId::iter()` walks the
/// pipeline front to back.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
    strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StepId {
    /// Accept an image or video
    Upload,
    /// Draft a scene narrative from the analysis image
    Narrative,
    /// Propose categorized label vocabularies
    Labels,
    /// Locate labels in the analysis image
    BoundingBoxes,
    /// Keep driver-monitoring detections
    FilterBoxes,
    /// Select the label to segment
    Masks,
    /// Terminal deployment summary
    Summary,
}

impl StepId {
    /// Position of this step in [`STEPS`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Table entry for this step.
    pub fn step(self) -> &'static Step {
        &STEPS[self.index()]
    }
}

/// A named wizard step.
///
/// # Examples
///
/// ```
/// use sightline_core::{STEPS, StepId};
///
/// assert_eq!(STEPS.len(), 7);
/// assert_eq!(STEPS[3].id, StepId::BoundingBoxes);
/// assert_eq!(StepId::Masks.step().name, "Generate Masks (SAM2)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Step identifier
    pub id: StepId,
    /// Short name shown in the progress stepper
    pub name: &'static str,
    /// Card heading
    pub title: &'static str,
    /// Card body text
    pub description: &'static str,
    /// Label of the control that runs the step
    pub action: &'static str,
}

/// The wizard steps, in execution order.
pub const STEPS: [Step; 7] = [
    Step {
        id: StepId::Upload,
        name: "Upload Frame",
        title: "Upload Dashcam Footage",
        description: "Provide a still image or an MP4 clip from an in-cab or road-facing camera.",
        action: "Choose File",
    },
    Step {
        id: StepId::Narrative,
        name: "Generate Narrative",
        title: "1. LLM Drafts the Scene Narrative",
        description: "Gemini analyzes the video frame to generate a contextual description of the events, focusing on relevant actions for fleet management.",
        action: "Generate Narrative",
    },
    Step {
        id: StepId::Labels,
        name: "Propose Labels",
        title: "2. LLM Proposes Label Vocabularies",
        description: "Based on the narrative, Gemini proposes a set of relevant labels, categorized for clarity (e.g., Driver Monitoring, Road Environment).",
        action: "Propose Labels",
    },
    Step {
        id: StepId::BoundingBoxes,
        name: "Detect Objects (DINO)",
        title: "3. Grounding DINO Supplies Bounding Boxes",
        description: "A vision model like Grounding-DINO takes the proposed labels and identifies potential matches in the frame, drawing bounding boxes around them.",
        action: "Simulate DINO Detection",
    },
    Step {
        id: StepId::FilterBoxes,
        name: "Filter Boxes (LLM)",
        title: "4. LLM Filters Boxes",
        description: "The LLM uses the original narrative to add context, filtering out irrelevant or low-confidence boxes to improve accuracy.",
        action: "Filter with LLM Context",
    },
    Step {
        id: StepId::Masks,
        name: "Generate Masks (SAM2)",
        title: "5. SAM2 Propagates High-Confidence Masklets",
        description: "For high-confidence objects, a model like SAM2 creates precise, pixel-level masks and tracks them across frames to analyze event duration.",
        action: "Simulate SAM2 Segmentation",
    },
    Step {
        id: StepId::Summary,
        name: "Deploy Model (YOLO)",
        title: "6. Distilled YOLO Runs at the Edge",
        description: "The labeled data trains a compact YOLO model, which is deployed to an in-cab device for real-time alerts without cloud dependency.",
        action: "Start Over",
    },
];
