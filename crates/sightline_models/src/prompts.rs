//! Prompt text and response schemas for the three remote steps.

use serde_json::{Value, json};

/// Narrative step prompt.
pub const NARRATIVE_PROMPT: &str = "Analyze this image from a commercial trucking perspective. Describe the scene in a concise narrative, focusing on driver behavior, surroundings, and potential safety events.";

/// Labels step prompt for a scene narrative.
///
/// # Examples
///
/// ```
/// let prompt = sightline_models::labels_prompt("A truck at dusk.");
/// assert!(prompt.starts_with("Based on the scene narrative: \"A truck at dusk.\""));
/// ```
pub fn labels_prompt(narrative: &str) -> String {
    format!(
        "Based on the scene narrative: \"{}\", propose a vocabulary of labels relevant to trucking. Categorize them into 'driverMonitoring', 'roadEnvironment', and 'logistics'.",
        narrative
    )
}

/// Bounding-box step prompt; labels are embedded as a JSON array.
pub fn boxes_prompt(labels: &[&str]) -> String {
    let labels = serde_json::to_string(labels).unwrap_or_else(|_| "[]".to_string());
    format!(
        "For the following labels, provide bounding box coordinates for each one found in the image. Use normalized coordinates [x, y, width, height]. Labels: {}",
        labels
    )
}

/// Response schema for the labels step: three string arrays.
pub fn labels_schema() -> Value {
    let string_array = json!({"type": "ARRAY", "items": {"type": "STRING"}});
    json!({
        "type": "OBJECT",
        "properties": {
            "driverMonitoring": string_array,
            "roadEnvironment": string_array,
            "logistics": string_array,
        },
    })
}

/// Response schema for the bounding-box step: an array of `{label, box}`.
pub fn boxes_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "label": {"type": "STRING"},
                "box": {"type": "ARRAY", "items": {"type": "NUMBER"}},
            },
        },
    })
}
