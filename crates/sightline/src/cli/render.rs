//! Human-readable rendering of step cards and outputs.

use sightline::{SessionView, Step, StepId};
use std::fmt::Write;

/// Heading and body of a step card.
pub fn render_card(step: &Step) -> String {
    format!("\n== {} ==\n{}\n", step.title, step.description)
}

/// The output produced by `step`, as recorded in `view`.
pub fn render_output(step: StepId, view: &SessionView) -> String {
    let mut out = String::new();
    match step {
        StepId::Upload => {
            if let Some(media) = &view.media {
                let _ = writeln!(
                    out,
                    "Uploaded {} ({}, {} bytes)",
                    media.file_name, media.kind, media.bytes
                );
            }
        }
        StepId::Narrative => {
            if let Some(narrative) = &view.narrative {
                let _ = writeln!(out, "\"{}\"", narrative);
            }
        }
        StepId::Labels => {
            if let Some(labels) = &view.labels {
                for (bucket, items) in labels.buckets() {
                    if !items.is_empty() {
                        let _ = writeln!(out, "{}: {}", bucket, items.join(", "));
                    }
                }
            }
        }
        StepId::BoundingBoxes => match view.boxes.as_deref() {
            Some([]) | None => {
                let _ = writeln!(out, "No objects detected.");
            }
            Some(boxes) => {
                for b in boxes {
                    let _ = writeln!(
                        out,
                        "  {:<24} x={:.2} y={:.2} w={:.2} h={:.2}",
                        b.label,
                        b.x(),
                        b.y(),
                        b.width(),
                        b.height()
                    );
                }
            }
        },
        StepId::FilterBoxes => {
            let kept = view.filtered_labels.as_deref().unwrap_or_default();
            if kept.is_empty() {
                let _ = writeln!(out, "Kept: (none)");
            } else {
                let _ = writeln!(out, "Kept: {}", kept.join(", "));
            }
        }
        StepId::Masks => match &view.mask_label {
            Some(label) => {
                let _ = writeln!(out, "Mask target: {}", label);
            }
            None => {
                let _ = writeln!(out, "No boxes to segment.");
            }
        },
        StepId::Summary => {
            let _ = writeln!(out, "Real-Time Analysis Complete");
            for b in view.boxes.as_deref().unwrap_or_default() {
                let mut marks = Vec::new();
                if view
                    .filtered_labels
                    .as_deref()
                    .unwrap_or_default()
                    .contains(&b.label)
                {
                    marks.push("kept");
                }
                if view.mask_label.as_ref() == Some(&b.label) {
                    marks.push("masked");
                }
                if marks.is_empty() {
                    let _ = writeln!(out, "  - {} detected.", b.label);
                } else {
                    let _ = writeln!(out, "  - {} detected. [{}]", b.label, marks.join(", "));
                }
            }
        }
    }
    out
}
