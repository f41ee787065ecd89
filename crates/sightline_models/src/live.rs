//! Annotation service backed by a generative driver.

use crate::prompts::{NARRATIVE_PROMPT, boxes_prompt, boxes_schema, labels_prompt, labels_schema};
use async_trait::async_trait;
use serde::Deserialize;
use sightline_core::{BoundingBox, LabelCategories, StillImage};
use sightline_error::{RemoteCallError, RemoteCallErrorKind, SightlineResult};
use sightline_interface::{AnnotationService, GenerativeDriver};
use tracing::{debug, instrument, warn};

/// Builds prompts, declares response schemas and parses responses for the
/// narrative, labels and bounding-box steps.
#[derive(Debug, Clone)]
pub struct LiveAnnotationService<D> {
    driver: D,
}

impl<D: GenerativeDriver> LiveAnnotationService<D> {
    /// Wrap a driver.
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// The wrapped driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

#[derive(Debug, Deserialize)]
struct WireBox {
    label: String,
    #[serde(rename = "box")]
    bbox: Vec<f64>,
}

fn malformed(message: String) -> sightline_error::SightlineError {
    RemoteCallError::new(RemoteCallErrorKind::MalformedResponse(message)).into()
}

/// Decode the labels step response.
pub fn parse_labels(value: serde_json::Value) -> SightlineResult<LabelCategories> {
    if !value.is_object() {
        return Err(malformed(format!("expected label object, got {}", value)));
    }
    serde_json::from_value(value).map_err(|e| malformed(format!("invalid labels: {}", e)))
}

/// Decode the bounding-box step response.
///
/// Every entry must carry exactly four finite numbers. Components outside
/// `[0, 1]` are clamped.
pub fn parse_boxes(value: serde_json::Value) -> SightlineResult<Vec<BoundingBox>> {
    let wire: Vec<WireBox> =
        serde_json::from_value(value).map_err(|e| malformed(format!("invalid boxes: {}", e)))?;

    wire.into_iter()
        .map(|b| {
            let bbox: [f64; 4] = b.bbox.as_slice().try_into().map_err(|_| {
                malformed(format!(
                    "box for '{}' has {} components, expected 4",
                    b.label,
                    b.bbox.len()
                ))
            })?;
            if bbox.iter().any(|v| !v.is_finite()) {
                return Err(malformed(format!("box for '{}' is not finite", b.label)));
            }
            let parsed = BoundingBox::new(b.label, bbox);
            if !parsed.is_normalized() {
                warn!(label = %parsed.label, bbox = ?parsed.bbox, "Clamping box into unit range");
            }
            Ok(parsed.clamped())
        })
        .collect()
}

#[async_trait]
impl<D: GenerativeDriver> AnnotationService for LiveAnnotationService<D> {
    #[instrument(skip_all, fields(model = %self.driver.model_name()))]
    async fn generate_narrative(&self, image: &StillImage) -> SightlineResult<String> {
        let narrative = self.driver.generate_text(NARRATIVE_PROMPT, image).await?;
        let narrative = narrative.trim();
        if narrative.is_empty() {
            return Err(RemoteCallError::new(RemoteCallErrorKind::EmptyResponse).into());
        }
        debug!(chars = narrative.len(), "Narrative generated");
        Ok(narrative.to_string())
    }

    #[instrument(skip_all, fields(model = %self.driver.model_name()))]
    async fn propose_labels(&self, narrative: &str) -> SightlineResult<LabelCategories> {
        let value = self
            .driver
            .generate_json(&labels_prompt(narrative), None, &labels_schema())
            .await?;
        let labels = parse_labels(value)?;
        debug!(count = labels.all_labels().len(), "Labels proposed");
        Ok(labels)
    }

    #[instrument(skip_all, fields(model = %self.driver.model_name(), labels = labels.len()))]
    async fn generate_boxes(
        &self,
        labels: &[&str],
        image: &StillImage,
    ) -> SightlineResult<Vec<BoundingBox>> {
        let value = self
            .driver
            .generate_json(&boxes_prompt(labels), Some(image), &boxes_schema())
            .await?;
        let boxes = parse_boxes(value)?;
        debug!(count = boxes.len(), "Boxes generated");
        Ok(boxes)
    }

    fn is_mock(&self) -> bool {
        false
    }
}
