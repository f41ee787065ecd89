//! Generative service traits.

use async_trait::async_trait;
use sightline_core::{BoundingBox, LabelCategories, StillImage};
use sightline_error::SightlineResult;
use std::sync::Arc;

/// An external text/vision generation capability.
///
/// Implementations make exactly one attempt per call. Failures and responses
/// that cannot be read are reported as `RemoteCallError`.
#[async_trait]
pub trait GenerativeDriver: Send + Sync {
    /// Free-form prompt plus image, answered with free text.
    async fn generate_text(&self, prompt: &str, image: &StillImage) -> SightlineResult<String>;

    /// Free-form prompt, optionally with an image, answered with JSON
    /// conforming to `schema`.
    async fn generate_json(
        &self,
        prompt: &str,
        image: Option<&StillImage>,
        schema: &serde_json::Value,
    ) -> SightlineResult<serde_json::Value>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-flash").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D: GenerativeDriver + ?Sized> GenerativeDriver for Arc<D> {
    async fn generate_text(&self, prompt: &str, image: &StillImage) -> SightlineResult<String> {
        (**self).generate_text(prompt, image).await
    }

    async fn generate_json(
        &self,
        prompt: &str,
        image: Option<&StillImage>,
        schema: &serde_json::Value,
    ) -> SightlineResult<serde_json::Value> {
        (**self).generate_json(prompt, image, schema).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// The annotation capability the step sequencer depends on.
///
/// There are two variants: one backed by a [`GenerativeDriver`] and one
/// returning canned data without touching the network.
#[async_trait]
pub trait AnnotationService: Send + Sync {
    /// Describe the scene in the analysis image.
    async fn generate_narrative(&self, image: &StillImage) -> SightlineResult<String>;

    /// Propose categorized labels from a scene narrative.
    async fn propose_labels(&self, narrative: &str) -> SightlineResult<LabelCategories>;

    /// Locate each label in the analysis image.
    async fn generate_boxes(
        &self,
        labels: &[&str],
        image: &StillImage,
    ) -> SightlineResult<Vec<BoundingBox>>;

    /// True for the canned, no-network variant.
    fn is_mock(&self) -> bool;
}
