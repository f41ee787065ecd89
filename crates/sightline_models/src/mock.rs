//! Canned annotation service used when no credential is configured.

use async_trait::async_trait;
use sightline_core::{BoundingBox, LabelCategories, StillImage};
use sightline_error::SightlineResult;
use sightline_interface::AnnotationService;
use std::time::Duration;
use tracing::{debug, instrument};

/// Narrative returned in mock mode.
pub const MOCK_NARRATIVE: &str = "A driver is operating a commercial truck, looking at their mobile phone while driving on a highway. The seatbelt appears to be fastened.";

/// Labels returned in mock mode.
pub fn mock_labels() -> LabelCategories {
    let owned = |labels: &[&str]| -> Vec<String> { labels.iter().map(|l| l.to_string()).collect() };
    LabelCategories {
        driver_monitoring: owned(&[
            "cell phone use",
            "hands on wheel",
            "eyes on road",
            "drowsiness",
            "seatbelt fastened",
        ]),
        road_environment: owned(&["car", "truck", "lane markings"]),
        logistics: Vec::new(),
    }
}

/// Boxes returned in mock mode, regardless of the labels asked for.
pub fn mock_boxes() -> Vec<BoundingBox> {
    vec![
        BoundingBox::new("cell phone use", [0.45, 0.55, 0.15, 0.2]),
        BoundingBox::new("seatbelt fastened", [0.5, 0.4, 0.25, 0.5]),
        BoundingBox::new("hands on wheel", [0.3, 0.7, 0.3, 0.25]),
    ]
}

/// Returns canned outputs after a simulated delay, without touching the network.
///
/// # Examples
///
/// ```
/// use sightline_models::MockAnnotationService;
/// use sightline_interface::AnnotationService;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let service = MockAnnotationService::new(Duration::ZERO);
/// let labels = service.propose_labels("anything").await?;
/// assert_eq!(labels.driver_monitoring[0], "cell phone use");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockAnnotationService {
    latency: Duration,
}

impl MockAnnotationService {
    /// Create a mock with the given per-call latency.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Per-call latency.
    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn simulate(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl AnnotationService for MockAnnotationService {
    #[instrument(skip_all)]
    async fn generate_narrative(&self, _image: &StillImage) -> SightlineResult<String> {
        self.simulate().await;
        debug!("Returning mock narrative");
        Ok(MOCK_NARRATIVE.to_string())
    }

    #[instrument(skip_all)]
    async fn propose_labels(&self, _narrative: &str) -> SightlineResult<LabelCategories> {
        self.simulate().await;
        debug!("Returning mock labels");
        Ok(mock_labels())
    }

    #[instrument(skip_all)]
    async fn generate_boxes(
        &self,
        _labels: &[&str],
        _image: &StillImage,
    ) -> SightlineResult<Vec<BoundingBox>> {
        self.simulate().await;
        debug!("Returning mock boxes");
        Ok(mock_boxes())
    }

    fn is_mock(&self) -> bool {
        true
    }
}
