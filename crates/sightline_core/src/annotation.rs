//! Annotation outputs produced by the wizard steps.

use serde::{Deserialize, Serialize};

/// Proposed label vocabularies, grouped into three buckets.
///
/// Buckets are ordered lists of free-text labels. The same label may appear
/// in more than one bucket.
///
/// # Examples
///
/// ```
/// use sightline_core::LabelCategories;
///
/// let labels: LabelCategories = serde_json::from_str(
///     r#"{"driverMonitoring":["cell phone use"],"roadEnvironment":["truck"],"logistics":[]}"#,
/// ).unwrap();
/// assert_eq!(labels.all_labels(), vec!["cell phone use", "truck"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCategories {
    /// Driver behaviour labels
    #[serde(default)]
    pub driver_monitoring: Vec<String>,
    /// Road and traffic labels
    #[serde(default)]
    pub road_environment: Vec<String>,
    /// Cargo and logistics labels
    #[serde(default)]
    pub logistics: Vec<String>,
}

impl LabelCategories {
    /// All labels flattened in bucket order: driver monitoring, road environment, logistics.
    pub fn all_labels(&self) -> Vec<&str> {
        self.driver_monitoring
            .iter()
            .chain(&self.road_environment)
            .chain(&self.logistics)
            .map(String::as_str)
            .collect()
    }

    /// Bucket name and contents, in display order.
    pub fn buckets(&self) -> [(&'static str, &[String]); 3] {
        [
            ("Driver Monitoring", self.driver_monitoring.as_slice()),
            ("Road Environment", self.road_environment.as_slice()),
            ("Logistics", self.logistics.as_slice()),
        ]
    }
}

/// A label located in the analysis image.
///
/// The box is `[x, y, width, height]`, each component normalized to `[0, 1]`
/// relative to the image dimensions.
///
/// # Examples
///
/// ```
/// use sightline_core::BoundingBox;
///
/// let b = BoundingBox::new("cell phone use", [0.45, 0.55, 0.15, 0.2]);
/// assert_eq!(b.width(), 0.15);
/// assert_eq!(serde_json::to_value(&b).unwrap()["box"][1], 0.55);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Label this box was detected for
    pub label: String,
    /// Normalized `[x, y, width, height]`
    #[serde(rename = "box")]
    pub bbox: [f64; 4],
}

impl BoundingBox {
    /// Create a box for `label`.
    pub fn new(label: impl Into<String>, bbox: [f64; 4]) -> Self {
        Self {
            label: label.into(),
            bbox,
        }
    }

    /// Left edge.
    pub fn x(&self) -> f64 {
        self.bbox[0]
    }

    /// Top edge.
    pub fn y(&self) -> f64 {
        self.bbox[1]
    }

    /// Width.
    pub fn width(&self) -> f64 {
        self.bbox[2]
    }

    /// Height.
    pub fn height(&self) -> f64 {
        self.bbox[3]
    }

    /// Copy with every component clamped into `[0, 1]`.
    pub fn clamped(mut self) -> Self {
        for v in &mut self.bbox {
            *v = v.clamp(0.0, 1.0);
        }
        self
    }

    /// True when every component is finite and inside `[0, 1]`.
    pub fn is_normalized(&self) -> bool {
        self.bbox
            .iter()
            .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
    }
}

/// Outcome of the masking step.
///
/// `label` is `None` when no boxes were detected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaskSelection {
    /// The label chosen for segmentation
    pub label: Option<String>,
}
