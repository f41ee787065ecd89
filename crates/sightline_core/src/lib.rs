//! Core data types for the Sightline annotation wizard.
//!
//! This crate provides the foundation data types shared by every Sightline crate:
//! the fixed step table, annotation outputs, and uploaded media references.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod annotation;
mod media;
mod step;
mod telemetry;

pub use annotation::{BoundingBox, LabelCategories, MaskSelection};
pub use media::{MediaKind, MediaUpload, MediaUploadBuilder, StillImage};
pub use step::{STEPS, Step, StepId};
pub use telemetry::init_tracing;
