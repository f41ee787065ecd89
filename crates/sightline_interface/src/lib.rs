//! Trait definitions for the Sightline annotation wizard.
//!
//! Three seams keep the wizard testable without network or codecs:
//! - [`GenerativeDriver`] - the two call shapes of an external text/vision model
//! - [`AnnotationService`] - the narrative, label and box capability injected into the sequencer
//! - [`VideoDecoder`] - probing and single-frame decoding for frame extraction

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod traits;

pub use decoder::{RawFrame, VideoDecoder, VideoProbe};
pub use traits::{AnnotationService, GenerativeDriver};
