//! Generative service drivers and annotation service variants for Sightline.
//!
//! # Services
//!
//! - [`LiveAnnotationService`] - prompts, schemas and parsing over any [`GenerativeDriver`](sightline_interface::GenerativeDriver)
//! - [`MockAnnotationService`] - canned data after a simulated delay
//!
//! [`GeminiClient`] is the REST driver for the live service.
//! [`ServiceSelection`] picks a variant from credential presence.
//!
//! # Example
//!
//! ```no_run
//! use sightline_models::{ServiceConfig, ServiceSelection};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::load()?;
//! let selection = ServiceSelection::from_config(&config)?;
//! if selection.mock_mode() {
//!     println!("Running in mock mode");
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod gemini;
mod live;
mod mock;
mod prompts;
mod selection;

pub use config::ServiceConfig;
pub use gemini::{
    API_KEY_HEADER, Candidate, Content, GeminiClient, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, InlineData, Part,
};
pub use live::{LiveAnnotationService, parse_boxes, parse_labels};
pub use mock::{MOCK_NARRATIVE, MockAnnotationService, mock_boxes, mock_labels};
pub use prompts::{NARRATIVE_PROMPT, boxes_prompt, boxes_schema, labels_prompt, labels_schema};
pub use selection::{API_KEY_VARS, ServiceSelection, api_key_from_env};
