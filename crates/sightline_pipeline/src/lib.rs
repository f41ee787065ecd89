//! Wizard state machine for the Sightline annotation pipeline.
//!
//! - [`SessionState`] holds every step output and the current step index
//! - [`StepSequencer`] runs one step against a state and returns the next state
//! - [`WizardSession`] owns a state and adds uploads, frame extraction
//!   bookkeeping, restart and a read-only [`SessionView`]
//!
//! # Example
//!
//! ```
//! use sightline_core::{MediaUpload, StepId};
//! use sightline_models::MockAnnotationService;
//! use sightline_pipeline::WizardSession;
//! use std::{sync::Arc, time::Duration};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = Arc::new(MockAnnotationService::new(Duration::ZERO));
//! let mut session = WizardSession::new(service, true);
//! let upload = MediaUpload::builder()
//!     .file_name("cab.jpg")
//!     .mime("image/jpeg")
//!     .bytes(vec![0xFF, 0xD8, 0xFF, 0xD9])
//!     .build()?;
//! session.begin_upload(upload)?;
//! session.advance().await?;
//! assert_eq!(session.state().current_step().id, StepId::Labels);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod sequencer;
mod session;
mod state;
mod view;

pub use sequencer::{StepSequencer, filter_driver_monitoring, select_mask_label};
pub use session::{ExtractionOutcome, PendingExtraction, WizardSession};
pub use state::SessionState;
pub use view::{MediaSummary, SessionView, StepStatus, StepView};
