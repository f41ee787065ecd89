//! Error types for the Sightline annotation wizard.
//!
//! Every error follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` for automatic location capture
//!
//! The four user-facing families are [`UnsupportedMediaError`],
//! [`ExtractionError`], [`PreconditionError`] and [`RemoteCallError`].
//! [`ConfigError`] covers configuration loading.
//!
//! # Examples
//!
//! ```
//! use sightline_error::{PreconditionError, PreconditionErrorKind, SightlineResult};
//!
//! fn detect_boxes(labels: Option<&[String]>) -> SightlineResult<usize> {
//!     let labels = labels.ok_or(PreconditionError::new(PreconditionErrorKind::MissingLabels))?;
//!     Ok(labels.len())
//! }
//!
//! assert!(detect_boxes(None).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod extraction;
mod precondition;
mod remote;
mod unsupported_media;

pub use config::ConfigError;
pub use error::{SightlineError, SightlineErrorKind, SightlineResult};
pub use extraction::{ExtractionError, ExtractionErrorKind};
pub use precondition::{PreconditionError, PreconditionErrorKind};
pub use remote::{RemoteCallError, RemoteCallErrorKind};
pub use unsupported_media::UnsupportedMediaError;
