//! Sightline - guided computer-vision annotation for fleet safety footage.
//!
//! Sightline walks one uploaded image or video through a fixed sequence of
//! annotation steps: a scene narrative, proposed label vocabularies, bounding
//! boxes, a driver-monitoring filter, a mask selection and a deployment
//! summary. The narrative, label and box steps call Google Gemini; without an
//! API key a canned mock service stands in.
//!
//! # Quick Start
//!
//! ```no_run
//! use sightline::{
//!     FfmpegDecoder, FrameExtractor, MediaUpload, ServiceConfig, ServiceSelection, WizardSession,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServiceConfig::load()?;
//!     let selection = ServiceSelection::from_config(&config)?;
//!     let decoder = FfmpegDecoder::new(
//!         &config.ffmpeg_path,
//!         &config.ffprobe_path,
//!         config.extraction_timeout(),
//!     );
//!     let extractor = FrameExtractor::new(Arc::new(decoder));
//!
//!     let mut session = WizardSession::new(selection.service(), selection.mock_mode());
//!     let upload = MediaUpload::builder()
//!         .file_name("cab.mp4")
//!         .mime("video/mp4")
//!         .bytes(std::fs::read("cab.mp4")?)
//!         .build()?;
//!     session.upload(upload, &extractor).await?;
//!
//!     while !session.state().is_complete() {
//!         session.advance().await?;
//!     }
//!     println!("{}", serde_json::to_string_pretty(&session.view())?);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Sightline is organized as a workspace with focused crates:
//!
//! - `sightline_error` - Error types
//! - `sightline_core` - Step table, annotation outputs, media types
//! - `sightline_interface` - `GenerativeDriver`, `AnnotationService` and `VideoDecoder` traits
//! - `sightline_models` - Gemini driver, live and mock services, configuration
//! - `sightline_media` - Upload gate and frame extraction
//! - `sightline_pipeline` - Step sequencer and wizard session
//!
//! This crate (`sightline`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use sightline_core::{
    BoundingBox, LabelCategories, MaskSelection, MediaKind, MediaUpload, MediaUploadBuilder,
    STEPS, Step, StepId, StillImage, init_tracing,
};
pub use sightline_error::{
    ConfigError, ExtractionError, ExtractionErrorKind, PreconditionError, PreconditionErrorKind,
    RemoteCallError, RemoteCallErrorKind, SightlineError, SightlineErrorKind, SightlineResult,
    UnsupportedMediaError,
};
pub use sightline_interface::{
    AnnotationService, GenerativeDriver, RawFrame, VideoDecoder, VideoProbe,
};
pub use sightline_media::{
    DEFAULT_JPEG_QUALITY, FfmpegDecoder, FrameExtractor, MAX_SEEK_SECS, UploadGate,
    mime_for_path, seek_position,
};
pub use sightline_models::{
    API_KEY_VARS, GeminiClient, LiveAnnotationService, MOCK_NARRATIVE, MockAnnotationService,
    NARRATIVE_PROMPT, ServiceConfig, ServiceSelection, api_key_from_env, boxes_prompt,
    boxes_schema, labels_prompt, labels_schema, mock_boxes, mock_labels,
};
pub use sightline_pipeline::{
    ExtractionOutcome, MediaSummary, PendingExtraction, SessionState, SessionView, StepSequencer,
    StepStatus, StepView, WizardSession, filter_driver_monitoring, select_mask_label,
};
