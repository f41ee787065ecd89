//! Layered service configuration.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from sightline.toml)
//! - `~/.config/sightline/sightline.toml`
//! - `./sightline.toml`
//! - `SIGHTLINE_*` environment variables

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use sightline_error::{ConfigError, SightlineError, SightlineResult};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../sightline.toml");

/// Settings for the generative service and frame extraction.
///
/// # Example
///
/// ```no_run
/// use sightline_models::ServiceConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ServiceConfig::load()?;
/// println!("Using model {}", config.model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Generative model identifier
    pub model: String,
    /// Base URL of the generative language REST API
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Simulated latency of each mock-mode call in milliseconds
    pub mock_latency_ms: u64,
    /// Path or name of the ffmpeg binary
    pub ffmpeg_path: String,
    /// Path or name of the ffprobe binary
    pub ffprobe_path: String,
    /// Upper bound on a single decoder invocation in seconds
    pub extraction_timeout_secs: u64,
    /// JPEG quality of extracted frames, 1 to 100
    pub jpeg_quality: u8,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            request_timeout_secs: 120,
            mock_latency_ms: 1000,
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            extraction_timeout_secs: 60,
            jpeg_quality: 90,
        }
    }
}

impl ServiceConfig {
    /// Load configuration with precedence: env > current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is out of range.
    #[instrument]
    pub fn load() -> SightlineResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let home_config = config_dir.join("sightline/sightline.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("sightline").required(false))
            .add_source(Environment::with_prefix("SIGHTLINE").try_parsing(true));

        Self::finish(builder)
    }

    /// Parse the bundled defaults only, ignoring user files and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the bundled file is invalid.
    pub fn bundled() -> SightlineResult<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Parse configuration from a TOML string layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text cannot be parsed or a value is out of range.
    pub fn from_toml_str(toml: &str) -> SightlineResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> SightlineResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                SightlineError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                SightlineError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first offending field.
    pub fn validate(&self) -> SightlineResult<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::new(format!(
                "jpeg_quality must be between 1 and 100, got {}",
                self.jpeg_quality
            ))
            .into());
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::new("request_timeout_secs must be positive").into());
        }
        if self.extraction_timeout_secs == 0 {
            return Err(ConfigError::new("extraction_timeout_secs must be positive").into());
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::new("model must not be empty").into());
        }
        Ok(())
    }

    /// HTTP request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Decoder invocation timeout.
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Simulated mock-mode latency.
    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}
