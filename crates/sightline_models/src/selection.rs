//! Choosing between the live and mock annotation services.

use crate::{GeminiClient, LiveAnnotationService, MockAnnotationService, ServiceConfig};
use sightline_error::SightlineResult;
use sightline_interface::AnnotationService;
use std::sync::Arc;
use tracing::{info, warn};

/// Environment variables checked for the credential, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Read the service credential from the environment.
///
/// Empty values are treated as unset.
pub fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
}

/// The annotation service chosen for a session.
#[derive(Clone)]
pub struct ServiceSelection {
    service: Arc<dyn AnnotationService>,
    mock_mode: bool,
}

impl std::fmt::Debug for ServiceSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceSelection")
            .field("mock_mode", &self.mock_mode)
            .finish_non_exhaustive()
    }
}

impl ServiceSelection {
    /// Pick the live service when a credential is present, otherwise fall back to mock mode.
    ///
    /// # Errors
    ///
    /// Returns `RemoteCallError` if the HTTP client cannot be built.
    pub fn from_config(config: &ServiceConfig) -> SightlineResult<Self> {
        Self::with_api_key(api_key_from_env(), config)
    }

    /// Like [`from_config`](Self::from_config) with an explicit credential.
    ///
    /// # Errors
    ///
    /// Returns `RemoteCallError` if the HTTP client cannot be built.
    pub fn with_api_key(api_key: Option<String>, config: &ServiceConfig) -> SightlineResult<Self> {
        match api_key {
            Some(key) => {
                let client = GeminiClient::new(key, config)?;
                info!(model = %config.model, "Using live Gemini annotation service");
                Ok(Self {
                    service: Arc::new(LiveAnnotationService::new(client)),
                    mock_mode: false,
                })
            }
            None => {
                warn!("No API key found. Running in mock mode with simulated data.");
                Ok(Self::mock(config))
            }
        }
    }

    /// Force mock mode.
    pub fn mock(config: &ServiceConfig) -> Self {
        Self {
            service: Arc::new(MockAnnotationService::new(config.mock_latency())),
            mock_mode: true,
        }
    }

    /// The selected service.
    pub fn service(&self) -> Arc<dyn AnnotationService> {
        Arc::clone(&self.service)
    }

    /// True when running without the external service.
    pub fn mock_mode(&self) -> bool {
        self.mock_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_selects_mock() {
        let selection = ServiceSelection::with_api_key(None, &ServiceConfig::default()).unwrap();
        assert!(selection.mock_mode());
        assert!(selection.service().is_mock());
    }

    #[test]
    fn test_key_selects_live() {
        let selection =
            ServiceSelection::with_api_key(Some("k".to_string()), &ServiceConfig::default())
                .unwrap();
        assert!(!selection.mock_mode());
        assert!(!selection.service().is_mock());
    }
}
