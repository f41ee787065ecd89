//! Gemini REST client.

use super::dto::{GenerateContentRequest, GenerateContentResponse};
use crate::ServiceConfig;
use async_trait::async_trait;
use reqwest::Client;
use sightline_core::StillImage;
use sightline_error::{RemoteCallError, RemoteCallErrorKind, SightlineResult};
use sightline_interface::GenerativeDriver;
use tracing::{debug, instrument};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` endpoint.
///
/// Makes exactly one attempt per call. A non-success status, a response
/// without candidate text, or JSON output that does not parse is a
/// `RemoteCallError`. The key travels in the `x-goog-api-key` header and
/// never appears in request URLs or error messages.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client using the model, base URL and timeout from `config`.
    ///
    /// # Errors
    ///
    /// Returns `RemoteCallError` if the key is empty or the HTTP client cannot
    /// be initialized.
    #[instrument(skip_all, fields(model = %config.model))]
    pub fn new(api_key: impl Into<String>, config: &ServiceConfig) -> SightlineResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(RemoteCallError::new(RemoteCallErrorKind::MissingApiKey).into());
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                RemoteCallError::new(RemoteCallErrorKind::ClientCreation(e.to_string()))
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Endpoint URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> SightlineResult<GenerateContentResponse> {
        let url = self.endpoint();
        debug!(url = %url, "Sending Gemini API request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                RemoteCallError::new(RemoteCallErrorKind::Request(e.without_url().to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or_default().to_string());
            return Err(RemoteCallError::new(RemoteCallErrorKind::Http {
                status_code: status.as_u16(),
                message,
            })
            .into());
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            RemoteCallError::new(RemoteCallErrorKind::MalformedResponse(format!(
                "Failed to parse response: {}",
                e.without_url()
            )))
        })?;
        debug!(candidates = body.candidates.len(), "Received Gemini response");
        Ok(body)
    }
}

/// Extract the first candidate's text.
pub(crate) fn candidate_text(response: &GenerateContentResponse) -> SightlineResult<String> {
    response
        .text()
        .ok_or_else(|| RemoteCallError::new(RemoteCallErrorKind::EmptyResponse).into())
}

/// Parse a structured-output candidate as JSON.
pub(crate) fn parse_json_text(text: &str) -> SightlineResult<serde_json::Value> {
    serde_json::from_str(text.trim()).map_err(|e| {
        RemoteCallError::new(RemoteCallErrorKind::MalformedResponse(format!(
            "Response is not valid JSON: {}",
            e
        )))
        .into()
    })
}

#[async_trait]
impl GenerativeDriver for GeminiClient {
    #[instrument(
        skip(self, prompt, image),
        fields(prompt_len = prompt.len(), image_bytes = image.bytes().len())
    )]
    async fn generate_text(&self, prompt: &str, image: &StillImage) -> SightlineResult<String> {
        let request = GenerateContentRequest::single_turn(prompt, Some(image));
        let response = self.generate_content(&request).await?;
        candidate_text(&response)
    }

    #[instrument(
        skip(self, prompt, image, schema),
        fields(prompt_len = prompt.len(), with_image = image.is_some())
    )]
    async fn generate_json(
        &self,
        prompt: &str,
        image: Option<&StillImage>,
        schema: &serde_json::Value,
    ) -> SightlineResult<serde_json::Value> {
        let request =
            GenerateContentRequest::single_turn(prompt, image).with_json_schema(schema.clone());
        let response = self.generate_content(&request).await?;
        parse_json_text(&candidate_text(&response)?)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
