// Tests for the Gemini REST client against a local mock HTTP server.

use serde_json::json;
use sightline_core::StillImage;
use sightline_error::{RemoteCallErrorKind, SightlineError, SightlineErrorKind};
use sightline_interface::GenerativeDriver;
use sightline_models::{API_KEY_HEADER, GeminiClient, ServiceConfig};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "SECRET-KEY-123";
const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn client_for(base_url: impl Into<String>) -> GeminiClient {
    let config = ServiceConfig {
        base_url: base_url.into(),
        ..ServiceConfig::default()
    };
    GeminiClient::new(KEY, &config).unwrap()
}

fn remote_kind(err: &SightlineError) -> RemoteCallErrorKind {
    match err.kind() {
        SightlineErrorKind::RemoteCall(e) => e.kind.clone(),
        other => panic!("expected remote call error, got {other}"),
    }
}

fn candidate(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_key_sent_in_header_not_url() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header(API_KEY_HEADER, KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("A cab at dusk.")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(format!("{}/v1beta", server.uri()));
    let image = StillImage::jpeg(vec![0xFF, 0xD8, 0xFF]);
    let text = client.generate_text("Describe.", &image).await?;
    assert_eq!(text, "A cab at dusk.");

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].url.as_str().contains(KEY));

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body)?;
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[0]["inlineData"]["data"], "/9j/");
    assert_eq!(parts[1]["text"], "Describe.");
    assert!(body.get("generationConfig").is_none());
    Ok(())
}

#[tokio::test]
async fn test_structured_call_sends_schema() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(candidate(r#"{"driverMonitoring":[]}"#)),
        )
        .mount(&server)
        .await;

    let client = client_for(format!("{}/v1beta", server.uri()));
    let schema = json!({"type": "OBJECT"});
    let value = client.generate_json("Labels.", None, &schema).await?;
    assert_eq!(value["driverMonitoring"], json!([]));

    let requests = server.received_requests().await.unwrap_or_default();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body)?;
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(body["generationConfig"]["responseSchema"], schema);
    assert_eq!(body["contents"][0]["parts"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = client_for(format!("{}/v1beta", server.uri()));
    let err = client
        .generate_text("Describe.", &StillImage::jpeg(Vec::new()))
        .await
        .unwrap_err();
    assert_eq!(
        remote_kind(&err),
        RemoteCallErrorKind::Http {
            status_code: 503,
            message: "overloaded".to_string(),
        }
    );
}

#[tokio::test]
async fn test_unparseable_body_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(format!("{}/v1beta", server.uri()));
    let err = client
        .generate_text("Describe.", &StillImage::jpeg(Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(
        remote_kind(&err),
        RemoteCallErrorKind::MalformedResponse(_)
    ));
    assert!(!err.user_message().contains(KEY));
}

#[tokio::test]
async fn test_connection_failure_does_not_expose_key() {
    let client = client_for("http://127.0.0.1:9/v1beta");
    let err = client
        .generate_text("Describe.", &StillImage::jpeg(Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(remote_kind(&err), RemoteCallErrorKind::Request(_)));
    assert!(!err.user_message().contains(KEY));
    assert!(!err.to_string().contains(KEY));
}
