//! Test utilities for service tests.

use async_trait::async_trait;
use sightline_core::StillImage;
use sightline_error::{RemoteCallError, RemoteCallErrorKind, SightlineResult};
use sightline_interface::GenerativeDriver;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One recorded driver call.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedCall {
    pub prompt: String,
    pub with_image: bool,
    pub schema: Option<serde_json::Value>,
}

/// Scripted reply for the next call.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Reply {
    Text(String),
    Json(serde_json::Value),
    Fail(RemoteCallErrorKind),
}

/// Driver that answers from a queue and records every call.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[allow(dead_code)]
impl ScriptedDriver {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, call: RecordedCall) -> Reply {
        self.calls.lock().unwrap().push(call);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Reply::Fail(RemoteCallErrorKind::EmptyResponse))
    }
}

#[async_trait]
impl GenerativeDriver for ScriptedDriver {
    async fn generate_text(&self, prompt: &str, _image: &StillImage) -> SightlineResult<String> {
        match self.next(RecordedCall {
            prompt: prompt.to_string(),
            with_image: true,
            schema: None,
        }) {
            Reply::Text(text) => Ok(text),
            Reply::Json(value) => Ok(value.to_string()),
            Reply::Fail(kind) => Err(RemoteCallError::new(kind).into()),
        }
    }

    async fn generate_json(
        &self,
        prompt: &str,
        image: Option<&StillImage>,
        schema: &serde_json::Value,
    ) -> SightlineResult<serde_json::Value> {
        match self.next(RecordedCall {
            prompt: prompt.to_string(),
            with_image: image.is_some(),
            schema: Some(schema.clone()),
        }) {
            Reply::Json(value) => Ok(value),
            Reply::Text(text) => serde_json::from_str(&text).map_err(|e| {
                RemoteCallError::new(RemoteCallErrorKind::MalformedResponse(e.to_string())).into()
            }),
            Reply::Fail(kind) => Err(RemoteCallError::new(kind).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// A tiny stand-in analysis image.
#[allow(dead_code)]
pub fn still() -> StillImage {
    StillImage::jpeg(vec![0xFF, 0xD8, 0xFF, 0xD9])
}
