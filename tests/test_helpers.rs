// tests/test_helpers.rs
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use content_tracker::analysis::ParseMode;
use content_tracker::api::http_router;
use content_tracker::llm::provider::{InferenceError, InferenceGateway};
use content_tracker::state::AppState;
use content_tracker::visits::{InMemoryVisitStore, VisitStore};

/// Gateway that replays canned completions in order, repeating the last one.
pub struct ScriptedGateway {
    replies: Mutex<Vec<Result<String, String>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn replying(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(vec![Err(reason.to_string())]),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl InferenceGateway for ScriptedGateway {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        self.prompts.lock().push(prompt.to_string());
        let mut replies = self.replies.lock();
        let reply = if replies.len() > 1 {
            replies.remove(0)
        } else {
            replies[0].clone()
        };
        reply.map_err(InferenceError::Unavailable)
    }
}

pub fn accepting(kind: &str, title: &str) -> String {
    serde_json::json!({
        "should_add": true,
        "type": kind,
        "clean_title": title,
        "reasoning": format!("specific {kind}"),
    })
    .to_string()
}

pub const REJECTING: &str =
    r#"{"should_add": false, "type": "none", "clean_title": null, "reasoning": "ok, just not content"}"#;

/// Router over a fresh store, returned alongside the store for inspection.
pub fn create_test_app(gateway: Arc<ScriptedGateway>) -> (axum::Router, Arc<InMemoryVisitStore>) {
    let store = Arc::new(InMemoryVisitStore::new());
    let state = AppState::new(gateway, ParseMode::Lenient, store.clone() as Arc<dyn VisitStore>);
    (http_router(state), store)
}

pub async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
