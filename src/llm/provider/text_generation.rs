// src/llm/provider/text_generation.rs
// Generic text-generation endpoint: prompt in, generated_text out

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use super::{InferenceError, InferenceGateway};
use crate::config::TrackerConfig;

pub struct TextGenerationGateway {
    client: Client,
    url: String,
    api_key: Option<String>,
    temperature: f32,
    max_new_tokens: usize,
}

impl TextGenerationGateway {
    pub fn new(url: impl Into<String>, max_new_tokens: usize) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            api_key: None,
            temperature: 0.7,
            max_new_tokens,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self {
            api_key: config.inference_api_key.clone(),
            temperature: config.temperature,
            ..Self::new(config.inference_url.clone(), config.max_tokens)
        }
    }
}

/// Accepts both `[{"generated_text": ..}]` and `{"generated_text": ..}`.
fn extract_generated_text(body: &Value) -> Option<&str> {
    match body {
        Value::Array(items) => items.first()?.get("generated_text")?.as_str(),
        Value::Object(_) => body.get("generated_text")?.as_str(),
        _ => None,
    }
}

#[async_trait]
impl InferenceGateway for TextGenerationGateway {
    fn name(&self) -> &'static str {
        "text-generation"
    }

    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let body = json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": self.max_new_tokens,
                "temperature": self.temperature,
                "return_full_text": false
            }
        });

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                InferenceError::Unavailable(format!("{}: {e}", self.url))
            } else {
                InferenceError::Transport(e)
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Status { status, body });
        }

        let raw_response = response.json::<Value>().await?;
        let text = extract_generated_text(&raw_response)
            .ok_or_else(|| InferenceError::MalformedResponse("no generated_text in response".to_string()))?;

        debug!("Text generation returned {} chars", text.len());
        Ok(text.to_string())
    }
}
