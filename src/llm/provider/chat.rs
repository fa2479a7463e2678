// src/llm/provider/chat.rs
// OpenAI-compatible chat completions (llama.cpp server, vLLM, hosted APIs)

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Instant;
use tracing::debug;

use super::{InferenceError, InferenceGateway};
use crate::analysis::ContentType;
use crate::config::TrackerConfig;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that only responds in strict JSON format.";

pub struct ChatCompletionGateway {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: usize,
}

impl ChatCompletionGateway {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: None,
            model: model.into(),
            temperature: 0.7,
            max_tokens: 1024,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self {
            api_key: config.inference_api_key.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            ..Self::new(config.inference_url.clone(), config.model.clone())
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn request_body(&self, prompt: &str) -> Value {
        let type_enum: Vec<&str> = ContentType::PUBLISHED.iter().map(|t| t.as_str()).collect();

        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ],
            "response_format": {
                "type": "json_object",
                "schema": {
                    "type": "object",
                    "properties": {
                        "should_add": { "type": "boolean" },
                        "type": { "type": "string", "enum": type_enum },
                        "clean_title": { "type": ["string", "null"] },
                        "reasoning": { "type": "string" }
                    },
                    "required": ["should_add", "type", "clean_title", "reasoning"]
                }
            },
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        })
    }
}

#[async_trait]
impl InferenceGateway for ChatCompletionGateway {
    fn name(&self) -> &'static str {
        "chat"
    }

    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let start = Instant::now();
        debug!("Chat completion request: model={} url={}", self.model, self.endpoint());

        let mut request = self.client.post(self.endpoint()).json(&self.request_body(prompt));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                InferenceError::Unavailable(format!("{}: {e}", self.base_url))
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
        let content = raw_response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| InferenceError::MalformedResponse("no message content in choices[0]".to_string()))?
            .to_string();

        debug!(
            "Chat completion finished in {}ms ({} chars)",
            start.elapsed().as_millis(),
            content.len()
        );
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_carries_schema_and_sampling() {
        let gateway = ChatCompletionGateway::new("http://127.0.0.1:8080/", "gemma-3-1b-it");
        let body = gateway.request_body("classify me");

        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(body["messages"][1]["content"], "classify me");
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(
            body["response_format"]["schema"]["properties"]["type"]["enum"],
            json!(["article", "blog", "video", "other", "none"])
        );
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(gateway.endpoint(), "http://127.0.0.1:8080/v1/chat/completions");
    }
}
