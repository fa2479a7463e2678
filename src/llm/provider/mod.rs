// src/llm/provider/mod.rs
// Inference gateway trait and the backends that implement it
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{Backend, TrackerConfig};

pub mod chat;
pub mod subprocess;
pub mod text_generation;
pub mod timeout;

pub use chat::ChatCompletionGateway;
pub use subprocess::SubprocessGateway;
pub use text_generation::TextGenerationGateway;
pub use timeout::TimeoutGateway;

/// Every way a backend can fail to hand back a completion.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference backend unavailable: {0}")]
    Unavailable(String),

    #[error("inference backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("inference request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("inference process exited with {code}: {stderr}")]
    NonZeroExit { code: String, stderr: String },

    #[error("malformed inference response: {0}")]
    MalformedResponse(String),

    #[error("inference timed out after {0:?}")]
    Timeout(Duration),

    #[error("inference I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text-completion capability the classification pipeline depends on.
///
/// Implementations either return the raw completion or a single typed
/// failure; partial output is never surfaced.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &str) -> Result<String, InferenceError>;
}

/// Build the configured backend, wrapped in the request deadline.
pub fn build_gateway(config: &TrackerConfig) -> Arc<dyn InferenceGateway> {
    let timeout = Duration::from_secs(config.inference_timeout_secs);
    match config.backend {
        Backend::Chat => Arc::new(TimeoutGateway::new(
            ChatCompletionGateway::from_config(config),
            timeout,
        )),
        Backend::Subprocess => Arc::new(TimeoutGateway::new(
            SubprocessGateway::from_config(config),
            timeout,
        )),
        Backend::TextGeneration => Arc::new(TimeoutGateway::new(
            TextGenerationGateway::from_config(config),
            timeout,
        )),
    }
}
