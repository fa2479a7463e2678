// src/llm/provider/timeout.rs
// Deadline around any gateway call

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

use super::{InferenceError, InferenceGateway};

pub struct TimeoutGateway<G> {
    inner: G,
    timeout: Duration,
}

impl<G: InferenceGateway> TimeoutGateway<G> {
    pub fn new(inner: G, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<G: InferenceGateway> InferenceGateway for TimeoutGateway<G> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        match tokio::time::timeout(self.timeout, self.inner.complete(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("{} call exceeded {:?}", self.inner.name(), self.timeout);
                Err(InferenceError::Timeout(self.timeout))
            }
        }
    }
}
