// src/llm/provider/subprocess.rs
// Runs a separate inference binary once per prompt

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error};

use super::{InferenceError, InferenceGateway};
use crate::config::TrackerConfig;

/// Invokes `program args... <prompt>` and returns its stdout.
pub struct SubprocessGateway {
    program: String,
    args: Vec<String>,
}

impl SubprocessGateway {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.inference_command.clone(), config.inference_args.clone())
    }
}

#[async_trait]
impl InferenceGateway for SubprocessGateway {
    fn name(&self) -> &'static str {
        "subprocess"
    }

    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        debug!("Spawning {} with {} args", self.program, self.args.len() + 1);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(prompt)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    InferenceError::Unavailable(format!("{} not found", self.program))
                }
                _ => InferenceError::Io(e),
            })?;

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("{} exited with {}: {}", self.program, code, stderr);
            return Err(InferenceError::NonZeroExit { code, stderr });
        }

        String::from_utf8(output.stdout)
            .map(|text| text.trim().to_string())
            .map_err(|e| InferenceError::MalformedResponse(format!("stdout is not UTF-8: {e}")))
    }
}
