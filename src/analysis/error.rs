// src/analysis/error.rs

use thiserror::Error;

use crate::llm::provider::InferenceError;

/// Reasons the pipeline could not produce a trusted verdict. Each one is
/// folded into a rejecting [`Analysis`](super::Analysis) by the analyzer.
#[derive(Debug, Error)]
pub enum AnalysisFailure {
    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("Invalid response structure from LLM")]
    InvalidStructure { missing: Vec<&'static str> },
}
