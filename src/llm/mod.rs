// src/llm/mod.rs
// Inference backends behind a single completion capability

pub mod provider;

pub use provider::{InferenceError, InferenceGateway, build_gateway};
