// src/analysis/pipeline.rs
// prompt -> gateway -> parse -> validate, folded into one verdict

use std::sync::Arc;
use tracing::{debug, error, info};

use super::error::AnalysisFailure;
use super::parser::{ParseMode, parse_response};
use super::prompt::build_prompt;
use super::types::{Analysis, PageVisit};
use super::validator::validate;
use crate::llm::provider::InferenceGateway;

/// Runs the classification pipeline for one visit at a time.
#[derive(Clone)]
pub struct ContentAnalyzer {
    gateway: Arc<dyn InferenceGateway>,
    parse_mode: ParseMode,
}

impl ContentAnalyzer {
    pub fn new(gateway: Arc<dyn InferenceGateway>, parse_mode: ParseMode) -> Self {
        Self { gateway, parse_mode }
    }

    pub fn gateway(&self) -> &Arc<dyn InferenceGateway> {
        &self.gateway
    }

    /// Classify a visit. Never fails: any failure becomes a rejecting
    /// verdict whose reasoning starts with `Analysis failed:`.
    pub async fn analyze(&self, visit: &PageVisit) -> Analysis {
        match self.try_analyze(visit).await {
            Ok(analysis) => analysis,
            Err(failure) => {
                error!("Analysis of {} failed: {}", visit.url, failure);
                Analysis::failed(failure)
            }
        }
    }

    /// The pipeline with failures left explicit.
    pub async fn try_analyze(&self, visit: &PageVisit) -> Result<Analysis, AnalysisFailure> {
        let prompt = build_prompt(visit);
        let raw = self.gateway.complete(&prompt).await?;
        debug!("Raw model output from {}:\n{}", self.gateway.name(), raw);

        let object = parse_response(&raw, self.parse_mode);
        let analysis = validate(&object)?;

        info!(
            "Verdict for {}: should_add={} type={}",
            visit.url, analysis.should_add, analysis.content_type
        );
        Ok(analysis)
    }
}
