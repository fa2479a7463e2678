// src/state.rs
// Shared handler state: one analyzer, one store, for the process lifetime

use std::sync::Arc;

use crate::analysis::{ContentAnalyzer, ParseMode};
use crate::config::TrackerConfig;
use crate::llm::provider::{InferenceGateway, build_gateway};
use crate::visits::{InMemoryVisitStore, VisitStore};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: ContentAnalyzer,
    pub store: Arc<dyn VisitStore>,
}

impl AppState {
    pub fn new(
        gateway: Arc<dyn InferenceGateway>,
        parse_mode: ParseMode,
        store: Arc<dyn VisitStore>,
    ) -> Self {
        Self {
            analyzer: ContentAnalyzer::new(gateway, parse_mode),
            store,
        }
    }

    /// Gateway from config with an empty in-memory store.
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(
            build_gateway(config),
            config.parse_mode(),
            Arc::new(InMemoryVisitStore::new()),
        )
    }

    pub fn gateway(&self) -> &Arc<dyn InferenceGateway> {
        self.analyzer.gateway()
    }
}
