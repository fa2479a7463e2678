// src/visits/store.rs
// Append-only visit log shared by request handlers

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::stats::VisitStats;
use crate::analysis::{Analysis, PageVisit};

/// A visit together with the verdict that caused it to be kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredVisit {
    #[serde(flatten)]
    pub visit: PageVisit,
    pub analysis: Analysis,
}

/// Storage for accepted visits and failed analyses awaiting review.
pub trait VisitStore: Send + Sync {
    /// Append the visit if the verdict calls for it. Returns whether it was stored.
    fn record(&self, visit: PageVisit, analysis: Analysis) -> bool;

    /// Every stored visit in insertion order.
    fn list_all(&self) -> Vec<StoredVisit>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> VisitStats;
}

/// Kept when the model accepted the page, or when the pipeline failed and
/// a human should look at it.
pub fn should_retain(analysis: &Analysis) -> bool {
    analysis.should_add || analysis.is_failure()
}

/// Process-lifetime store. Readers see whole records only.
#[derive(Default)]
pub struct InMemoryVisitStore {
    visits: RwLock<Vec<StoredVisit>>,
}

impl InMemoryVisitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VisitStore for InMemoryVisitStore {
    fn record(&self, visit: PageVisit, analysis: Analysis) -> bool {
        if !should_retain(&analysis) {
            info!("Content skipped: {} ({})", visit.url, analysis.reasoning);
            return false;
        }

        info!("Content saved: {} ({})", visit.url, analysis.reasoning);
        self.visits.write().push(StoredVisit { visit, analysis });
        true
    }

    fn list_all(&self) -> Vec<StoredVisit> {
        self.visits.read().clone()
    }

    fn len(&self) -> usize {
        self.visits.read().len()
    }

    fn stats(&self) -> VisitStats {
        let visits = self.visits.read();
        VisitStats::from_visits(&visits)
    }
}
