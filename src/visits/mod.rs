// src/visits/mod.rs

pub mod stats;
pub mod store;

pub use stats::{RecentSave, VisitStats};
pub use store::{InMemoryVisitStore, StoredVisit, VisitStore, should_retain};
