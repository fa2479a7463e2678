// src/visits/stats.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::store::StoredVisit;

/// Number of entries reported in `recent_saves`.
pub const RECENT_SAVES_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSave {
    pub url: String,
    /// Cleaned title when the model gave one, else the page title
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VisitStats {
    pub total_saved: usize,
    pub by_type: BTreeMap<String, usize>,
    pub recent_saves: Vec<RecentSave>,
}

impl VisitStats {
    /// Single pass over the log in insertion order.
    ///
    /// `recent_saves` holds the first [`RECENT_SAVES_LIMIT`] entries in
    /// store order, not the newest ones.
    pub fn from_visits(visits: &[StoredVisit]) -> Self {
        if visits.is_empty() {
            return Self::default();
        }

        let mut by_type = BTreeMap::new();
        let mut recent_saves = Vec::with_capacity(RECENT_SAVES_LIMIT.min(visits.len()));

        for stored in visits {
            let content_type = stored.analysis.content_type.as_str().to_string();
            *by_type.entry(content_type.clone()).or_insert(0) += 1;

            if recent_saves.len() < RECENT_SAVES_LIMIT {
                recent_saves.push(RecentSave {
                    url: stored.visit.url.clone(),
                    title: stored
                        .analysis
                        .clean_title
                        .clone()
                        .filter(|t| !t.is_empty())
                        .unwrap_or_else(|| stored.visit.title.clone()),
                    content_type,
                    timestamp: stored.visit.timestamp,
                });
            }
        }

        Self {
            total_saved: visits.len(),
            by_type,
            recent_saves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Analysis, ContentType, PageVisit};
    use serde_json::json;

    fn stored(i: i64, kind: ContentType, clean_title: Option<&str>) -> StoredVisit {
        StoredVisit {
            visit: PageVisit::new(format!("https://x.com/{i}"), "x.com", format!("Page {i}"), i),
            analysis: Analysis {
                should_add: kind != ContentType::None,
                content_type: kind,
                clean_title: clean_title.map(str::to_string),
                reasoning: "r".to_string(),
            },
        }
    }

    #[test]
    fn test_empty_store_is_zeroed() {
        let stats = VisitStats::from_visits(&[]);
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({"total_saved": 0, "by_type": {}, "recent_saves": []})
        );
    }

    #[test]
    fn test_counts_by_type_in_order() {
        let visits = vec![
            stored(1, ContentType::Article, Some("One")),
            stored(2, ContentType::Article, None),
            stored(3, ContentType::Video, Some("Three")),
        ];
        let stats = VisitStats::from_visits(&visits);

        assert_eq!(stats.total_saved, 3);
        assert_eq!(stats.by_type.len(), 2);
        assert_eq!(stats.by_type["article"], 2);
        assert_eq!(stats.by_type["video"], 1);

        let titles: Vec<&str> = stats.recent_saves.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Page 2", "Three"]);
        assert_eq!(stats.recent_saves[2].content_type, "video");
        assert_eq!(stats.recent_saves[0].timestamp, 1);
    }

    #[test]
    fn test_recent_saves_are_first_ten() {
        let visits: Vec<StoredVisit> = (0..15)
            .map(|i| stored(i, ContentType::Other, None))
            .collect();
        let stats = VisitStats::from_visits(&visits);

        assert_eq!(stats.total_saved, 15);
        assert_eq!(stats.recent_saves.len(), RECENT_SAVES_LIMIT);
        assert_eq!(stats.recent_saves[0].url, "https://x.com/0");
        assert_eq!(stats.recent_saves[9].url, "https://x.com/9");
    }

    #[test]
    fn test_failed_reviews_count_as_none() {
        let mut failed = stored(1, ContentType::None, None);
        failed.analysis = Analysis::failed("timeout");
        let stats = VisitStats::from_visits(&[failed]);
        assert_eq!(stats.by_type["none"], 1);
    }
}
