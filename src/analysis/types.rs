// src/analysis/types.rs
// Page visit input and the model's verdict on it

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Marker carried in `reasoning` when the pipeline itself failed.
/// Visits tagged with it are kept for manual review.
pub const FAILURE_MARKER: &str = "Analysis failed";

/// Reasoning used when no JSON object could be recovered from model output.
pub const PARSE_FAILURE_REASONING: &str = "Failed to parse LLM response";

/// One browser page view as submitted by the extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageVisit {
    pub url: String,
    pub domain: String,
    pub title: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Anything else the extension sent along (referrer, tab id, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageVisit {
    pub fn new(
        url: impl Into<String>,
        domain: impl Into<String>,
        title: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            url: url.into(),
            domain: domain.into(),
            title: title.into(),
            timestamp,
            extra: Map::new(),
        }
    }

    /// JSON object view of the visit. Fixed fields win over same-named extras.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("url".to_string(), Value::String(self.url.clone()));
        object.insert("domain".to_string(), Value::String(self.domain.clone()));
        object.insert("title".to_string(), Value::String(self.title.clone()));
        object.insert("timestamp".to_string(), Value::from(self.timestamp));
        for (key, value) in &self.extra {
            object.entry(key.clone()).or_insert_with(|| value.clone());
        }
        Value::Object(object)
    }
}

/// Content categories the model may report.
///
/// `Blog` is part of the schema published to the model but is not accepted
/// back from it; see [`ContentType::from_model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Article,
    Blog,
    Video,
    Other,
    None,
}

impl ContentType {
    /// Values advertised to the model in the prompt and response schema.
    pub const PUBLISHED: [ContentType; 5] = [
        ContentType::Article,
        ContentType::Blog,
        ContentType::Video,
        ContentType::Other,
        ContentType::None,
    ];

    /// Values the validator keeps when the model returns them.
    pub const ACCEPTED: [ContentType; 4] = [
        ContentType::Article,
        ContentType::Video,
        ContentType::Other,
        ContentType::None,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::Blog => "blog",
            ContentType::Video => "video",
            ContentType::Other => "other",
            ContentType::None => "none",
        }
    }

    /// Map a model-supplied label onto an accepted type. Matching is exact;
    /// `"blog"` and anything unknown yield `None`.
    pub fn from_model(raw: &str) -> Option<ContentType> {
        Self::ACCEPTED.into_iter().find(|t| t.as_str() == raw)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validated verdict for a single visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub should_add: bool,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub clean_title: Option<String>,
    pub reasoning: String,
}

impl Analysis {
    /// A rejecting verdict with the given reasoning.
    pub fn rejected(reasoning: impl Into<String>) -> Self {
        Self {
            should_add: false,
            content_type: ContentType::None,
            clean_title: None,
            reasoning: reasoning.into(),
        }
    }

    /// Terminal verdict for a pipeline failure. Carries [`FAILURE_MARKER`].
    pub fn failed(cause: impl fmt::Display) -> Self {
        Self::rejected(format!("{FAILURE_MARKER}: {cause}"))
    }

    pub fn is_failure(&self) -> bool {
        self.reasoning.contains(FAILURE_MARKER)
    }

    /// Whether this verdict satisfies the save/none/null invariant.
    pub fn is_consistent(&self) -> bool {
        let rejected_shape = self.content_type == ContentType::None && self.clean_title.is_none();
        !self.should_add == rejected_shape
    }
}
