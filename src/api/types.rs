// src/api/types.rs
// Request validation and response bodies for the HTTP surface

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::analysis::{Analysis, PageVisit};

pub const VISIT_FIELDS: [&str; 4] = ["url", "domain", "title", "timestamp"];

/// Key under which a stored record carries its verdict. Clients cannot set it.
pub const RESERVED_FIELD: &str = "analysis";

#[derive(Debug, Error, PartialEq)]
pub enum VisitError {
    #[error("request body is not a JSON object")]
    NotAnObject,

    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("invalid visit: {0}")]
    InvalidField(String),
}

/// Validate a raw request body into a [`PageVisit`].
///
/// With `require_timestamp` unset a missing or null timestamp is filled
/// with the current time in epoch milliseconds. With it set, a null
/// timestamp counts as missing. A client-supplied `analysis` field is
/// dropped so it cannot collide with the stored verdict.
pub fn visit_from_body(body: Value, require_timestamp: bool) -> Result<PageVisit, VisitError> {
    let Value::Object(mut object) = body else {
        return Err(VisitError::NotAnObject);
    };

    let required = if require_timestamp {
        &VISIT_FIELDS[..]
    } else {
        &VISIT_FIELDS[..3]
    };
    let missing: Vec<&'static str> = required
        .iter()
        .copied()
        .filter(|field| match object.get(*field) {
            None => true,
            Some(Value::Null) => *field == "timestamp",
            Some(_) => false,
        })
        .collect();
    if !missing.is_empty() {
        return Err(VisitError::MissingFields(missing));
    }

    object.remove(RESERVED_FIELD);
    normalize_timestamp(&mut object, !require_timestamp);

    serde_json::from_value(Value::Object(object)).map_err(|e| VisitError::InvalidField(e.to_string()))
}

fn normalize_timestamp(object: &mut Map<String, Value>, fill_missing: bool) {
    let millis = match object.get("timestamp") {
        None | Some(Value::Null) if fill_missing => Some(Utc::now().timestamp_millis()),
        Some(Value::Number(n)) if n.as_i64().is_none() => n.as_f64().map(|f| f as i64),
        _ => None,
    };
    if let Some(millis) = millis {
        object.insert("timestamp".to_string(), Value::from(millis));
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogVisitResponse {
    pub status: String,
    pub analysis: Analysis,
    pub saved: bool,
    pub total_saved: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeUrlResponse {
    pub analysis: Analysis,
    pub input: PageVisit,
}

#[derive(Debug, Default, Deserialize)]
pub struct IngestContentRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IngestContentResponse {
    pub status: String,
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_complete_visit_is_accepted() {
        let visit = visit_from_body(
            json!({"url": "https://x.com", "domain": "x.com", "title": "Home", "timestamp": 1, "tab": 9}),
            true,
        )
        .unwrap();
        assert_eq!(visit.timestamp, 1);
        assert_eq!(visit.extra["tab"], json!(9));
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let err = visit_from_body(json!({"url": "https://x.com"}), true).unwrap_err();
        assert_eq!(err, VisitError::MissingFields(vec!["domain", "title", "timestamp"]));
        assert_eq!(err.to_string(), "missing required fields: domain, title, timestamp");
    }

    #[test]
    fn test_timestamp_filled_when_optional() {
        let before = Utc::now().timestamp_millis();
        let visit = visit_from_body(
            json!({"url": "https://x.com/a", "domain": "x.com", "title": "A"}),
            false,
        )
        .unwrap();
        assert!(visit.timestamp >= before);
    }

    #[test]
    fn test_timestamp_required_for_logging() {
        let err = visit_from_body(json!({"url": "https://x.com/a", "domain": "x.com", "title": "A"}), true)
            .unwrap_err();
        assert_eq!(err, VisitError::MissingFields(vec!["timestamp"]));
    }

    #[test]
    fn test_null_timestamp_is_missing_when_required() {
        let err = visit_from_body(
            json!({"url": "https://x.com/a", "domain": "x.com", "title": "A", "timestamp": null}),
            true,
        )
        .unwrap_err();
        assert_eq!(err, VisitError::MissingFields(vec!["timestamp"]));

        let visit = visit_from_body(
            json!({"url": "https://x.com/a", "domain": "x.com", "title": "A", "timestamp": null}),
            false,
        )
        .unwrap();
        assert!(visit.timestamp > 0);
    }

    #[test]
    fn test_client_analysis_field_is_dropped() {
        let visit = visit_from_body(
            json!({"url": "https://x.com/a", "domain": "x.com", "title": "A", "timestamp": 1, "analysis": "mine", "tab": 2}),
            true,
        )
        .unwrap();
        assert!(!visit.extra.contains_key("analysis"));
        assert_eq!(visit.extra["tab"], json!(2));
    }

    #[test]
    fn test_fractional_timestamp_is_truncated() {
        let visit = visit_from_body(
            json!({"url": "https://x.com/a", "domain": "x.com", "title": "A", "timestamp": 1700000000123.7}),
            true,
        )
        .unwrap();
        assert_eq!(visit.timestamp, 1_700_000_000_123);
    }

    #[test]
    fn test_wrong_field_type_is_invalid() {
        let err = visit_from_body(json!({"url": 5, "domain": "x.com", "title": "A", "timestamp": 1}), true)
            .unwrap_err();
        assert!(matches!(err, VisitError::InvalidField(_)));
        assert_eq!(visit_from_body(json!([1, 2]), true).unwrap_err(), VisitError::NotAnObject);
    }
}
