// src/analysis/validator.rs
// Enforces the verdict schema on whatever object the model produced

use serde_json::{Map, Value};
use tracing::debug;

use super::error::AnalysisFailure;
use super::types::{Analysis, ContentType};

pub const REQUIRED_FIELDS: [&str; 4] = ["should_add", "type", "clean_title", "reasoning"];

/// Turn a decoded object into an [`Analysis`].
///
/// Only a missing required field is an error. Wrong types and unknown
/// enum values are corrected in place:
/// - non-boolean `should_add` becomes `false`
/// - a `type` outside the accepted set becomes `none`
/// - a non-string `clean_title` becomes `null`
/// - rejected verdicts always carry `type: none` and `clean_title: null`,
///   and a `none` type always rejects
pub fn validate(object: &Map<String, Value>) -> Result<Analysis, AnalysisFailure> {
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !object.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        debug!("Model output missing fields: {:?}", missing);
        return Err(AnalysisFailure::InvalidStructure { missing });
    }

    let mut should_add = object["should_add"].as_bool().unwrap_or(false);

    let content_type = object["type"]
        .as_str()
        .and_then(ContentType::from_model)
        .unwrap_or(ContentType::None);

    let mut clean_title = object["clean_title"].as_str().map(str::to_string);

    let reasoning = match &object["reasoning"] {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };

    if content_type == ContentType::None {
        should_add = false;
    }
    if !should_add {
        clean_title = None;
    }

    Ok(Analysis {
        should_add,
        content_type: if should_add { content_type } else { ContentType::None },
        clean_title,
        reasoning,
    })
}
