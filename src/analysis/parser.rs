// src/analysis/parser.rs
// Recovers a JSON object from raw model output, never fails

use serde_json::{Deserializer, Map, Value, json};
use tracing::{debug, warn};

use super::types::PARSE_FAILURE_REASONING;

/// How hard to look for JSON inside model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// The whole completion must decode as an object.
    Strict,
    /// Also accept the first brace-delimited object embedded in prose.
    #[default]
    Lenient,
}

/// The rejecting object substituted when nothing decodes.
pub fn fallback_object() -> Map<String, Value> {
    let value = json!({
        "should_add": false,
        "type": "none",
        "clean_title": null,
        "reasoning": PARSE_FAILURE_REASONING,
    });
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Extract a JSON object from `raw`, returning [`fallback_object`] when
/// every attempt fails.
pub fn parse_response(raw: &str, mode: ParseMode) -> Map<String, Value> {
    if let Some(object) = decode_object(raw.trim()) {
        return object;
    }

    if mode == ParseMode::Lenient
        && let Some(object) = extract_embedded_object(raw)
    {
        debug!("Recovered JSON object embedded in model output");
        return object;
    }

    warn!(
        "Failed to parse model output as JSON. First 200 chars: {}",
        raw.chars().take(200).collect::<String>()
    );
    fallback_object()
}

fn decode_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Decode the single value that starts at the first `{`. The stream
/// decoder stops where that value closes, so trailing prose is ignored.
fn extract_embedded_object(raw: &str) -> Option<Map<String, Value>> {
    let start = raw.find('{')?;
    match Deserializer::from_str(&raw[start..]).into_iter::<Value>().next()? {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
