// src/analysis/prompt.rs
// Renders a page visit into the classification instruction

use super::types::{ContentType, PageVisit};

/// Build the single instruction block sent to the inference backend.
///
/// The visit is embedded as pretty-printed JSON so the model can key off
/// field names. When unsure, the model is told to reject.
pub fn build_prompt(visit: &PageVisit) -> String {
    let type_choices = ContentType::PUBLISHED
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join("|");

    let prompt = format!(
        r#"
You are a JSON-only assistant.

Your job is to decide if a web page is meaningful standalone content like an article, blog or video.

Only say `should_add: true` if the URL clearly shows it's a specific article, post, tutorial, or video.

Reject it if it's a homepage, profile, feed, search results, checkout or account page, or if the URL does not clearly show specific content.

If you're not sure, reject it.

Respond only with valid JSON in this format:
{{
  "should_add": <true|false>,
  "type": <{type_choices}>,
  "clean_title": <string|null>,
  "reasoning": <string>
}}

Respond with exactly one JSON object and nothing else.

Here is the input:
{visit_json:#}
"#,
        visit_json = visit.to_value(),
    );

    prompt.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_visit() -> PageVisit {
        let mut visit = PageVisit::new(
            "https://blog.example.com/posts/rust-ownership",
            "blog.example.com",
            "Understanding Ownership | Example Blog",
            1_700_000_000_000,
        );
        visit.extra.insert("tab_id".to_string(), json!(42));
        visit
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let visit = sample_visit();
        assert_eq!(build_prompt(&visit), build_prompt(&visit));
    }

    #[test]
    fn test_prompt_embeds_pretty_visit_json() {
        let prompt = build_prompt(&sample_visit());

        assert!(prompt.contains("\"url\": \"https://blog.example.com/posts/rust-ownership\""));
        assert!(prompt.contains("\"domain\": \"blog.example.com\""));
        assert!(prompt.contains("\"timestamp\": 1700000000000"));
        assert!(prompt.contains("\"tab_id\": 42"));
        assert!(prompt.ends_with('}'));
    }

    #[test]
    fn test_prompt_publishes_schema_and_rejection_bias() {
        let prompt = build_prompt(&sample_visit());

        for field in ["\"should_add\"", "\"type\"", "\"clean_title\"", "\"reasoning\""] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert!(prompt.contains(r#"<"article"|"blog"|"video"|"other"|"none">"#));
        assert!(prompt.contains("If you're not sure, reject it."));
        assert!(prompt.contains("exactly one JSON object"));
        assert!(prompt.starts_with("You are a JSON-only assistant."));
    }
}
