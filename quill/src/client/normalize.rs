//! Collapse a response envelope into display text.
//!
//! The `output` field of an invoke response comes back in several shapes
//! depending on the runnable behind the route. [`ResponseEnvelope`] names each
//! shape; [`extract_text`] turns any of them into a single string. The match
//! order is fixed: plain string, object with string `content`, object with a
//! `content` list, anything else.

use serde_json::Value;

/// Shown when the body is not an object or has no `output` key.
pub const UNEXPECTED_FORMAT: &str = "⚠️ Unexpected response format.";

/// Shown when a `content` list yields no text at all.
pub const EMPTY_RESPONSE: &str = "⚠️ Empty response.";

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope<'a> {
    /// `{"output": "text"}`
    Text(&'a str),
    /// `{"output": {"content": "text"}}`
    Content(&'a str),
    /// `{"output": {"content": [{"text": "..."}, ...]}}`
    Fragments(&'a [Value]),
    /// Any other `output` value.
    Other(&'a Value),
}

impl<'a> ResponseEnvelope<'a> {
    /// Returns `None` when `result` carries no `output` to classify.
    pub fn classify(result: &'a Value) -> Option<Self> {
        let output = result.as_object()?.get("output")?;

        let envelope = match output {
            Value::String(text) => ResponseEnvelope::Text(text),
            Value::Object(fields) => match fields.get("content") {
                Some(Value::String(text)) => ResponseEnvelope::Content(text),
                Some(Value::Array(fragments)) => ResponseEnvelope::Fragments(fragments),
                _ => ResponseEnvelope::Other(output),
            },
            other => ResponseEnvelope::Other(other),
        };

        Some(envelope)
    }

    pub fn into_text(self) -> String {
        match self {
            ResponseEnvelope::Text(text) | ResponseEnvelope::Content(text) => {
                text.trim().to_string()
            }
            ResponseEnvelope::Fragments(fragments) => join_fragments(fragments),
            ResponseEnvelope::Other(value) => value.to_string(),
        }
    }
}

/// Non-object fragments are skipped; a missing or non-string `text` counts as
/// empty.
fn join_fragments(fragments: &[Value]) -> String {
    let parts: Vec<&str> = fragments
        .iter()
        .filter_map(Value::as_object)
        .map(|fragment| {
            fragment
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
        })
        .filter(|text| !text.is_empty())
        .collect();

    let joined = parts.join("\n");
    let joined = joined.trim();
    if joined.is_empty() {
        EMPTY_RESPONSE.to_string()
    } else {
        joined.to_string()
    }
}

/// Extract display text from a decoded invoke response body.
pub fn extract_text(result: &Value) -> String {
    ResponseEnvelope::classify(result)
        .map(ResponseEnvelope::into_text)
        .unwrap_or_else(|| UNEXPECTED_FORMAT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_plain_string_output_is_trimmed() {
        assert_eq!(extract_text(&json!({"output": "hello "})), "hello");
    }

    #[test]
    fn test_string_content_is_trimmed() {
        assert_eq!(
            extract_text(&json!({"output": {"content": " hi there "}})),
            "hi there"
        );
    }

    #[test]
    fn test_content_fragments_join_with_newlines() {
        assert_eq!(
            extract_text(&json!({"output": {"content": [{"text": "a"}, {"text": "b"}]}})),
            "a\nb"
        );
    }

    #[test]
    fn test_empty_fragment_list_yields_marker() {
        assert_eq!(
            extract_text(&json!({"output": {"content": []}})),
            EMPTY_RESPONSE
        );
    }

    #[test]
    fn test_missing_output_yields_marker() {
        assert_eq!(extract_text(&json!({"nope": 1})), UNEXPECTED_FORMAT);
    }

    #[test]
    fn test_non_object_body_yields_marker() {
        assert_eq!(extract_text(&json!(["output"])), UNEXPECTED_FORMAT);
        assert_eq!(extract_text(&json!("output")), UNEXPECTED_FORMAT);
        assert_eq!(extract_text(&Value::Null), UNEXPECTED_FORMAT);
    }

    #[test]
    fn test_other_output_uses_json_representation() {
        assert_eq!(extract_text(&json!({"output": 42})), "42");
        assert_eq!(extract_text(&json!({"output": true})), "true");
    }

    #[test]
    fn test_fragments_skip_non_objects_and_missing_text() {
        let body = json!({"output": {"content": [
            "loose string",
            {"type": "image"},
            {"text": ""},
            {"text": "kept"},
            {"text": 7}
        ]}});
        assert_eq!(extract_text(&body), "kept");
    }

    #[test]
    fn test_whitespace_only_fragments_yield_marker() {
        let body = json!({"output": {"content": [{"text": "  "}, {"text": "\n"}]}});
        assert_eq!(extract_text(&body), EMPTY_RESPONSE);
    }

    #[test]
    fn test_object_without_usable_content_falls_through() {
        let body = json!({"output": {"content": 3}});
        assert_eq!(extract_text(&body), r#"{"content":3}"#);
    }

    #[test]
    fn test_classify_variants() {
        let text = json!({"output": "x"});
        let content = json!({"output": {"content": "x"}});
        let fragments = json!({"output": {"content": [{"text": "x"}]}});
        let other = json!({"output": null});

        assert_eq!(
            ResponseEnvelope::classify(&text),
            Some(ResponseEnvelope::Text("x"))
        );
        assert_eq!(
            ResponseEnvelope::classify(&content),
            Some(ResponseEnvelope::Content("x"))
        );
        assert!(matches!(
            ResponseEnvelope::classify(&fragments),
            Some(ResponseEnvelope::Fragments(items)) if items.len() == 1
        ));
        assert_eq!(
            ResponseEnvelope::classify(&other),
            Some(ResponseEnvelope::Other(&Value::Null))
        );
    }
}
