//! Best-effort JSON recovery from LLM response text.
//!
//! Models wrap JSON in prose and markdown fences more often than not, so the
//! strategies are tried in order, first success wins:
//!
//! 1. the whole text parses as JSON
//! 2. a ```json fenced block
//! 3. any fenced block whose body parses
//! 4. the earliest balanced `{...}` or `[...]` span
//!
//! Exhaustion is its own error kind so callers can re-prompt instead of
//! failing silently.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*\n(.*?)\n\s*```").unwrap());
static ANY_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[a-zA-Z]*\s*\n(.*?)\n\s*```").unwrap());

/// Extraction failure.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Every strategy was exhausted without producing valid JSON
    #[error("no valid JSON found in response: {snippet}...")]
    NoJson { snippet: String },
}

impl ExtractError {
    fn no_json(text: &str) -> Self {
        Self::NoJson {
            snippet: text.chars().take(200).collect(),
        }
    }
}

/// Recover a JSON value from free-form response text.
pub fn extract_json(text: &str) -> Result<Value, ExtractError> {
    if let Ok(value) = serde_json::from_str(text.trim()) {
        return Ok(value);
    }

    if let Some(captures) = JSON_FENCE.captures(text) {
        if let Some(body) = captures.get(1) {
            if let Ok(value) = serde_json::from_str(body.as_str().trim()) {
                return Ok(value);
            }
        }
    }

    for captures in ANY_FENCE.captures_iter(text) {
        if let Some(body) = captures.get(1) {
            if let Ok(value) = serde_json::from_str(body.as_str().trim()) {
                return Ok(value);
            }
        }
    }

    if let Some(value) = balanced_span(text) {
        return Ok(value);
    }

    Err(ExtractError::no_json(text))
}

/// Try the earliest balanced object or array span in the text.
fn balanced_span(text: &str) -> Option<Value> {
    let mut openers: Vec<(usize, char, char)> = Vec::new();
    if let Some(pos) = text.find('{') {
        openers.push((pos, '{', '}'));
    }
    if let Some(pos) = text.find('[') {
        openers.push((pos, '[', ']'));
    }
    openers.sort_by_key(|(pos, _, _)| *pos);

    for (start, open, close) in openers {
        let suffix = text.get(start..)?;
        let mut depth = 0usize;
        for (offset, c) in suffix.char_indices() {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    let end = offset + c.len_utf8();
                    if let Some(candidate) = suffix.get(..end) {
                        if let Ok(value) = serde_json::from_str(candidate) {
                            return Some(value);
                        }
                    }
                    break;
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_parse() {
        let value = extract_json(r#"{"model": "gpt-4o", "input": 5.0}"#).unwrap();
        assert_eq!(value["model"], json!("gpt-4o"));
    }

    #[test]
    fn test_json_fence() {
        let text = "Here is the pricing you asked for:\n```json\n[{\"model_id\": \"gpt-4o\"}]\n```\nLet me know if you need more.";
        let value = extract_json(text).unwrap();
        assert_eq!(value[0]["model_id"], json!("gpt-4o"));
    }

    #[test]
    fn test_generic_fence() {
        let text = "```\n{\"a\": 1}\n```";
        let value = extract_json(text).unwrap();
        assert_eq!(value["a"], json!(1));
    }

    #[test]
    fn test_skips_non_json_fence() {
        let text = "```python\nprint('hi')\n```\nand the data:\n```\n{\"b\": 2}\n```";
        let value = extract_json(text).unwrap();
        assert_eq!(value["b"], json!(2));
    }

    #[test]
    fn test_object_span_in_prose() {
        let text = "The extracted record is {\"id\": \"claude-3-5-sonnet\", \"scores\": [1, 2]} as requested.";
        let value = extract_json(text).unwrap();
        assert_eq!(value["id"], json!("claude-3-5-sonnet"));
    }

    #[test]
    fn test_array_span_in_prose() {
        let text = "Rows: [{\"model_id\": \"m1\"}, {\"model_id\": \"m2\"}] done.";
        let value = extract_json(text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_earliest_span_wins() {
        let text = "[1, 2, 3] and later {\"x\": 1}";
        let value = extract_json(text).unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn test_exhaustion_is_distinct_error() {
        let err = extract_json("I could not find any pricing on that page.").unwrap_err();
        assert!(matches!(err, ExtractError::NoJson { .. }));
        assert!(err.to_string().contains("could not find"));
    }

    #[test]
    fn test_snippet_is_truncated() {
        let long = "x".repeat(500);
        let ExtractError::NoJson { snippet } = extract_json(&long).unwrap_err();
        assert_eq!(snippet.chars().count(), 200);
    }

    #[test]
    fn test_unbalanced_braces_fail() {
        let err = extract_json("{\"a\": 1").unwrap_err();
        assert!(matches!(err, ExtractError::NoJson { .. }));
    }
}
