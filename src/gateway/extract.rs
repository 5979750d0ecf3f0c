// Best-effort JSON extraction from free-form model output

use serde_json::Value;
use tracing::debug;

/// Extract a JSON value from raw model text.
///
/// The model frequently wraps JSON in markdown fences or surrounds it with
/// commentary. Strategy: strip fence markers and trim, attempt a direct
/// parse, then fall back to the substring between the earliest opening
/// bracket and the latest matching closing bracket. Returns `None` when
/// nothing parseable remains — never an error; callers substitute their own
/// default payload.
pub fn extract_json(raw: &str) -> Option<Value> {
    let cleaned = strip_fences(raw);

    if let Ok(value) = serde_json::from_str(cleaned) {
        return Some(value);
    }

    let start = cleaned.find(['{', '['])?;
    let closer = if cleaned.as_bytes()[start] == b'{' { '}' } else { ']' };
    let end = cleaned.rfind(closer)?;
    if end <= start {
        return None;
    }

    match serde_json::from_str(&cleaned[start..=end]) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("JSON extraction failed on bracketed substring: {}", e);
            None
        }
    }
}

/// Remove markdown-style code fences around the payload.
fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    for marker in ["```json", "```JSON", "```"] {
        if let Some(rest) = text.strip_prefix(marker) {
            text = rest;
            break;
        }
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_json() {
        let value = extract_json("```json\n{\"a\":1}\n```").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_fence_without_language_tag() {
        let value = extract_json("```\n[1, 2, 3]\n```").unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn test_embedded_object_with_commentary() {
        let value = extract_json("some text {\"a\":1} trailing").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_embedded_array() {
        let value = extract_json("Here are the matches: [{\"id\": 5}] hope this helps!").unwrap();
        assert_eq!(value, json!([{"id": 5}]));
    }

    #[test]
    fn test_plain_json() {
        let value = extract_json("{\"ok\": true}").unwrap();
        assert_eq!(value, json!({"ok": true}));
    }

    #[test]
    fn test_no_json_yields_none() {
        assert!(extract_json("no json here").is_none());
        assert!(extract_json("").is_none());
        assert!(extract_json("unbalanced { brace").is_none());
    }
}
