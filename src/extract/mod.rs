use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no JSON object found in model response")]
    NoJsonFound,
    #[error("model response contained malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Pull the first JSON object out of free-form model text.
///
/// Walks from the first `{` tracking brace depth, skipping braces inside
/// string literals, and takes the first span whose depth returns to zero. If
/// the depth never closes the remainder of the text is handed to the JSON
/// parser so the caller gets a syntax error rather than a guessed span.
///
/// Known limit: a stray `{` in prose *before* the real document mis-anchors
/// the scan and surfaces as `MalformedJson`; the document is never silently
/// corrupted.
pub fn extract_json(text: &str) -> Result<Value, ExtractError> {
    let start = text.find('{').ok_or(ExtractError::NoJsonFound)?;
    let tail = &text[start..];
    let candidate = match balanced_end(tail) {
        Some(len) => &tail[..len],
        None => tail,
    };
    Ok(serde_json::from_str(candidate)?)
}

/// Byte offset one past the `}` that closes the object opened at the start of
/// `s`, or `None` if the braces never balance.
fn balanced_end(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in s.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_object_surrounded_by_prose() {
        let text = "Sure, here it is: {\"name\":\"wf\",\"nodes\":[]} Hope that helps!";
        let doc = extract_json(text).unwrap();
        assert_eq!(doc, json!({"name": "wf", "nodes": []}));
    }

    #[test]
    fn extracts_nested_object() {
        let text = "{\"a\":{\"b\":{\"c\":1}},\"d\":[{\"e\":2}]}";
        let doc = extract_json(text).unwrap();
        assert_eq!(doc["a"]["b"]["c"], 1);
    }

    #[test]
    fn braces_inside_strings_do_not_close_the_span() {
        let text = "{\"tpl\":\"use {curly} braces\",\"n\":1} trailing prose";
        let doc = extract_json(text).unwrap();
        assert_eq!(doc["n"], 1);
    }

    #[test]
    fn stray_brace_in_trailing_prose_is_harmless() {
        // The depth scanner stops at the real closing brace; the `}` later in
        // the prose is never part of the span (unlike a greedy last-} match).
        let text = "{\"name\":\"wf\"} and remember: close with }";
        let doc = extract_json(text).unwrap();
        assert_eq!(doc, json!({"name": "wf"}));
    }

    #[test]
    fn no_brace_at_all() {
        let err = extract_json("just some prose").unwrap_err();
        assert!(matches!(err, ExtractError::NoJsonFound));
    }

    #[test]
    fn unterminated_object() {
        let err = extract_json("{\"name\": \"wf\", \"nodes\": [").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedJson(_)));
    }

    #[test]
    fn stray_open_brace_before_document_is_a_parse_error() {
        // Documented failure mode: prose containing `{` ahead of the real
        // document anchors the scan too early. The result is an error, not a
        // corrupted document.
        let text = "think of { as an opener. {\"name\":\"wf\"}";
        let err = extract_json(text).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedJson(_)));
    }
}
