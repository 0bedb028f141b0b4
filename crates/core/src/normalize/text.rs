//! Scalar coercion and string cleanup.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static PRE_TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)</?pre(?:\s[^>]*)?>").ok());

/// Trim and collapse whitespace runs to single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Free-text field: strings are cleaned, anything else becomes `""`.
pub fn clean_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => collapse_whitespace(s),
        _ => String::new(),
    }
}

/// Like [`clean_text`], but numbers and booleans are rendered rather than discarded.
///
/// Used for quiz options, where models sometimes emit `4` instead of `"4"`.
pub fn clean_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => collapse_whitespace(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Code example field: `<pre>` tags stripped, outer whitespace trimmed, internal layout kept.
pub fn clean_code(value: Option<&Value>) -> Option<String> {
    let Some(Value::String(code)) = value else {
        return None;
    };
    let mut stripped = code.clone();
    if let Some(re) = PRE_TAG.as_ref() {
        // Removing one tag can splice a new one together, e.g. `<pr<pre>e>`.
        while re.is_match(&stripped) {
            stripped = re.replace_all(&stripped, "").into_owned();
        }
    }
    let trimmed = stripped.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// List of strings: non-arrays become empty, entries are cleaned, blanks and repeats
/// dropped, and the result is cut to `max` entries.
pub fn string_set(value: Option<&Value>, max: usize) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let text = clean_text(Some(item));
        if !text.is_empty() && !out.contains(&text) {
            out.push(text);
        }
        if out.len() == max {
            break;
        }
    }
    out
}

/// Non-negative integer from a number or a numeric string.
pub fn coerce_u32(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(
            clean_text(Some(&json!("  Intro \n\t to   Rust "))),
            "Intro to Rust"
        );
    }

    #[test]
    fn non_strings_become_empty() {
        assert_eq!(clean_text(Some(&json!(42))), "");
        assert_eq!(clean_text(Some(&json!({"a": 1}))), "");
        assert_eq!(clean_text(None), "");
    }

    #[test]
    fn strips_pre_tags_from_code() {
        let code = json!("<pre class=\"rust\">fn main() {\n    println!(\"hi\");\n}</PRE>");
        assert_eq!(
            clean_code(Some(&code)).as_deref(),
            Some("fn main() {\n    println!(\"hi\");\n}")
        );
        assert_eq!(clean_code(Some(&json!("null"))), None);
        assert_eq!(clean_code(Some(&json!(null))), None);
    }

    #[test]
    fn spliced_pre_tags_are_removed() {
        assert_eq!(clean_code(Some(&json!("<pr<pre>e>x = 1"))).as_deref(), Some("x = 1"));
    }

    #[test]
    fn generic_types_starting_with_pre_survive() {
        let code = "let stmts: Vec<PreparedStatement> = Vec::new();\nlet p: Box<Predicate> = f();";
        assert_eq!(clean_code(Some(&json!(code))).as_deref(), Some(code));
        assert_eq!(
            clean_code(Some(&json!("<pre>use std::prelude::*;\nlet x: Option<Prelude> = None;</pre >"))).as_deref(),
            Some("use std::prelude::*;\nlet x: Option<Prelude> = None;")
        );
    }

    #[test]
    fn string_set_dedups_and_bounds() {
        let tags = json!(["a", " a ", "", 3, "b", "c", "d", "e", "f"]);
        assert_eq!(string_set(Some(&tags), 5), vec!["a", "b", "c", "d", "e"]);
        assert!(string_set(Some(&json!("a, b")), 5).is_empty());
    }

    #[test]
    fn coerces_integers_from_numbers_and_strings() {
        assert_eq!(coerce_u32(Some(&json!(45))), Some(45));
        assert_eq!(coerce_u32(Some(&json!(45.0))), Some(45));
        assert_eq!(coerce_u32(Some(&json!(" 60 "))), Some(60));
        assert_eq!(coerce_u32(Some(&json!(-1))), None);
        assert_eq!(coerce_u32(Some(&json!("soon"))), None);
    }
}
