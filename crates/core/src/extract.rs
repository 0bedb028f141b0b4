//! Text extraction helpers for model responses.
//!
//! Models wrap JSON in markdown fences, surround it with prose, or stop mid-output. The
//! helpers here isolate a candidate JSON substring; [`crate::parse`] decides which of
//! them to try and in what order.

use regex::Regex;
use std::sync::LazyLock;

static FENCE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)```(?:json)?").ok());

/// Remove every ```` ```json ```` and ```` ``` ```` marker from the text.
pub fn strip_fences(raw: &str) -> String {
    match FENCE.as_ref() {
        Some(re) => re.replace_all(raw, "").into_owned(),
        None => raw.replace("```json", "").replace("```", ""),
    }
}

/// Trim surrounding prose: everything before the first `{`/`[` and after the last `}`/`]`.
///
/// Returns an empty string if the text contains no opening brace or bracket.
pub fn trim_to_json_bounds(text: &str) -> &str {
    let Some(start) = text.find(['{', '[']) else {
        return "";
    };
    let rest = &text[start..];
    match rest.rfind(['}', ']']) {
        Some(end) => &rest[..=end],
        None => rest,
    }
}

/// Repair a response cut off partway through a top-level array.
///
/// The text is sliced after its last `}` or `]`. If every element up to that point is
/// complete and the only unclosed opener is the top-level `[`, the array is closed and
/// returned. A dangling `{` or an unterminated string means the cut fell inside an
/// object, and `None` is returned rather than inventing the rest of it.
pub fn repair_truncated_array(text: &str) -> Option<String> {
    let end = text.rfind(['}', ']'])?;
    let sliced = text[..=end].trim_start();

    let mut scan = Scanner::default();
    let mut open: Vec<char> = Vec::new();
    for c in sliced.chars() {
        match scan.step(c) {
            Token::Open(o) => open.push(o),
            Token::Close(close) => {
                let expected = if close == '}' { '{' } else { '[' };
                if open.pop() != Some(expected) {
                    return None;
                }
            }
            Token::Other => {}
        }
    }

    if scan.in_string {
        return None;
    }

    match open.as_slice() {
        [] => Some(sliced.to_string()),
        ['['] if sliced.starts_with('[') => Some(format!("{sliced}]")),
        _ => None,
    }
}

/// Slice the first structurally balanced `{ ... }` object out of the text.
///
/// Braces inside string literals are ignored. Returns `None` if the object never closes.
pub fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut scan = Scanner::default();
    let mut depth = 0usize;

    for (offset, c) in text[start..].char_indices() {
        match scan.step(c) {
            Token::Open('{') => depth += 1,
            Token::Close('}') => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

enum Token {
    Open(char),
    Close(char),
    Other,
}

/// Minimal JSON lexer state: tracks whether we are inside a string literal.
#[derive(Default)]
struct Scanner {
    in_string: bool,
    escaped: bool,
}

impl Scanner {
    fn step(&mut self, c: char) -> Token {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == '"' {
                self.in_string = false;
            }
            return Token::Other;
        }

        match c {
            '"' => {
                self.in_string = true;
                Token::Other
            }
            '{' | '[' => Token::Open(c),
            '}' | ']' => Token::Close(c),
            _ => Token::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_and_bare_fences() {
        let raw = "```json\n{\"a\":1}\n```";
        assert_eq!(strip_fences(raw).trim(), "{\"a\":1}");
        assert_eq!(strip_fences("```[1]```"), "[1]");
        assert_eq!(strip_fences("```JSON\n[]\n```").trim(), "[]");
    }

    #[test]
    fn trims_leading_and_trailing_prose() {
        let text = "Here you go: {\"a\": [1, 2]} hope this helps!";
        assert_eq!(trim_to_json_bounds(text), "{\"a\": [1, 2]}");
    }

    #[test]
    fn trim_returns_empty_without_openers() {
        assert_eq!(trim_to_json_bounds("no json here"), "");
    }

    #[test]
    fn repairs_array_cut_between_elements() {
        let text = r#"[{"a":1},{"b":2},{"c":"#;
        assert_eq!(
            repair_truncated_array(text).as_deref(),
            Some(r#"[{"a":1},{"b":2}]"#)
        );
    }

    #[test]
    fn refuses_to_close_dangling_objects() {
        let text = r#"{"courseName":"X","chapters":[{"chapterName":"A"},{"chapterName":"B"#;
        assert_eq!(repair_truncated_array(text), None);
    }

    #[test]
    fn refuses_unterminated_strings() {
        let text = r#"[{"a":"}"#;
        assert_eq!(repair_truncated_array(text), None);
    }

    #[test]
    fn balanced_object_ignores_trailing_garbage() {
        let text = r#"{"a":{"b":"}"}} and then {"c":3}"#;
        assert_eq!(balanced_object(text), Some(r#"{"a":{"b":"}"}}"#));
    }

    #[test]
    fn balanced_object_none_when_unclosed() {
        assert_eq!(balanced_object(r#"{"a":{"b":1}"#), None);
    }
}
