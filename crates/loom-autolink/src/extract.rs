//! Embedded JSON extraction
//!
//! Generation output wraps its payload in prose or a fenced code block
//! more often than not. Extraction prefers the first fenced block, then
//! falls back to scanning the whole text for the first top-level balanced
//! JSON object. The scanner is string- and escape-aware so braces inside
//! string values do not unbalance it.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("fence regex is valid")
});

/// Extract the first top-level JSON object embedded in `text`
///
/// Returns the exact source slice of the object, or `None` when no
/// balanced object exists. The slice is not guaranteed to be valid JSON;
/// that judgement belongs to the parser.
#[must_use]
pub fn extract_first_json_object(text: &str) -> Option<&str> {
    if let Some(captures) = FENCE_RE.captures(text) {
        let fenced = captures.get(1).expect("fence regex has one group");
        if let Some(object) = scan_balanced(fenced.as_str()) {
            return Some(object);
        }
    }
    scan_balanced(text)
}

fn scan_balanced(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
