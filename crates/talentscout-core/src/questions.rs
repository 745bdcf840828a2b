//! Numbered-list parsing for generated question sets.
//!
//! Grammar, per line: optional leading whitespace, a decimal integer, a
//! period, then the item text. Lines without that marker are dropped, as are
//! markers with nothing after them. Continuation lines are not joined.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMBERED_ITEM_RE: Regex = Regex::new(r"^\s*[0-9]+\.\s*(.*?)\s*$").unwrap();
}

/// Extract the items of a numbered list, in order.
pub fn parse_numbered_list(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| NUMBERED_ITEM_RE.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Keep the candidates that do not repeat an existing question (or each other).
///
/// Comparison ignores case and surrounding whitespace.
pub fn fresh_questions(existing: &[String], candidates: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = existing.iter().map(|q| normalize(q)).collect();
    let mut fresh = Vec::new();

    for candidate in candidates {
        let key = normalize(&candidate);
        if !seen.contains(&key) {
            seen.push(key);
            fresh.push(candidate);
        }
    }

    fresh
}

fn normalize(question: &str) -> String {
    question.trim().to_lowercase()
}
