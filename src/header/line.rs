//! Key/value extraction from a single header line.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::{COMMENT_MARKER, MIN_SPACE_SEPARATOR};
use crate::rules::Cascade;

static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(" {{{},}}", MIN_SPACE_SEPARATOR)).expect("Invalid separator regex")
});

/// Separators in priority order: tab, colon, then a run of spaces
static SEPARATORS: LazyLock<Cascade<'static, str, (String, String)>> = LazyLock::new(|| {
    Cascade::new("separator")
        .rule("tab", |line: &str| split_pair(line.split_once('\t')))
        .rule("colon", |line: &str| split_pair(line.split_once(':')))
        .rule("spaces", |line: &str| {
            let mut parts = SPACE_RUN.splitn(line, 2);
            split_pair(parts.next().zip(parts.next()))
        })
});

fn split_pair(pair: Option<(&str, &str)>) -> Option<(String, String)> {
    pair.map(|(key, value)| (key.to_string(), value.to_string()))
}

/// Remove surrounding whitespace and one leading comment marker
pub fn strip_comment(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix(COMMENT_MARKER).unwrap_or(line).trim()
}

/// Split a header line into a lower-cased key and a trimmed value.
///
/// Returns `None` when no separator is present. Empty keys or values are
/// returned as-is; callers decide whether to keep them.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    let cleaned = strip_comment(line);
    SEPARATORS
        .apply(cleaned)
        .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
}
