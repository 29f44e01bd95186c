//! Start date normalization and filename date inference.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::constants::{FILENAME_DATE_PATTERNS, date_formats};
use crate::rules::Cascade;

static BARE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("Invalid bare date regex"));

static FILENAME_DATES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    FILENAME_DATE_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("Invalid filename date regex"))
        .collect()
});

static DATE_CASCADE: LazyLock<Cascade<'static, str, NaiveDate>> = LazyLock::new(|| {
    let mut cascade = Cascade::new("start date");
    for &format in date_formats::DATETIME {
        cascade = cascade.rule(format, move |raw: &str| {
            NaiveDateTime::parse_from_str(raw, format)
                .ok()
                .map(|dt| dt.date())
        });
    }
    for &format in date_formats::DATE {
        cascade = cascade.rule(format, move |raw: &str| {
            NaiveDate::parse_from_str(raw, format).ok()
        });
    }
    cascade.rule("bare date", |raw: &str| {
        BARE_DATE
            .find_iter(raw)
            .find_map(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
    })
});

/// Normalize a free-form date to `YYYY-MM-DD`, or `None` if nothing parses
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_CASCADE
        .apply(raw)
        .map(|date| date.format(date_formats::CANONICAL).to_string())
}

/// Infer a start date from a file name such as `wavtS_20250423_021234.txt`
pub fn date_from_filename(path: &Path) -> Option<String> {
    let filename = path.file_name()?.to_string_lossy();

    for pattern in FILENAME_DATES.iter() {
        let Some(captures) = pattern.captures(&filename) else {
            continue;
        };
        if let Some(date) = captures.get(1).and_then(|m| parse_filename_date(m.as_str())) {
            debug!("Extracted date from filename {}: {}", filename, date);
            return Some(date);
        }
    }

    None
}

fn parse_filename_date(date_str: &str) -> Option<String> {
    let parsed = if date_str.len() == 8 && date_str.chars().all(|c| c.is_ascii_digit()) {
        NaiveDate::parse_from_str(date_str, "%Y%m%d").ok()
    } else if date_str.contains('-') && date_str.len() == 10 {
        if date_str.starts_with("20") {
            NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
        } else {
            NaiveDate::parse_from_str(date_str, "%m-%d-%Y")
                .or_else(|_| NaiveDate::parse_from_str(date_str, "%d-%m-%Y"))
                .ok()
        }
    } else if date_str.contains('_') {
        NaiveDate::parse_from_str(date_str, "%Y_%m_%d").ok()
    } else {
        None
    };

    parsed.map(|date| date.format(date_formats::CANONICAL).to_string())
}
