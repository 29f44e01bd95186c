//! Header/data line classification.
//!
//! Two predicates decide whether a line belongs to the data section. The
//! export path uses the loose form; the header editor path uses the strict
//! form. Callers pick one explicitly through [`DataLineRule`].

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// `YYYY-MM-DD` date prefix or a decimal number followed by a tab
static STRICT_DATA_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{4}-\d{2}-\d{2}|\d+\.\d+\t)").expect("Invalid data line regex")
});

/// Strictness of the data-line test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataLineRule {
    /// Leading ASCII digit and at least one tab
    #[default]
    Loose,
    /// Leading ISO date, or a decimal number followed by a tab
    Strict,
}

impl DataLineRule {
    pub fn matches(self, line: &str) -> bool {
        match self {
            Self::Loose => loose_data_line(line),
            Self::Strict => strict_data_line(line),
        }
    }
}

/// Structural test used when splitting files for export
pub fn loose_data_line(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit()) && line.contains('\t')
}

/// Stricter test used when scanning a header straight from disk
pub fn strict_data_line(line: &str) -> bool {
    STRICT_DATA_LINE.is_match(line)
}

pub fn is_data_line(line: &str, rule: DataLineRule) -> bool {
    rule.matches(line)
}

/// Split trimmed, non-blank lines into header and data sections using the loose rule
pub fn separate<S: AsRef<str>>(lines: &[S]) -> (Vec<String>, Vec<String>) {
    separate_with(lines, DataLineRule::Loose)
}

/// Split lines into header and data sections.
///
/// Blank lines are dropped. Once the first data line is seen every later
/// line is data, whatever it looks like.
pub fn separate_with<S: AsRef<str>>(lines: &[S], rule: DataLineRule) -> (Vec<String>, Vec<String>) {
    let mut header_lines = Vec::new();
    let mut data_lines = Vec::new();
    let mut in_data_section = false;

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        if !in_data_section && rule.matches(line) {
            in_data_section = true;
        }

        if in_data_section {
            data_lines.push(line.to_string());
        } else {
            header_lines.push(line.to_string());
        }
    }

    debug!(
        "Separated {} header lines and {} data lines",
        header_lines.len(),
        data_lines.len()
    );

    (header_lines, data_lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_data_line() {
        assert!(loose_data_line("02:12:34\t1.5\t2.5"));
        assert!(loose_data_line("2025-04-23 02:12:34\t1.5"));
        assert!(!loose_data_line("02:12:34 1.5"));
        assert!(!loose_data_line("Time\tData Points"));
        assert!(!loose_data_line(""));
    }

    #[test]
    fn test_strict_data_line() {
        assert!(strict_data_line("2025-04-23 02:12:34\t1.5"));
        assert!(strict_data_line("12.5\t3.0"));
        assert!(!strict_data_line("02:12:34\t1.5"));
        assert!(!strict_data_line("12\t3.0"));
        assert!(!strict_data_line("Start Date\t2025-04-23"));
    }

    #[test]
    fn test_rules_disagree_on_time_of_day_rows() {
        let line = "02:12:34\t-80.1";
        assert!(is_data_line(line, DataLineRule::Loose));
        assert!(!is_data_line(line, DataLineRule::Strict));
    }

    #[test]
    fn test_separate_drops_blank_lines() {
        let lines = ["File Details:", "", "Client\tACME", "   ", "01:00:00\t1"];
        let (header, data) = separate(&lines);

        assert_eq!(header, vec!["File Details:", "Client\tACME"]);
        assert_eq!(data, vec!["01:00:00\t1"]);
    }

    #[test]
    fn test_separate_latches_into_data_section() {
        let lines = [
            "Client\tACME",
            "01:00:00\t1",
            "Client\tLATE",
            "not data at all",
            "01:00:01\t2",
        ];
        let (header, data) = separate(&lines);

        assert_eq!(header, vec!["Client\tACME"]);
        assert_eq!(
            data,
            vec!["01:00:00\t1", "Client\tLATE", "not data at all", "01:00:01\t2"]
        );
    }

    #[test]
    fn test_separate_accounts_for_every_non_blank_line() {
        let lines = [
            "  # File Details:  ",
            "Device\ticListen HF",
            "",
            "Time\tData Points\t10",
            "00:00:01\t5",
            "",
            "00:00:02\t6",
        ];
        let (header, data) = separate(&lines);

        let rejoined: Vec<String> = header.iter().chain(data.iter()).cloned().collect();
        let expected: Vec<String> = lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
        assert_eq!(rejoined, expected);
    }

    #[test]
    fn test_separate_with_strict_rule() {
        let lines = ["Client\tACME", "00:00:01\t5", "2025-04-23 00:00:02\t6"];
        let (header, data) = separate_with(&lines, DataLineRule::Strict);

        assert_eq!(header, vec!["Client\tACME", "00:00:01\t5"]);
        assert_eq!(data, vec!["2025-04-23 00:00:02\t6"]);
    }
}
