//! Chronological merge of data rows across files.
//!
//! Rows from every record are ordered by the timestamp in their first
//! column and regrouped into runs that keep a link to the header metadata
//! of the file each row came from.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::constants::timestamp_formats;
use crate::models::{FileRecord, MetadataRecord};
use crate::rules::Cascade;

/// Date assigned to time-of-day stamps so they order among full date-times
const TIME_ONLY_DATE: (i32, u32, u32) = (1900, 1, 1);

static TIMESTAMP_CASCADE: LazyLock<Cascade<'static, str, NaiveDateTime>> = LazyLock::new(|| {
    let mut cascade = Cascade::new("timestamp").rule(timestamp_formats::TIME_ONLY, |raw: &str| {
        let time = NaiveTime::parse_from_str(raw, timestamp_formats::TIME_ONLY).ok()?;
        let (year, month, day) = TIME_ONLY_DATE;
        NaiveDate::from_ymd_opt(year, month, day).map(|date| date.and_time(time))
    });
    for &format in timestamp_formats::DATETIME {
        cascade = cascade.rule(format, move |raw: &str| {
            NaiveDateTime::parse_from_str(raw, format).ok()
        });
    }
    cascade
});

/// A data row projected for sorting, borrowing from its owning record
#[derive(Debug, Clone, Copy)]
pub struct TimestampedRow<'a> {
    pub timestamp: Option<NaiveDateTime>,
    pub raw_line: &'a str,
    pub source: &'a FileRecord,
}

impl<'a> TimestampedRow<'a> {
    pub fn new(raw_line: &'a str, source: &'a FileRecord) -> Self {
        Self {
            timestamp: extract_timestamp(raw_line),
            raw_line,
            source,
        }
    }

    pub fn source_path(&self) -> &'a Path {
        &self.source.source_path
    }

    pub fn metadata(&self) -> &'a MetadataRecord {
        &self.source.metadata
    }
}

/// Parse a timestamp string using the supported formats, first match wins
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_CASCADE.apply(raw.trim())
}

/// Timestamp from the first tab-delimited column of a data row
pub fn extract_timestamp(line: &str) -> Option<NaiveDateTime> {
    line.split('\t').next().and_then(parse_timestamp)
}

/// Optionally reorder records chronologically.
///
/// With `chronological == false` the records are returned untouched.
/// Otherwise rows from every record are stably sorted by timestamp, rows
/// without one last, and regrouped into consecutive same-file runs.
pub fn merge(records: Vec<FileRecord>, chronological: bool) -> Vec<FileRecord> {
    if !chronological {
        return records;
    }

    let mut rows = flatten(&records);
    sort_rows(&mut rows);
    let merged = regroup(&rows);

    debug!(
        "Chronological merge: {} rows from {} files into {} groups",
        rows.len(),
        records.len(),
        merged.len()
    );

    merged
}

/// Project every data line of every record, preserving input order
pub fn flatten(records: &[FileRecord]) -> Vec<TimestampedRow<'_>> {
    records
        .iter()
        .flat_map(|record| {
            record
                .data_lines
                .iter()
                .map(move |line| TimestampedRow::new(line, record))
        })
        .collect()
}

/// Stable ascending sort; rows without a timestamp go last
pub fn sort_rows(rows: &mut [TimestampedRow<'_>]) {
    rows.sort_by_key(|row| (row.timestamp.is_none(), row.timestamp));
}

/// Rebuild records from sorted rows, starting a new group whenever the
/// source file changes
pub fn regroup(rows: &[TimestampedRow<'_>]) -> Vec<FileRecord> {
    let mut groups: Vec<FileRecord> = Vec::new();

    for row in rows {
        match groups.last_mut() {
            Some(group) if group.source_path == row.source_path() => {
                group.data_lines.push(row.raw_line.to_string());
            }
            _ => groups.push(FileRecord {
                source_path: row.source_path().to_path_buf(),
                metadata: row.metadata().clone(),
                original_header_lines: row.source.original_header_lines.clone(),
                data_lines: vec![row.raw_line.to_string()],
            }),
        }
    }

    groups
}
