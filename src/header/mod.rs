//! Ocean Sonics header parsing and metadata extraction.
//!
//! Turns loosely structured header text into a [`MetadataRecord`]: each
//! line is split into a key/value pair, the key is mapped onto a canonical
//! field, and missing start dates are inferred from the file name.

pub mod dates;
pub mod formatter;
pub mod line;
pub mod mapper;
pub mod timezone;

pub use dates::{date_from_filename, normalize_date};
pub use formatter::{find_data_column_header, format_header, format_record_header};
pub use line::parse_line;
pub use mapper::{FieldMapper, MappingMode};
pub use timezone::{BuiltinZones, ZoneCatalog, normalize_timezone, normalize_timezone_with};

use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::classify::DataLineRule;
use crate::constants::{DEFAULT_TIMEZONE, HEADER_SCAN_LIMIT};
use crate::error::{HydroError, Result};
use crate::models::{CanonicalField, MetadataRecord};

/// Parses header lines into a metadata record
#[derive(Debug, Clone)]
pub struct HeaderParser {
    mapper: FieldMapper,
    scan_limit: usize,
}

impl HeaderParser {
    pub fn new(mode: MappingMode) -> Self {
        Self {
            mapper: FieldMapper::new(mode),
            scan_limit: HEADER_SCAN_LIMIT,
        }
    }

    /// Parser used when splitting files for export
    pub fn export() -> Self {
        Self::new(MappingMode::Export)
    }

    /// Parser used when loading a file into the header editor
    pub fn editor() -> Self {
        Self::new(MappingMode::Editor)
    }

    pub fn with_zones(mut self, zones: Arc<dyn ZoneCatalog>) -> Self {
        self.mapper = self.mapper.with_zones(zones);
        self
    }

    pub fn with_scan_limit(mut self, scan_limit: usize) -> Self {
        self.scan_limit = scan_limit;
        self
    }

    /// Zone catalog used for timezone values
    pub fn zones(&self) -> &dyn ZoneCatalog {
        self.mapper.zones()
    }

    /// Parse already separated header lines belonging to `source`
    pub fn parse_lines<S: AsRef<str>>(&self, lines: &[S], source: &Path) -> MetadataRecord {
        let mut metadata = MetadataRecord::new();
        for line in lines {
            self.parse_into(line.as_ref(), &mut metadata);
        }
        self.finish(&mut metadata, source);
        metadata
    }

    /// Parse the header of a file on disk.
    ///
    /// Reads at most the scan limit of lines and stops at the first line that
    /// passes the strict data-line test.
    pub fn parse_file(&self, file_path: &Path) -> Result<MetadataRecord> {
        let file = File::open(file_path).map_err(|source| HydroError::ReadFailed {
            path: file_path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut metadata = MetadataRecord::new();
        for line in reader.lines().take(self.scan_limit) {
            let line = line.map_err(|source| HydroError::ReadFailed {
                path: file_path.to_path_buf(),
                source,
            })?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if DataLineRule::Strict.matches(line) {
                break;
            }
            self.parse_into(line, &mut metadata);
        }

        self.finish(&mut metadata, file_path);
        info!(
            "Parsed {} metadata fields from {}",
            metadata.len(),
            file_path.display()
        );
        Ok(metadata)
    }

    fn parse_into(&self, line: &str, metadata: &mut MetadataRecord) {
        let Some((key, value)) = parse_line(line) else {
            return;
        };
        if key.is_empty() || value.is_empty() {
            return;
        }
        self.mapper.map_field(&key, &value, metadata);
    }

    fn finish(&self, metadata: &mut MetadataRecord, source: &Path) {
        if !metadata.contains(CanonicalField::StartDate) {
            if let Some(date) = date_from_filename(source) {
                metadata.set(CanonicalField::StartDate, date);
            }
        }
        if !metadata.contains(CanonicalField::Timezone) {
            debug!("No timezone in header of {}, using {}", source.display(), DEFAULT_TIMEZONE);
            metadata.set(CanonicalField::Timezone, DEFAULT_TIMEZONE);
        }
    }
}

/// Parse a file's header the way the header editor does
pub fn parse_header(file_path: &Path) -> Result<MetadataRecord> {
    HeaderParser::editor().parse_file(file_path)
}

/// Advisory checks run before export; returns human-readable problems
pub fn validate_metadata(metadata: &MetadataRecord) -> Vec<String> {
    let mut problems = Vec::new();

    for field in [CanonicalField::Client, CanonicalField::Job] {
        if metadata.value_or_empty(field).trim().is_empty() {
            problems.push(format!("Missing required field: {}", field));
        }
    }

    let start_date = metadata.value_or_empty(CanonicalField::StartDate);
    if !start_date.is_empty() && NaiveDate::parse_from_str(start_date, "%Y-%m-%d").is_err() {
        problems.push("Invalid date format (should be YYYY-MM-DD)".to_string());
    }

    problems
}
