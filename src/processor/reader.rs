//! Per-file reading: split a file into header and data and parse its header.

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::classify::separate;
use crate::error::{HydroError, Result};
use crate::header::HeaderParser;
use crate::models::FileRecord;

/// Reads one input file into a [`FileRecord`]
#[derive(Debug, Clone)]
pub struct FileProcessor {
    parser: HeaderParser,
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new(HeaderParser::export())
    }
}

impl FileProcessor {
    pub fn new(parser: HeaderParser) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &HeaderParser {
        &self.parser
    }

    /// Read `file_path`, logging and returning `None` on failure so the
    /// caller can skip the file and carry on
    pub fn process(&self, file_path: &Path) -> Option<FileRecord> {
        match self.try_process(file_path) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping {}: {}", file_path.display(), error_chain(&e));
                None
            }
        }
    }

    /// Read `file_path`, surfacing read and decode failures
    pub fn try_process(&self, file_path: &Path) -> Result<FileRecord> {
        let content = fs::read_to_string(file_path).map_err(|source| HydroError::ReadFailed {
            path: file_path.to_path_buf(),
            source,
        })?;

        let lines: Vec<&str> = content.lines().collect();
        let (header_lines, data_lines) = separate(&lines);
        let metadata = self.parser.parse_lines(&header_lines, file_path);

        debug!(
            "Read {}: {} header lines, {} data lines, {} metadata fields",
            file_path.display(),
            header_lines.len(),
            data_lines.len(),
            metadata.len()
        );

        Ok(FileRecord {
            source_path: file_path.to_path_buf(),
            metadata,
            original_header_lines: header_lines,
            data_lines,
        })
    }
}

fn error_chain(error: &HydroError) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
