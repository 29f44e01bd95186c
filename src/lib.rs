//! Hydrophone Export Library
//!
//! Reads Ocean Sonics hydrophone recorder text files, normalizes their
//! loosely structured headers into a fixed set of canonical fields, and
//! re-exports the data either as one combined, chronologically merged file
//! or as one file per input with a rebuilt header.
//!
//! This library provides tools for:
//! - Separating header lines from tab-delimited data rows
//! - Mapping free-form header keys onto canonical fields, with date and
//!   timezone normalization and filename date inference
//! - Rebuilding headers in the recorder's four-section layout
//! - Merging rows from several recordings by timestamp
//! - Session-scoped header overrides applied at export time

pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod header;
pub mod models;
pub mod processor;
pub mod rules;
pub mod session;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::ExportConfig;
pub use error::{HydroError, Result};
pub use header::{HeaderParser, format_header, parse_header, validate_metadata};
pub use models::{CanonicalField, ExportStats, FileRecord, MetadataRecord};
pub use processor::{ExportPipeline, ProgressReporter};
pub use session::{MetadataOverrides, OverridePolicy, OverrideSession};
