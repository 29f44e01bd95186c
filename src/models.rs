//! Core data structures for hydrophone header processing.
//!
//! Defines the closed set of canonical header fields, the metadata record
//! built from them, per-file records, and export statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::HydroError;

/// Canonical Ocean Sonics header fields, declared in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    FileType,
    FileVersion,
    StartDate,
    StartTime,
    Timezone,
    Author,
    Computer,
    User,
    Client,
    Job,
    Personnel,
    StartingSample,
    Device,
    SerialNumber,
    Firmware,
    SampleRate,
    DbRef1V,
    DbRef1uPa,
    FftSize,
    BinWidth,
    WindowFunction,
    Overlap,
    PowerCalculation,
    Accumulations,
}

impl CanonicalField {
    /// Every field, in canonical order
    pub const ALL: [CanonicalField; 24] = [
        Self::FileType,
        Self::FileVersion,
        Self::StartDate,
        Self::StartTime,
        Self::Timezone,
        Self::Author,
        Self::Computer,
        Self::User,
        Self::Client,
        Self::Job,
        Self::Personnel,
        Self::StartingSample,
        Self::Device,
        Self::SerialNumber,
        Self::Firmware,
        Self::SampleRate,
        Self::DbRef1V,
        Self::DbRef1uPa,
        Self::FftSize,
        Self::BinWidth,
        Self::WindowFunction,
        Self::Overlap,
        Self::PowerCalculation,
        Self::Accumulations,
    ];

    /// Snake-case field name used in overrides and reports
    pub fn key(self) -> &'static str {
        match self {
            Self::FileType => "file_type",
            Self::FileVersion => "file_version",
            Self::StartDate => "start_date",
            Self::StartTime => "start_time",
            Self::Timezone => "timezone",
            Self::Author => "author",
            Self::Computer => "computer",
            Self::User => "user",
            Self::Client => "client",
            Self::Job => "job",
            Self::Personnel => "personnel",
            Self::StartingSample => "starting_sample",
            Self::Device => "device",
            Self::SerialNumber => "serial_number",
            Self::Firmware => "firmware",
            Self::SampleRate => "sample_rate",
            Self::DbRef1V => "db_ref_1v",
            Self::DbRef1uPa => "db_ref_1upa",
            Self::FftSize => "fft_size",
            Self::BinWidth => "bin_width",
            Self::WindowFunction => "window_function",
            Self::Overlap => "overlap",
            Self::PowerCalculation => "power_calculation",
            Self::Accumulations => "accumulations",
        }
    }

    /// Label written by the recorder in front of the tab separator
    pub fn label(self) -> &'static str {
        match self {
            Self::FileType => "File Type",
            Self::FileVersion => "File Version",
            Self::StartDate => "Start Date",
            Self::StartTime => "Start Time",
            Self::Timezone => "Time Zone",
            Self::Author => "Author",
            Self::Computer => "Computer",
            Self::User => "User",
            Self::Client => "Client",
            Self::Job => "Job",
            Self::Personnel => "Personnel",
            Self::StartingSample => "Starting Sample",
            Self::Device => "Device",
            Self::SerialNumber => "S/N",
            Self::Firmware => "Firmware",
            Self::SampleRate => "Sample Rate [S/s]",
            Self::DbRef1V => "dB Ref re 1V",
            Self::DbRef1uPa => "dB Ref re 1uPa",
            Self::FftSize => "FFT Size",
            Self::BinWidth => "Bin Width [Hz]",
            Self::WindowFunction => "Window Function",
            Self::Overlap => "Overlap [%]",
            Self::PowerCalculation => "Power Calculation",
            Self::Accumulations => "Accumulations",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CanonicalField {
    type Err = HydroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.key() == name)
            .ok_or_else(|| HydroError::UnknownField {
                name: s.to_string(),
            })
    }
}

/// Metadata parsed from (or destined for) an Ocean Sonics header
///
/// Iteration always follows canonical field order. Unset fields are absent
/// here and render as empty strings when formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataRecord {
    fields: BTreeMap<CanonicalField, String>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Value for `field`, or an empty string when unset
    pub fn value_or_empty(&self, field: CanonicalField) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn set(&mut self, field: CanonicalField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn remove(&mut self, field: CanonicalField) -> Option<String> {
        self.fields.remove(&field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

impl FromIterator<(CanonicalField, String)> for MetadataRecord {
    fn from_iter<I: IntoIterator<Item = (CanonicalField, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// One input file split into header and data sections
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub source_path: PathBuf,
    pub metadata: MetadataRecord,
    pub original_header_lines: Vec<String>,
    pub data_lines: Vec<String>,
}

impl FileRecord {
    /// File name of the source, for progress messages and logs
    pub fn display_name(&self) -> String {
        self.source_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// Export run statistics
#[derive(Debug, Default, Clone)]
pub struct ExportStats {
    pub files_requested: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub rows_written: usize,
    pub outputs: Vec<PathBuf>,
    pub processing_time_ms: u128,
}
