//! Mapping of free-form header keys onto canonical fields.
//!
//! Keys are matched by substring against an ordered pattern table. The
//! first field with a matching pattern wins, so table order is significant.

use std::sync::Arc;
use tracing::{debug, trace};

use super::dates::normalize_date;
use super::timezone::{BuiltinZones, ZoneCatalog, normalize_timezone_with};
use crate::models::{CanonicalField, MetadataRecord};

/// Canonical fields and the lower-case key fragments that select them
pub const FIELD_PATTERNS: &[(CanonicalField, &[&str])] = &[
    (CanonicalField::FileType, &["file type"]),
    (CanonicalField::FileVersion, &["file version"]),
    (CanonicalField::StartDate, &["start date", "recording date"]),
    (CanonicalField::StartTime, &["start time"]),
    (CanonicalField::Timezone, &["timezone", "time zone", "tz"]),
    (CanonicalField::Author, &["author"]),
    (CanonicalField::Computer, &["computer"]),
    (CanonicalField::User, &["user"]),
    (CanonicalField::Client, &["client"]),
    (CanonicalField::Job, &["job"]),
    (CanonicalField::Personnel, &["personnel"]),
    (CanonicalField::StartingSample, &["starting sample"]),
    (CanonicalField::Device, &["device"]),
    (CanonicalField::SerialNumber, &["s/n", "serial"]),
    (CanonicalField::Firmware, &["firmware"]),
    (CanonicalField::SampleRate, &["sample rate"]),
    (CanonicalField::DbRef1V, &["db ref re 1v"]),
    (CanonicalField::DbRef1uPa, &["db ref re 1upa"]),
    (CanonicalField::FftSize, &["fft size"]),
    (CanonicalField::BinWidth, &["bin width"]),
    (CanonicalField::WindowFunction, &["window function"]),
    (CanonicalField::Overlap, &["overlap"]),
    (CanonicalField::PowerCalculation, &["power calculation"]),
    (CanonicalField::Accumulations, &["accumulations"]),
];

const FALLBACK_DATE_SUBJECTS: &[&str] = &["start", "recording", "generated", "created"];
const FALLBACK_DATE_KINDS: &[&str] = &["date", "time"];

/// Which caller the mapper is serving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingMode {
    /// File export: pattern table only
    Export,
    /// Header editor: pattern table plus the start-date fallback pass
    Editor,
}

/// Routes parsed header pairs into a [`MetadataRecord`]
#[derive(Debug, Clone)]
pub struct FieldMapper {
    mode: MappingMode,
    zones: Arc<dyn ZoneCatalog>,
}

impl FieldMapper {
    pub fn new(mode: MappingMode) -> Self {
        Self {
            mode,
            zones: Arc::new(BuiltinZones),
        }
    }

    /// Use `zones` to validate timezone names outside the alias table
    pub fn with_zones(mut self, zones: Arc<dyn ZoneCatalog>) -> Self {
        self.zones = zones;
        self
    }

    pub fn mode(&self) -> MappingMode {
        self.mode
    }

    pub fn zones(&self) -> &dyn ZoneCatalog {
        self.zones.as_ref()
    }

    /// Map a lower-cased key and its value into `record`.
    ///
    /// Returns the field that was written, if any. Unmatched keys are
    /// dropped.
    pub fn map_field(
        &self,
        key: &str,
        value: &str,
        record: &mut MetadataRecord,
    ) -> Option<CanonicalField> {
        trace!("Mapping header field: '{}' = '{}'", key, value);

        let matched = FIELD_PATTERNS
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|pattern| key.contains(pattern)));

        match matched {
            Some((field, _)) => self.store(*field, key, value, record),
            None if self.mode == MappingMode::Editor => self.fallback_start_date(key, value, record),
            None => {
                trace!("Dropping unrecognised header key '{}'", key);
                None
            }
        }
    }

    fn store(
        &self,
        field: CanonicalField,
        key: &str,
        value: &str,
        record: &mut MetadataRecord,
    ) -> Option<CanonicalField> {
        match field {
            CanonicalField::StartDate => match normalize_date(value) {
                Some(date) => {
                    record.set(field, date);
                    Some(field)
                }
                None => {
                    debug!("Ignoring unparseable start date '{}'", value);
                    None
                }
            },
            CanonicalField::Timezone => {
                record.set(field, normalize_timezone_with(value, self.zones.as_ref()));
                Some(field)
            }
            CanonicalField::Device if key.contains("s/n") => {
                record.set(CanonicalField::SerialNumber, value);
                Some(CanonicalField::SerialNumber)
            }
            _ => {
                record.set(field, value);
                Some(field)
            }
        }
    }

    fn fallback_start_date(
        &self,
        key: &str,
        value: &str,
        record: &mut MetadataRecord,
    ) -> Option<CanonicalField> {
        let is_date_key = FALLBACK_DATE_SUBJECTS.iter().any(|s| key.contains(s))
            && FALLBACK_DATE_KINDS.iter().any(|k| key.contains(k));
        if !is_date_key || record.contains(CanonicalField::StartDate) {
            return None;
        }

        let date = normalize_date(value)?;
        debug!("Inferred start date from '{}': {}", key, date);
        record.set(CanonicalField::StartDate, date);
        Some(CanonicalField::StartDate)
    }
}
