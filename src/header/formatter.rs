//! Ocean Sonics header reconstruction.
//!
//! Renders a metadata record back into the recorder's four-section layout
//! so that downstream analysis tools accept the exported file.

use crate::constants::{
    COMMENT_MARKER, DATA_COLUMN_HEADER_MARKER, DATA_COLUMN_HEADER_PREFIX, sections,
};
use crate::models::{CanonicalField, FileRecord, MetadataRecord};

const FILE_DETAILS_FIELDS: &[CanonicalField] = &[
    CanonicalField::FileType,
    CanonicalField::FileVersion,
    CanonicalField::StartDate,
    CanonicalField::StartTime,
    CanonicalField::Timezone,
    CanonicalField::Author,
    CanonicalField::Computer,
    CanonicalField::User,
    CanonicalField::Client,
    CanonicalField::Job,
    CanonicalField::Personnel,
    CanonicalField::StartingSample,
];

const DEVICE_DETAILS_FIELDS: &[CanonicalField] = &[
    CanonicalField::Device,
    CanonicalField::SerialNumber,
    CanonicalField::Firmware,
];

// The recorder writes both dB references ahead of the sample rate.
const SETUP_FIELDS: &[CanonicalField] = &[
    CanonicalField::DbRef1V,
    CanonicalField::DbRef1uPa,
    CanonicalField::SampleRate,
    CanonicalField::FftSize,
    CanonicalField::BinWidth,
    CanonicalField::WindowFunction,
    CanonicalField::Overlap,
    CanonicalField::PowerCalculation,
    CanonicalField::Accumulations,
];

/// Render a header for `metadata`, reproducing the data column header
/// line found in `original_header_lines` (if any) after `Data:`.
///
/// Lines are joined with `\n` and the result carries no trailing newline.
pub fn format_header<S: AsRef<str>>(metadata: &MetadataRecord, original_header_lines: &[S]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(32);

    for (label, fields) in [
        (sections::FILE_DETAILS, FILE_DETAILS_FIELDS),
        (sections::DEVICE_DETAILS, DEVICE_DETAILS_FIELDS),
        (sections::SETUP, SETUP_FIELDS),
    ] {
        lines.push(label.to_string());
        lines.extend(
            fields
                .iter()
                .map(|field| format!("{}\t{}", field.label(), metadata.value_or_empty(*field))),
        );
        lines.push(String::new());
    }

    lines.push(sections::DATA.to_string());
    if let Some(column_header) = find_data_column_header(original_header_lines) {
        lines.push(column_header);
    }

    lines.join("\n")
}

/// Render the header for a file record
pub fn format_record_header(record: &FileRecord) -> String {
    format_header(&record.metadata, &record.original_header_lines)
}

/// Locate the `Time ... Data Points` column header, without its comment marker
pub fn find_data_column_header<S: AsRef<str>>(header_lines: &[S]) -> Option<String> {
    header_lines.iter().find_map(|line| {
        let line = line.as_ref().trim();
        let line = line
            .strip_prefix(COMMENT_MARKER)
            .map(str::trim_start)
            .unwrap_or(line);

        (line.starts_with(DATA_COLUMN_HEADER_PREFIX) && line.contains(DATA_COLUMN_HEADER_MARKER))
            .then(|| line.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metadata() -> MetadataRecord {
        let mut metadata = MetadataRecord::new();
        metadata.set(CanonicalField::FileType, "Spectrum");
        metadata.set(CanonicalField::Client, "ACME Corp");
        metadata.set(CanonicalField::SerialNumber, "6120");
        metadata.set(CanonicalField::SampleRate, "512000");
        metadata
    }

    #[test]
    fn test_section_layout() {
        let header = format_header(&sample_metadata(), &["Time\tData Points\t1\t2"]);
        let lines: Vec<&str> = header.lines().collect();

        assert_eq!(lines[0], "File Details:");
        assert_eq!(lines[1], "File Type\tSpectrum");
        assert_eq!(lines[12], "Starting Sample\t");
        assert_eq!(lines[13], "");
        assert_eq!(lines[14], "Device Details:");
        assert_eq!(lines[16], "S/N\t6120");
        assert_eq!(lines[18], "");
        assert_eq!(lines[19], "Setup:");
        assert_eq!(lines[20], "dB Ref re 1V\t");
        assert_eq!(lines[22], "Sample Rate [S/s]\t512000");
        assert_eq!(lines[28], "Accumulations\t");
        assert_eq!(lines[29], "");
        assert_eq!(lines[30], "Data:");
        assert_eq!(lines[31], "Time\tData Points\t1\t2");
        assert_eq!(lines.len(), 32);
    }

    #[test]
    fn test_unset_fields_render_empty() {
        let header = format_header(&MetadataRecord::new(), &[] as &[&str]);

        for field in CanonicalField::ALL {
            let expected = format!("{}\t", field.label());
            assert!(
                header.lines().any(|line| line == expected),
                "missing line for {}",
                field
            );
        }
        assert!(header.ends_with("Data:"));
    }

    #[test]
    fn test_each_section_label_once() {
        let header = format_header(&sample_metadata(), &[] as &[&str]);
        for label in sections::ALL {
            assert_eq!(header.lines().filter(|line| line == label).count(), 1);
        }
    }

    #[test]
    fn test_commented_column_header_is_uncommented() {
        let lines = ["# Client\tACME", "# Time\tData Points\t10\t20"];
        assert_eq!(
            find_data_column_header(&lines).as_deref(),
            Some("Time\tData Points\t10\t20")
        );
    }

    #[test]
    fn test_column_header_requires_data_points_marker() {
        let lines = ["Time\tLevel", "Time Zone\tUTC"];
        assert_eq!(find_data_column_header(&lines), None);
    }
}
