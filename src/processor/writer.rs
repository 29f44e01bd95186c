//! Output writing for combined and individual exports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::config::ExportConfig;
use crate::constants::{EDITED_SUFFIX, SEQUENTIAL_PREFIX};
use crate::error::{HydroError, Result};
use crate::header::format_record_header;
use crate::models::FileRecord;

/// Write every record's data into one file, headed by the first record's header.
///
/// Returns the number of data rows written. An empty `records` slice still
/// produces an (empty) output file.
pub fn write_combined(output_path: &Path, records: &[FileRecord], include_headers: bool) -> Result<usize> {
    let header = records
        .first()
        .filter(|_| include_headers)
        .map(format_record_header);

    let rows = records.iter().flat_map(|record| record.data_lines.iter());
    let written = write_output(output_path, header.as_deref(), rows)?;

    info!("Output file written: {} ({} rows)", output_path.display(), written);
    Ok(written)
}

/// Write a single record in its original per-file layout
pub fn write_individual(output_path: &Path, record: &FileRecord, include_headers: bool) -> Result<usize> {
    let header = include_headers.then(|| format_record_header(record));
    let written = write_output(output_path, header.as_deref(), record.data_lines.iter())?;

    info!(
        "Individual file written: {} ({} rows)",
        output_path.display(),
        written
    );
    Ok(written)
}

fn write_output<'a>(
    output_path: &Path,
    header: Option<&str>,
    rows: impl Iterator<Item = &'a String>,
) -> Result<usize> {
    let write_failed = |source| HydroError::WriteFailed {
        path: output_path.to_path_buf(),
        source,
    };

    let file = File::create(output_path).map_err(write_failed)?;
    let mut writer = BufWriter::new(file);

    if let Some(header) = header {
        writeln!(writer, "{}", header).map_err(write_failed)?;
    }

    let mut written = 0;
    for row in rows {
        writeln!(writer, "{}", row).map_err(write_failed)?;
        written += 1;
    }

    writer.flush().map_err(write_failed)?;
    Ok(written)
}

/// Output file name for the input at `index` (zero-based) in individual mode
pub fn output_filename(source: &Path, index: usize, config: &ExportConfig) -> String {
    let stem = source
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();
    let extension = source
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    match (config.preserve_filenames, config.add_suffix) {
        (true, true) => format!("{}{}{}", stem, EDITED_SUFFIX, extension),
        (true, false) => format!("{}{}", stem, extension),
        (false, _) => format!("{}{:03}{}", SEQUENTIAL_PREFIX, index + 1, extension),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CanonicalField, MetadataRecord};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn record(name: &str, client: &str, lines: &[&str]) -> FileRecord {
        let mut metadata = MetadataRecord::new();
        metadata.set(CanonicalField::Client, client);
        FileRecord {
            source_path: PathBuf::from(name),
            metadata,
            original_header_lines: vec!["Time\tData Points\t1".to_string()],
            data_lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_output_filename_variants() {
        let source = Path::new("/data/foo.txt");
        let config = ExportConfig::default();

        assert_eq!(output_filename(source, 0, &config), "foo_edited.txt");
        assert_eq!(
            output_filename(source, 0, &config.clone().with_suffix(false)),
            "foo.txt"
        );
        assert_eq!(
            output_filename(source, 1, &config.with_preserve_filenames(false)),
            "exported_002.txt"
        );
    }

    #[test]
    fn test_output_filename_without_extension() {
        let config = ExportConfig::default();
        assert_eq!(output_filename(Path::new("raw"), 0, &config), "raw_edited");
    }

    #[test]
    fn test_combined_uses_first_header_and_concatenates() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("combined.txt");
        let records = vec![
            record("a.txt", "First", &["00:00:01\t1"]),
            record("b.txt", "Second", &["00:00:02\t2", "00:00:03\t3"]),
        ];

        let written = write_combined(&output, &records, true).unwrap();
        let content = fs::read_to_string(&output).unwrap();

        assert_eq!(written, 3);
        assert!(content.contains("Client\tFirst\n"));
        assert!(!content.contains("Second"));
        assert!(content.ends_with(
            "Data:\nTime\tData Points\t1\n00:00:01\t1\n00:00:02\t2\n00:00:03\t3\n"
        ));
    }

    #[test]
    fn test_combined_without_headers() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("combined.txt");
        let records = vec![record("a.txt", "First", &["00:00:01\t1"])];

        write_combined(&output, &records, false).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "00:00:01\t1\n");
    }

    #[test]
    fn test_combined_with_no_records_writes_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("combined.txt");

        assert_eq!(write_combined(&output, &[], true).unwrap(), 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_individual_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("a_edited.txt");
        fs::write(&output, "stale contents").unwrap();

        write_individual(&output, &record("a.txt", "A", &["00:00:01\t1"]), true).unwrap();
        let content = fs::read_to_string(&output).unwrap();

        assert!(content.starts_with("File Details:\n"));
        assert!(!content.contains("stale"));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("missing").join("out.txt");

        assert!(matches!(
            write_individual(&output, &record("a.txt", "A", &[]), true),
            Err(HydroError::WriteFailed { .. })
        ));
    }
}
