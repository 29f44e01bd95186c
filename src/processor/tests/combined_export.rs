//! Combined export tests

use super::{data_rows, write_recording};
use crate::config::ExportConfig;
use crate::error::HydroError;
use crate::processor::ExportPipeline;
use crate::processor::progress::silent;
use crate::session::OverrideSession;
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_combined_has_one_header() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        write_recording(temp_dir.path(), "a.txt", "ACME", &["02:12:34\t-80.1\t-79.5"]),
        write_recording(temp_dir.path(), "b.txt", "Other", &["02:12:35\t-80.3\t-79.2"]),
        write_recording(temp_dir.path(), "c.txt", "Third", &["02:12:36\t-81.0\t-78.8"]),
    ];
    let output = temp_dir.path().join("combined.txt");

    let stats = ExportPipeline::default()
        .export_combined(&files, &output, &OverrideSession::new(), &silent)
        .unwrap();

    let content = fs::read_to_string(&output).unwrap();
    for label in ["File Details:", "Device Details:", "Setup:", "Data:"] {
        assert_eq!(content.matches(label).count(), 1, "label {}", label);
    }
    assert_eq!(content.matches("Time\tData Points\t1\t2").count(), 1);
    assert!(content.contains("Client\tACME\n"));
    assert_eq!(data_rows(&content).len(), 3);

    assert_eq!(stats.files_requested, 3);
    assert_eq!(stats.files_processed, 3);
    assert_eq!(stats.files_skipped, 0);
    assert_eq!(stats.rows_written, 3);
    assert_eq!(stats.outputs, vec![output]);
}

#[test]
fn test_combined_preserves_input_order_without_merge() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        write_recording(temp_dir.path(), "late.txt", "Late", &["02:30:00\tlate"]),
        write_recording(temp_dir.path(), "early.txt", "Early", &["01:00:00\tearly"]),
    ];
    let output = temp_dir.path().join("combined.txt");
    let pipeline = ExportPipeline::new(ExportConfig::default().with_merge_timestamps(false));

    pipeline
        .export_combined(&files, &output, &OverrideSession::new(), &silent)
        .unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(data_rows(&content), vec!["02:30:00\tlate", "01:00:00\tearly"]);
    assert!(content.contains("Client\tLate\n"));
}

#[test]
fn test_combined_without_headers_is_data_only() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![write_recording(
        temp_dir.path(),
        "a.txt",
        "ACME",
        &["02:12:34\t1", "02:12:35\t2"],
    )];
    let output = temp_dir.path().join("combined.txt");
    let pipeline = ExportPipeline::new(ExportConfig::default().with_headers(false));

    pipeline
        .export_combined(&files, &output, &OverrideSession::new(), &silent)
        .unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "02:12:34\t1\n02:12:35\t2\n"
    );
}

#[test]
fn test_unreadable_file_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        temp_dir.path().join("missing.txt"),
        write_recording(temp_dir.path(), "b.txt", "ACME", &["02:12:35\t2"]),
    ];
    let output = temp_dir.path().join("combined.txt");

    let stats = ExportPipeline::default()
        .export_combined(&files, &output, &OverrideSession::new(), &silent)
        .unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(data_rows(&fs::read_to_string(&output).unwrap()), vec!["02:12:35\t2"]);
}

#[test]
fn test_all_files_skipped_writes_empty_output() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![temp_dir.path().join("missing.txt")];
    let output = temp_dir.path().join("combined.txt");

    let stats = ExportPipeline::default()
        .export_combined(&files, &output, &OverrideSession::new(), &silent)
        .unwrap();

    assert_eq!(stats.files_processed, 0);
    assert_eq!(stats.rows_written, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn test_configuration_errors_before_io() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("combined.txt");
    let pipeline = ExportPipeline::default();

    let no_files: Vec<PathBuf> = Vec::new();
    let err = pipeline
        .export_combined(&no_files, &output, &OverrideSession::new(), &silent)
        .unwrap_err();
    assert!(matches!(err, HydroError::NoInputFiles));
    assert!(err.is_configuration());

    let files = vec![temp_dir.path().join("a.txt")];
    let err = pipeline
        .export_combined(&files, PathBuf::new().as_path(), &OverrideSession::new(), &silent)
        .unwrap_err();
    assert!(matches!(err, HydroError::MissingOutput { what: "path" }));

    assert!(!output.exists());
}

#[test]
fn test_write_failure_propagates() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![write_recording(temp_dir.path(), "a.txt", "ACME", &["02:12:34\t1"])];
    let output = temp_dir.path().join("no-such-dir").join("combined.txt");

    let result = ExportPipeline::default().export_combined(
        &files,
        &output,
        &OverrideSession::new(),
        &silent,
    );
    assert!(matches!(result, Err(HydroError::WriteFailed { .. })));
}

#[test]
fn test_global_overrides_reach_header() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![write_recording(temp_dir.path(), "a.txt", "ACME", &["02:12:34\t1"])];
    let output = temp_dir.path().join("combined.txt");

    let mut session = OverrideSession::new();
    session.set_global(crate::models::CanonicalField::Client, "Port Authority");
    session.set_global(crate::models::CanonicalField::Personnel, "J. Doe");

    ExportPipeline::default()
        .export_combined(&files, &output, &session, &silent)
        .unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("Client\tPort Authority\n"));
    assert!(content.contains("Personnel\tJ. Doe\n"));
    assert!(!content.contains("Client\tACME"));
}

#[test]
fn test_progress_checkpoints() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        write_recording(temp_dir.path(), "a.txt", "ACME", &["02:12:34\t1"]),
        write_recording(temp_dir.path(), "b.txt", "ACME", &["02:12:35\t2"]),
    ];
    let output = temp_dir.path().join("combined.txt");

    let reports = RefCell::new(Vec::new());
    let reporter = |current: usize, total: usize, message: &str| {
        reports.borrow_mut().push((current, total, message.to_string()));
    };

    ExportPipeline::default()
        .export_combined(&files, &output, &OverrideSession::new(), &reporter)
        .unwrap();

    let reports = reports.into_inner();
    let messages: Vec<&str> = reports.iter().map(|(_, _, m)| m.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Processing file 1/2: a.txt",
            "Processing file 2/2: b.txt",
            "Sorting data chronologically...",
            "Writing output file...",
        ]
    );
    assert_eq!((reports[0].0, reports[0].1), (0, 2));
    assert_eq!((reports[3].0, reports[3].1), (2, 2));
}
