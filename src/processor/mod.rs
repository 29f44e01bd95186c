//! Export pipeline with a read → merge → write structure.
//!
//! One run reads every input into a [`FileRecord`], applies session
//! header overrides, optionally merges rows chronologically, and writes
//! either one combined file or one file per input. Runs are synchronous
//! and keep no state between calls.

pub mod merge;
pub mod progress;
pub mod reader;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use self::merge::{TimestampedRow, merge, parse_timestamp};
pub use self::progress::{ProgressReporter, TerminalProgress};
pub use self::reader::FileProcessor;
pub use self::writer::{output_filename, write_combined, write_individual};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use crate::config::ExportConfig;
use crate::error::{HydroError, Result};
use crate::models::{ExportStats, FileRecord};
use crate::session::{OverrideSession, apply_overrides};

/// Runs combined and individual exports
#[derive(Debug, Clone, Default)]
pub struct ExportPipeline {
    config: ExportConfig,
    reader: FileProcessor,
}

impl ExportPipeline {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            reader: FileProcessor::default(),
        }
    }

    /// Replace the file reader
    pub fn with_reader(mut self, reader: FileProcessor) -> Self {
        self.reader = reader;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export `files` into the single file at `output_path`
    pub fn export_combined<P: AsRef<Path>>(
        &self,
        files: &[P],
        output_path: &Path,
        session: &OverrideSession,
        progress: &dyn ProgressReporter,
    ) -> Result<ExportStats> {
        let start_time = Instant::now();
        check_inputs(files, output_path, "path")?;
        warn_unmatched_overrides(files, session);

        let total = files.len();
        let mut stats = ExportStats {
            files_requested: total,
            ..Default::default()
        };

        let mut records = Vec::with_capacity(total);
        for (i, path) in files.iter().enumerate() {
            let path = path.as_ref();
            progress.report(
                i,
                total,
                &format!("Processing file {}/{}: {}", i + 1, total, file_name(path)),
            );
            match self.read_with_overrides(path, session) {
                Some(record) => records.push(record),
                None => stats.files_skipped += 1,
            }
        }
        stats.files_processed = records.len();

        if self.config.merge_timestamps {
            progress.report(total, total, "Sorting data chronologically...");
            records = merge(records, true);
        }

        progress.report(total, total, "Writing output file...");
        stats.rows_written = write_combined(output_path, &records, self.config.include_headers)?;
        stats.outputs.push(output_path.to_path_buf());
        stats.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Exported {} of {} files to {}",
            stats.files_processed,
            total,
            output_path.display()
        );
        Ok(stats)
    }

    /// Export each of `files` into its own file under `output_dir`
    pub fn export_individual<P: AsRef<Path>>(
        &self,
        files: &[P],
        output_dir: &Path,
        session: &OverrideSession,
        progress: &dyn ProgressReporter,
    ) -> Result<ExportStats> {
        let start_time = Instant::now();
        check_inputs(files, output_dir, "directory")?;
        warn_unmatched_overrides(files, session);
        let planned = self.plan_outputs(files, output_dir)?;

        if !output_dir.exists() {
            fs::create_dir_all(output_dir).map_err(|source| HydroError::WriteFailed {
                path: output_dir.to_path_buf(),
                source,
            })?;
        }

        let total = files.len();
        let mut stats = ExportStats {
            files_requested: total,
            ..Default::default()
        };

        for (i, (path, output_path)) in files.iter().zip(planned).enumerate() {
            let path = path.as_ref();
            progress.report(i, total, &format!("Processing {}...", file_name(path)));

            let Some(record) = self.read_with_overrides(path, session) else {
                stats.files_skipped += 1;
                continue;
            };

            stats.rows_written +=
                write_individual(&output_path, &record, self.config.include_headers)?;
            stats.files_processed += 1;
            stats.outputs.push(output_path);
        }

        progress.report(total, total, "Export complete");
        stats.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Exported {} individual files to {}",
            stats.files_processed,
            output_dir.display()
        );
        Ok(stats)
    }

    /// Output path for each input; two inputs may not share one
    fn plan_outputs<P: AsRef<Path>>(&self, files: &[P], output_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut claimed: HashMap<PathBuf, &Path> = HashMap::with_capacity(files.len());
        let mut planned = Vec::with_capacity(files.len());

        for (i, path) in files.iter().enumerate() {
            let path = path.as_ref();
            let output_path = output_dir.join(output_filename(path, i, &self.config));
            if let Some(previous) = claimed.insert(output_path.clone(), path) {
                return Err(HydroError::configuration(format!(
                    "Inputs {} and {} both export to {}",
                    previous.display(),
                    path.display(),
                    output_path.display()
                )));
            }
            planned.push(output_path);
        }
        Ok(planned)
    }

    fn read_with_overrides(&self, path: &Path, session: &OverrideSession) -> Option<FileRecord> {
        let mut record = self.reader.process(path)?;
        let overrides = session.overrides_for(path);
        if !overrides.is_empty() {
            apply_overrides(
                &mut record.metadata,
                &overrides,
                self.config.override_policy,
                self.reader.parser().zones(),
            );
        }
        Some(record)
    }
}

fn check_inputs<P: AsRef<Path>>(files: &[P], output: &Path, what: &'static str) -> Result<()> {
    if files.is_empty() {
        return Err(HydroError::NoInputFiles);
    }
    if output.as_os_str().is_empty() {
        return Err(HydroError::MissingOutput { what });
    }
    Ok(())
}

fn warn_unmatched_overrides<P: AsRef<Path>>(files: &[P], session: &OverrideSession) {
    for key in session.unmatched_files(files) {
        warn!("Header overrides for {} match no input file", key.display());
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
