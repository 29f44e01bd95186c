//! Integration tests for the export pipeline
//!
//! Exercises combined and individual exports against recorder files
//! written into temporary directories.

pub mod combined_export;

use std::fs;
use std::path::{Path, PathBuf};

/// Write a recorder file with the given client, start time and data rows
pub fn write_recording(dir: &Path, name: &str, client: &str, rows: &[&str]) -> PathBuf {
    let mut content = format!(
        "File Details:\n\
         File Type\tSpectrum\n\
         File Version\t5\n\
         Start Date\t2025-04-23\n\
         Start Time\t02:12:34\n\
         Time Zone\tUTC\n\
         Client\t{}\n\
         Job\tHarbour survey\n\
         \n\
         Device Details:\n\
         Device\ticListen HF\n\
         S/N\t6120\n\
         Firmware\tv2.6.20\n\
         \n\
         Setup:\n\
         Sample Rate [S/s]\t512000\n\
         FFT Size\t1024\n\
         \n\
         Data:\n\
         Time\tData Points\t1\t2\n",
        client
    );
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }

    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Data rows of an exported file, in output order
pub fn data_rows(content: &str) -> Vec<&str> {
    content
        .lines()
        .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()) && line.contains('\t'))
        .collect()
}
