//! Error handling for hydrophone export operations.
//!
//! Configuration errors are rejected before any I/O, per-file read errors
//! are skipped by the pipeline, and write errors propagate to the caller.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HydroError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No files to export")]
    NoInputFiles,

    #[error("No output {what} specified")]
    MissingOutput { what: &'static str },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Unknown header field: {name}")]
    UnknownField { name: String },

    #[error("Invalid header override '{entry}', expected field=value")]
    InvalidOverride { entry: String },

    #[error("Failed to read file: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file: {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid override file: {path}")]
    OverrideFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config file: {path}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl HydroError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for errors that must abort the run rather than skip a single file
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NoInputFiles
                | Self::MissingOutput { .. }
                | Self::Configuration { .. }
                | Self::UnknownField { .. }
                | Self::InvalidOverride { .. }
                | Self::OverrideFile { .. }
                | Self::ConfigFile { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, HydroError>;
