//! Export run configuration.
//!
//! Options for a single export run, loaded in layers: built-in defaults,
//! then an optional JSON config file, then command-line overrides applied
//! by the CLI.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::error::{HydroError, Result};
use crate::session::OverridePolicy;

/// Options controlling one export run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Write a reconstructed Ocean Sonics header before the data
    pub include_headers: bool,

    /// Sort rows from all inputs by timestamp before a combined write
    pub merge_timestamps: bool,

    /// Keep source file names in individual mode
    pub preserve_filenames: bool,

    /// Append `_edited` to preserved file names
    pub add_suffix: bool,

    /// How header overrides are stored into parsed metadata
    pub override_policy: OverridePolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_headers: true,
            merge_timestamps: true,
            preserve_filenames: true,
            add_suffix: true,
            override_policy: OverridePolicy::Verbatim,
        }
    }
}

impl ExportConfig {
    pub fn with_headers(mut self, include_headers: bool) -> Self {
        self.include_headers = include_headers;
        self
    }

    pub fn with_merge_timestamps(mut self, merge_timestamps: bool) -> Self {
        self.merge_timestamps = merge_timestamps;
        self
    }

    pub fn with_preserve_filenames(mut self, preserve_filenames: bool) -> Self {
        self.preserve_filenames = preserve_filenames;
        self
    }

    pub fn with_suffix(mut self, add_suffix: bool) -> Self {
        self.add_suffix = add_suffix;
        self
    }

    pub fn with_override_policy(mut self, policy: OverridePolicy) -> Self {
        self.override_policy = policy;
        self
    }

    /// Location of the user-level config file, if the platform has one
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| HydroError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| HydroError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, overlaid by `explicit` or else the user config file if present
    pub fn load_layered(explicit: Option<&Path>) -> Result<Self> {
        let default_path = Self::default_config_path();
        let config_file = match explicit {
            Some(path) => Some(path),
            None => default_path.as_deref().filter(|path| path.exists()),
        };

        match config_file {
            Some(path) => {
                debug!("Loading export config from {}", path.display());
                Self::from_json_file(path)
            }
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
