//! Header overrides collected during an editing session.
//!
//! The session owns every operator correction, keyed by file path, and is
//! handed to the export pipeline by reference. Nothing here outlives the
//! orchestrating layer that created it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{HydroError, Result};
use crate::header::{ZoneCatalog, normalize_date, normalize_timezone_with};
use crate::models::{CanonicalField, MetadataRecord};

/// Replacement values for a subset of canonical fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataOverrides {
    values: BTreeMap<CanonicalField, String>,
}

impl MetadataOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: CanonicalField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Layer `other` on top of these overrides
    pub fn merge_from(&mut self, other: &MetadataOverrides) {
        for (field, value) in other.iter() {
            self.set(field, value);
        }
    }

    /// Parse a `field=value` assignment, as given on the command line
    pub fn parse_assignment(entry: &str) -> Result<(CanonicalField, String)> {
        let (field, value) = entry
            .split_once('=')
            .ok_or_else(|| HydroError::InvalidOverride {
                entry: entry.to_string(),
            })?;
        Ok((field.parse()?, value.to_string()))
    }
}

impl FromIterator<(CanonicalField, String)> for MetadataOverrides {
    fn from_iter<I: IntoIterator<Item = (CanonicalField, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// How override values are stored into parsed metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePolicy {
    /// Store values exactly as supplied
    #[default]
    Verbatim,
    /// Route `start_date` and `timezone` through header normalization
    Normalize,
}

/// Shallow-merge `overrides` into `metadata`
///
/// Under [`OverridePolicy::Normalize`] timezone values resolve through
/// `zones`, the same catalog the header parser uses.
pub fn apply_overrides(
    metadata: &mut MetadataRecord,
    overrides: &MetadataOverrides,
    policy: OverridePolicy,
    zones: &dyn ZoneCatalog,
) {
    for (field, value) in overrides.iter() {
        match (policy, field) {
            (OverridePolicy::Normalize, CanonicalField::StartDate) => match normalize_date(value) {
                Some(date) => metadata.set(field, date),
                None => warn!("Ignoring start date override '{}': unrecognised format", value),
            },
            (OverridePolicy::Normalize, CanonicalField::Timezone) => {
                metadata.set(field, normalize_timezone_with(value, zones))
            }
            _ => metadata.set(field, value),
        }
    }
}

/// Per-session override store: values for every file plus per-file edits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverrideSession {
    #[serde(default)]
    all: MetadataOverrides,
    #[serde(default)]
    files: HashMap<PathBuf, MetadataOverrides>,
}

impl OverrideSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a session from JSON: `{"all": {...}, "files": {"path": {...}}}`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| HydroError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let session: Self =
            serde_json::from_str(&content).map_err(|source| HydroError::OverrideFile {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            "Loaded {} global and {} per-file overrides from {}",
            session.all.len(),
            session.files.len(),
            path.display()
        );
        Ok(session)
    }

    /// Set a value applied to every file
    pub fn set_global(&mut self, field: CanonicalField, value: impl Into<String>) {
        self.all.set(field, value);
    }

    pub fn global(&self) -> &MetadataOverrides {
        &self.all
    }

    /// Store the same overrides for each of `paths`
    pub fn apply_to_all<P: AsRef<Path>>(&mut self, paths: &[P], overrides: &MetadataOverrides) {
        for path in paths {
            self.set_for_file(path.as_ref(), overrides.clone());
        }
        debug!("Applied header overrides to {} files", paths.len());
    }

    pub fn set_for_file(&mut self, path: &Path, overrides: MetadataOverrides) {
        self.files.insert(path.to_path_buf(), overrides);
    }

    pub fn clear_file(&mut self, path: &Path) -> Option<MetadataOverrides> {
        self.files.remove(path)
    }

    /// Effective overrides for `path`: per-file values over global ones
    ///
    /// Per-file keys match by exact path first, then by canonical path, so
    /// `./a.txt` and an absolute path to the same file share overrides.
    pub fn overrides_for(&self, path: &Path) -> MetadataOverrides {
        let mut effective = self.all.clone();
        if let Some(file_overrides) = self.file_entry(path) {
            effective.merge_from(file_overrides);
        }
        effective
    }

    /// Per-file keys that match none of `paths`
    pub fn unmatched_files<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<&Path> {
        let wanted: HashSet<PathBuf> = paths
            .iter()
            .flat_map(|p| {
                let p = p.as_ref();
                [Some(p.to_path_buf()), fs::canonicalize(p).ok()]
            })
            .flatten()
            .collect();

        let mut unmatched: Vec<&Path> = self
            .files
            .keys()
            .filter(|key| {
                !wanted.contains(key.as_path())
                    && !fs::canonicalize(key).is_ok_and(|canonical| wanted.contains(&canonical))
            })
            .map(PathBuf::as_path)
            .collect();
        unmatched.sort();
        unmatched
    }

    fn file_entry(&self, path: &Path) -> Option<&MetadataOverrides> {
        if let Some(found) = self.files.get(path) {
            return Some(found);
        }
        let canonical = fs::canonicalize(path).ok()?;
        self.files
            .iter()
            .find(|(key, _)| fs::canonicalize(key).is_ok_and(|k| k == canonical))
            .map(|(_, overrides)| overrides)
    }

    /// Fold another session into this one; entries in `other` win
    pub fn merge_from(&mut self, other: OverrideSession) {
        self.all.merge_from(&other.all);
        for (path, overrides) in other.files {
            self.files.entry(path).or_default().merge_from(&overrides);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty() && self.files.values().all(MetadataOverrides::is_empty)
    }
}
