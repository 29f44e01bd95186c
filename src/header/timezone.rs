//! Timezone name normalization.
//!
//! Header values are upper-cased and resolved through the alias table
//! first, then through a zone catalog. Anything unresolved becomes UTC.

use chrono_tz::Tz;
use std::fmt;

use crate::constants::{DEFAULT_TIMEZONE, TIMEZONE_ALIASES};
use crate::rules::Cascade;

/// Source of valid timezone identifiers
pub trait ZoneCatalog: fmt::Debug + Send + Sync {
    /// Canonical spelling of `name` if it is a known zone (case-insensitive)
    fn canonical(&self, name: &str) -> Option<String>;
}

/// Catalog backed by the IANA timezone database bundled with `chrono-tz`
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinZones;

impl ZoneCatalog for BuiltinZones {
    fn canonical(&self, name: &str) -> Option<String> {
        Tz::from_str_insensitive(name)
            .ok()
            .map(|tz| tz.name().to_string())
    }
}

fn lookup_alias(upper: &str) -> Option<String> {
    TIMEZONE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|(_, zone)| zone.to_string())
}

/// Normalize a timezone value using the built-in catalog
pub fn normalize_timezone(raw: &str) -> String {
    normalize_timezone_with(raw, &BuiltinZones)
}

/// Normalize a timezone value using `catalog` for non-alias names
pub fn normalize_timezone_with(raw: &str, catalog: &dyn ZoneCatalog) -> String {
    let upper = raw.trim().to_uppercase();
    if upper.is_empty() {
        return DEFAULT_TIMEZONE.to_string();
    }

    Cascade::new("timezone")
        .rule("alias", lookup_alias)
        .rule("catalog", |name: &str| catalog.canonical(name))
        .apply(upper.as_str())
        .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string())
}
