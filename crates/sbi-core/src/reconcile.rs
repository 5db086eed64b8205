use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Corporate suffixes stripped from the end of a brand label before grouping.
pub const DEFAULT_SUFFIXES: &[&str] = &[
    "group",
    "inc",
    "corporation",
    "ab",
    "co",
    "& co",
    "as",
    "a/s",
    "gmbh",
    "international",
    "stores",
    "retail",
];

/// A well-known brand whose legal or regional names drift between country
/// tables, together with the raw spellings known to denote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialBrand {
    /// Curated display name used as the canonical name of the group.
    pub display: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Tuning data for brand reconciliation.
///
/// Every table here is plain data so new aliases or fallback brands can be
/// added without touching the matching code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    pub suffixes: Vec<String>,
    pub special_brands: Vec<SpecialBrand>,
    /// Multinational brands offered when the natural overlap is too small.
    /// Only brands backed by real records are ever returned.
    pub fallback_candidates: Vec<String>,
    /// Default `N` for at-least-N matching.
    pub min_countries: usize,
    /// At-least-N results below this size (with two or more countries
    /// requested) are topped up from the fallback candidates.
    pub fallback_min_results: usize,
    /// Largest edit distance reported as a near match.
    pub diagnostic_max_distance: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| (*s).to_string()).collect(),
            special_brands: Vec::new(),
            fallback_candidates: Vec::new(),
            min_countries: 2,
            fallback_min_results: 15,
            diagnostic_max_distance: 2,
        }
    }
}

/// Load and validate a reconcile config from a YAML file.
///
/// Fields missing from the file take their [`Default`] values.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_reconcile_config(path: &Path) -> Result<ReconcileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReconcileFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: ReconcileConfig = serde_yaml::from_str(&content)?;
    validate_reconcile_config(&config)?;

    Ok(config)
}

/// Check the invariants the matcher relies on.
///
/// # Errors
///
/// Returns `ConfigError::Validation` describing the first violation found.
pub fn validate_reconcile_config(config: &ReconcileConfig) -> Result<(), ConfigError> {
    if config.min_countries == 0 {
        return Err(ConfigError::Validation(
            "min_countries must be at least 1".to_string(),
        ));
    }

    if config.suffixes.iter().any(|s| s.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "suffixes must be non-empty".to_string(),
        ));
    }

    if config.fallback_candidates.iter().any(|s| s.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "fallback candidates must be non-empty".to_string(),
        ));
    }

    let mut seen_displays = HashSet::new();
    let mut seen_aliases = HashSet::new();

    for brand in &config.special_brands {
        if brand.display.trim().is_empty() {
            return Err(ConfigError::Validation(
                "special brand display name must be non-empty".to_string(),
            ));
        }

        if !seen_displays.insert(brand.display.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate special brand: '{}'",
                brand.display
            )));
        }

        for alias in &brand.aliases {
            if alias.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "special brand '{}' has an empty alias",
                    brand.display
                )));
            }
            if !seen_aliases.insert(alias.trim().to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "alias '{alias}' is listed under more than one special brand"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
