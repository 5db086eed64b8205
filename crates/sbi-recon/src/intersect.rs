//! Cross-country brand intersection with a verified fallback list.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use sbi_core::ReconcileConfig;

use crate::diagnostics::log_near_matches;
use crate::error::ReconError;
use crate::group::{BrandCatalog, BrandGroup};
use crate::index::CountryBrandIndex;

/// How many of the requested countries a brand must appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Present in every requested country.
    All,
    /// Present in at least this many requested countries. Values above the
    /// number of requested countries are clamped to it.
    AtLeast(usize),
}

/// Why an intersection holds what it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionStatus {
    /// None of the requested countries has any usable brand data.
    EmptyInput,
    /// There is data, but no brand qualified and no fallback was backed by records.
    NoCommonBrands,
    /// Every brand qualified on its own.
    Matched,
    /// Part or all of the result came from the fallback candidates.
    Fallback,
}

impl std::fmt::Display for IntersectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntersectionStatus::EmptyInput => write!(f, "empty_input"),
            IntersectionStatus::NoCommonBrands => write!(f, "no_common_brands"),
            IntersectionStatus::Matched => write!(f, "matched"),
            IntersectionStatus::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Intersection {
    /// Canonical names, sorted.
    pub brands: Vec<String>,
    /// Normalized keys, aligned with `brands`.
    pub keys: Vec<String>,
    /// Canonical names contributed by the fallback list, sorted.
    pub fallback_brands: Vec<String>,
    pub status: IntersectionStatus,
}

impl Intersection {
    fn empty(status: IntersectionStatus) -> Self {
        Self {
            brands: Vec::new(),
            keys: Vec::new(),
            fallback_brands: Vec::new(),
            status,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

/// Checks a requested country list: non-empty, no blank or repeated codes.
///
/// # Errors
///
/// Returns [`ReconError::InvalidInput`] describing the first problem.
pub fn validate_countries(countries: &[String]) -> Result<(), ReconError> {
    if countries.is_empty() {
        return Err(ReconError::invalid("at least one country must be requested"));
    }

    let mut seen = HashSet::new();
    for country in countries {
        if country.trim().is_empty() {
            return Err(ReconError::invalid("requested country code is blank"));
        }
        if !seen.insert(country.as_str()) {
            return Err(ReconError::invalid(format!(
                "country '{country}' requested more than once"
            )));
        }
    }

    Ok(())
}

/// Canonical brands with usable data across `countries` under `mode`.
///
/// # Errors
///
/// Returns [`ReconError::InvalidInput`] if the country list is invalid or
/// `mode` is `AtLeast(0)`.
pub fn intersect(
    catalog: &BrandCatalog,
    index: &CountryBrandIndex<'_>,
    countries: &[String],
    mode: MatchMode,
    config: &ReconcileConfig,
) -> Result<Intersection, ReconError> {
    validate_countries(countries)?;
    if mode == MatchMode::AtLeast(0) {
        return Err(ReconError::invalid("min_countries must be at least 1"));
    }

    if index.is_empty_for(countries) {
        return Ok(Intersection::empty(IntersectionStatus::EmptyInput));
    }

    let (mut keys, wants_fallback) = match mode {
        MatchMode::All => {
            let keys = intersect_all(index, countries);
            if keys.is_empty() {
                log_near_matches(catalog, index, countries, config.diagnostic_max_distance);
            }
            let empty = keys.is_empty();
            (keys, empty)
        }
        MatchMode::AtLeast(n) => {
            let min = n.min(countries.len());
            if min < n {
                tracing::debug!(requested = n, clamped = min, "min_countries clamped");
            }
            let keys = at_least(index, countries, min);
            let short = countries.len() >= 2 && keys.len() < config.fallback_min_results;
            (keys, short)
        }
    };

    let mut fallback_keys = BTreeSet::new();
    if wants_fallback {
        for group in verified_fallback(catalog, index, countries, &config.fallback_candidates) {
            if keys.insert(group.key.as_str()) {
                fallback_keys.insert(group.key.as_str());
            }
        }
        tracing::debug!(
            candidates = config.fallback_candidates.len(),
            added = fallback_keys.len(),
            "fallback brands consulted"
        );
    }

    let status = if !fallback_keys.is_empty() {
        IntersectionStatus::Fallback
    } else if keys.is_empty() {
        IntersectionStatus::NoCommonBrands
    } else {
        IntersectionStatus::Matched
    };

    let mut named: Vec<(&str, &str)> = keys
        .iter()
        .filter_map(|key| catalog.by_key(key).map(|g| (g.canonical.as_str(), g.key.as_str())))
        .collect();
    named.sort_unstable();

    let mut fallback_brands: Vec<String> = fallback_keys
        .iter()
        .filter_map(|key| catalog.by_key(key).map(|g| g.canonical.clone()))
        .collect();
    fallback_brands.sort_unstable();

    Ok(Intersection {
        brands: named.iter().map(|(name, _)| (*name).to_string()).collect(),
        keys: named.iter().map(|(_, key)| (*key).to_string()).collect(),
        fallback_brands,
        status,
    })
}

/// Left fold of set intersection over `countries`, stopping once empty.
fn intersect_all<'i>(index: &'i CountryBrandIndex<'_>, countries: &[String]) -> BTreeSet<&'i str> {
    let mut remaining = countries.iter();
    let Some(first) = remaining.next() else {
        return BTreeSet::new();
    };

    let mut running = index.names(first);
    for country in remaining {
        if running.is_empty() {
            break;
        }
        let next = index.names(country);
        running.retain(|key| next.contains(key));
    }
    running
}

/// Keys present in at least `min` of `countries`.
fn at_least<'i>(
    index: &'i CountryBrandIndex<'_>,
    countries: &[String],
    min: usize,
) -> BTreeSet<&'i str> {
    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for country in countries {
        for key in index.names(country) {
            *tally.entry(key).or_insert(0) += 1;
        }
    }
    tally
        .into_iter()
        .filter(|&(_, count)| count >= min)
        .map(|(key, _)| key)
        .collect()
}

/// Fallback candidates that resolve to a group with usable data in at
/// least one of `countries`, in candidate order.
fn verified_fallback<'c>(
    catalog: &'c BrandCatalog,
    index: &CountryBrandIndex<'_>,
    countries: &[String],
    candidates: &[String],
) -> Vec<&'c BrandGroup> {
    candidates
        .iter()
        .filter_map(|candidate| catalog.resolve(candidate))
        .filter(|group| countries.iter().any(|c| index.has_usable_data(c, &group.key)))
        .collect()
}

#[cfg(test)]
#[path = "intersect_test.rs"]
mod tests;
