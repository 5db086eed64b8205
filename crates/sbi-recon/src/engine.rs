//! Request-level entry points tying normalization, grouping, intersection
//! and selection together.
//!
//! Every call builds its own catalog and index from the records it is
//! given and drops them with the returned value; nothing is cached
//! between requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sbi_core::{BrandRecord, ReconcileConfig};

use crate::diagnostics::{country_near_matches, NearMatch};
use crate::error::ReconError;
use crate::group::{group_records, BrandCatalog};
use crate::index::CountryBrandIndex;
use crate::intersect::{intersect, validate_countries, Intersection, IntersectionStatus, MatchMode};
use crate::normalize::NameMatcher;
use crate::select::{best_records, coverage, BrandCoverage};
use crate::series::{yearly_series, YearPoint};

/// What to reconcile: which countries, how strictly, and optionally which year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileRequest {
    pub countries: Vec<String>,
    pub mode: MatchMode,
    /// Restrict the records to one survey year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl ReconcileRequest {
    #[must_use]
    pub fn new<I, S>(countries: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            countries: countries.into_iter().map(Into::into).collect(),
            mode,
            year: None,
        }
    }

    /// At-least-N request using the configured default `N`.
    #[must_use]
    pub fn at_least_default<I, S>(countries: I, config: &ReconcileConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(countries, MatchMode::AtLeast(config.min_countries))
    }

    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    fn includes(&self, record: &BrandRecord) -> bool {
        self.countries.contains(&record.country)
            && self.year.is_none_or(|year| record.year == Some(year))
    }
}

/// Everything one request produced.
#[derive(Debug, Clone)]
pub struct Reconciliation<'a> {
    pub catalog: BrandCatalog,
    pub index: CountryBrandIndex<'a>,
    pub intersection: Intersection,
    /// Best record per `"{canonical}-{country}"`.
    pub best_records: BTreeMap<String, BrandRecord>,
    pub coverage: BTreeMap<String, BrandCoverage>,
}

impl Reconciliation<'_> {
    /// Canonical brand names, sorted.
    #[must_use]
    pub fn brands(&self) -> &[String] {
        &self.intersection.brands
    }

    #[must_use]
    pub fn status(&self) -> IntersectionStatus {
        self.intersection.status
    }

    #[must_use]
    pub fn yearly_series(&self, canonical: &str, country: &str) -> Vec<YearPoint> {
        yearly_series(&self.catalog, &self.index, canonical, country)
    }
}

/// Reconcile brand names across the requested countries.
///
/// Only records from the requested countries (and year, if set) take part.
///
/// # Errors
///
/// Returns [`ReconError::InvalidInput`] for malformed records or requests:
/// blank record countries, non-finite scores, an empty, blank or repeated
/// country list, or `AtLeast(0)`. Missing data is never an error.
pub fn reconcile<'a>(
    records: &'a [BrandRecord],
    request: &ReconcileRequest,
    config: &ReconcileConfig,
) -> Result<Reconciliation<'a>, ReconError> {
    validate_records(records)?;
    validate_countries(&request.countries)?;

    let selected: Vec<&'a BrandRecord> = records.iter().filter(|r| request.includes(r)).collect();
    let matcher = NameMatcher::from_config(config);
    let catalog = group_records(selected.iter().copied(), &matcher);
    let index = CountryBrandIndex::build(selected.iter().copied(), &catalog);

    let intersection = intersect(&catalog, &index, &request.countries, request.mode, config)?;
    let best_records = best_records(&catalog, &index, &intersection.brands, &request.countries);
    let coverage = coverage(&catalog, &index, &intersection.brands, &request.countries);

    tracing::debug!(
        records = records.len(),
        selected = selected.len(),
        groups = catalog.len(),
        brands = intersection.brands.len(),
        status = ?intersection.status,
        "reconciled brands"
    );

    Ok(Reconciliation {
        catalog,
        index,
        intersection,
        best_records,
        coverage,
    })
}

/// Near matches between every pair of requested countries, for brands that
/// one country of the pair has and the other lacks.
///
/// # Errors
///
/// Returns [`ReconError::InvalidInput`] under the same conditions as
/// [`reconcile`].
pub fn diagnose(
    records: &[BrandRecord],
    request: &ReconcileRequest,
    config: &ReconcileConfig,
) -> Result<Vec<NearMatch>, ReconError> {
    validate_records(records)?;
    validate_countries(&request.countries)?;

    let selected: Vec<&BrandRecord> = records.iter().filter(|r| request.includes(r)).collect();
    let matcher = NameMatcher::from_config(config);
    let catalog = group_records(selected.iter().copied(), &matcher);
    let index = CountryBrandIndex::build(selected.iter().copied(), &catalog);

    let mut matches = Vec::new();
    for (i, left) in request.countries.iter().enumerate() {
        for right in &request.countries[i + 1..] {
            matches.extend(country_near_matches(
                &catalog,
                &index,
                left,
                right,
                config.diagnostic_max_distance,
            ));
        }
    }

    Ok(matches)
}

/// Catalog of every named record, regardless of country or year.
///
/// # Errors
///
/// Returns [`ReconError::InvalidInput`] for malformed records.
pub fn build_catalog(
    records: &[BrandRecord],
    config: &ReconcileConfig,
) -> Result<BrandCatalog, ReconError> {
    validate_records(records)?;
    Ok(group_records(records, &NameMatcher::from_config(config)))
}

fn validate_records(records: &[BrandRecord]) -> Result<(), ReconError> {
    for (i, record) in records.iter().enumerate() {
        if record.country.trim().is_empty() {
            return Err(ReconError::invalid(format!(
                "record {i} has a blank country code"
            )));
        }
        if record.score.is_some_and(|s| !s.is_finite()) {
            return Err(ReconError::invalid(format!(
                "record {i} has a non-finite score"
            )));
        }
    }
    Ok(())
}
