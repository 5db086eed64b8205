//! Picking one record per brand and country, and summarizing coverage.

use std::collections::BTreeMap;

use serde::Serialize;

use sbi_core::BrandRecord;

use crate::group::BrandCatalog;
use crate::index::CountryBrandIndex;

/// Which of the requested countries hold data for one brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandCoverage {
    /// `true` when at least one record in `countries` carries a score.
    pub has_data: bool,
    /// Countries with records for the brand, in requested order.
    pub countries: Vec<String>,
}

/// Key used in the best-record map: `"{canonical}-{country}"`.
#[must_use]
pub fn record_key(canonical: &str, country: &str) -> String {
    format!("{canonical}-{country}")
}

/// The highest-scoring record, ties going to the earliest.
///
/// A record without a score only wins when none of the records has one.
#[must_use]
pub fn best_record<'a>(records: &[&'a BrandRecord]) -> Option<&'a BrandRecord> {
    let mut best: Option<&'a BrandRecord> = None;
    for &record in records {
        let better = match (best.and_then(|b| b.score), record.score) {
            (_, None) => best.is_none(),
            (None, Some(_)) => true,
            (Some(current), Some(candidate)) => candidate > current,
        };
        if better {
            best = Some(record);
        }
    }
    best
}

/// One best record per canonical brand × requested country.
///
/// Pairs without any record are left out. Brands unknown to the catalog
/// are ignored.
#[must_use]
pub fn best_records(
    catalog: &BrandCatalog,
    index: &CountryBrandIndex<'_>,
    brands: &[String],
    countries: &[String],
) -> BTreeMap<String, BrandRecord> {
    let mut selected = BTreeMap::new();

    for canonical in brands {
        let Some(group) = catalog.by_canonical(canonical) else {
            continue;
        };
        for country in countries {
            if let Some(record) = best_record(index.records(country, &group.key)) {
                selected.insert(record_key(canonical, country), record.clone());
            }
        }
    }

    selected
}

/// Data coverage of each brand across the requested countries.
#[must_use]
pub fn coverage(
    catalog: &BrandCatalog,
    index: &CountryBrandIndex<'_>,
    brands: &[String],
    countries: &[String],
) -> BTreeMap<String, BrandCoverage> {
    brands
        .iter()
        .map(|canonical| {
            let mut has_data = false;
            let mut present = Vec::new();

            if let Some(group) = catalog.by_canonical(canonical) {
                for country in countries {
                    let records = index.records(country, &group.key);
                    if records.is_empty() {
                        continue;
                    }
                    has_data |= records.iter().any(|r| r.has_score());
                    present.push(country.clone());
                }
            }

            (
                canonical.clone(),
                BrandCoverage {
                    has_data,
                    countries: present,
                },
            )
        })
        .collect()
}
