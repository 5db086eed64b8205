//! Year-over-year score series for trend charts.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::group::BrandCatalog;
use crate::index::CountryBrandIndex;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearPoint {
    pub year: i32,
    pub score: f64,
}

/// Best score per survey year for one brand in one country, oldest first.
///
/// Records missing a year or a score are skipped. Returns an empty series
/// for unknown brands.
#[must_use]
pub fn yearly_series(
    catalog: &BrandCatalog,
    index: &CountryBrandIndex<'_>,
    canonical: &str,
    country: &str,
) -> Vec<YearPoint> {
    let Some(group) = catalog.by_canonical(canonical) else {
        return Vec::new();
    };

    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for record in index.records(country, &group.key) {
        let (Some(year), Some(score)) = (record.year, record.score) else {
            continue;
        };
        by_year
            .entry(year)
            .and_modify(|best| {
                if score > *best {
                    *best = score;
                }
            })
            .or_insert(score);
    }

    by_year
        .into_iter()
        .map(|(year, score)| YearPoint { year, score })
        .collect()
}
