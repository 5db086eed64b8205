//! Per-country view of the records, keyed by brand group.

use std::collections::{BTreeMap, BTreeSet};

use sbi_core::BrandRecord;

use crate::group::BrandCatalog;

/// Maps each country to the brand keys it has usable data for, and to the
/// records behind every key.
///
/// A key counts as usable in a country when at least one of its records
/// there carries a score. Built fresh for every request.
#[derive(Debug, Clone, Default)]
pub struct CountryBrandIndex<'a> {
    names: BTreeMap<String, BTreeSet<String>>,
    records: BTreeMap<String, BTreeMap<String, Vec<&'a BrandRecord>>>,
}

impl<'a> CountryBrandIndex<'a> {
    /// Index `records` by country and by the catalog group each belongs to.
    ///
    /// Records whose brand name is not in the catalog (null or blank) are
    /// left out.
    pub fn build<I>(records: I, catalog: &BrandCatalog) -> Self
    where
        I: IntoIterator<Item = &'a BrandRecord>,
    {
        let mut index = Self::default();

        for record in records {
            let Some(group) = catalog.group_for(record) else {
                continue;
            };

            index
                .records
                .entry(record.country.clone())
                .or_default()
                .entry(group.key.clone())
                .or_default()
                .push(record);

            let names = index.names.entry(record.country.clone()).or_default();
            if record.has_score() {
                names.insert(group.key.clone());
            }
        }

        index
    }

    /// Brand keys with usable data in `country`; empty for unknown countries.
    #[must_use]
    pub fn names(&self, country: &str) -> BTreeSet<&str> {
        self.names
            .get(country)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Records for one brand key in one country, in input order.
    #[must_use]
    pub fn records(&self, country: &str, key: &str) -> &[&'a BrandRecord] {
        self.records
            .get(country)
            .and_then(|by_key| by_key.get(key))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_usable_data(&self, country: &str, key: &str) -> bool {
        self.names
            .get(country)
            .is_some_and(|set| set.contains(key))
    }

    /// Countries that contributed at least one named record.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// `true` when none of `countries` has a usable brand.
    #[must_use]
    pub fn is_empty_for(&self, countries: &[String]) -> bool {
        countries.iter().all(|c| {
            self.names
                .get(c.as_str())
                .is_none_or(BTreeSet::is_empty)
        })
    }
}
