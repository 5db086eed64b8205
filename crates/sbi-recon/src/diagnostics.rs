//! Near-match diagnostics for brands that failed to line up across countries.
//!
//! Quadratic in the catalog sizes; only run on demand or when an
//! intersection comes back empty, never while building results.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::group::BrandCatalog;
use crate::index::CountryBrandIndex;

/// Shorter side of a substring match must be at least this many chars.
const MIN_SUBSTRING_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NearMatchKind {
    /// One key contains the other.
    Substring,
    /// Keys are within the configured Levenshtein distance.
    EditDistance,
}

/// Two normalized keys that look like the same brand but did not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyNearMatch {
    pub left: String,
    pub right: String,
    pub distance: usize,
    pub kind: NearMatchKind,
}

/// A near match between two countries, reported with raw labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearMatch {
    pub left_country: String,
    pub right_country: String,
    /// First raw label observed for the left brand.
    pub left_name: String,
    pub right_name: String,
    pub left_key: String,
    pub right_key: String,
    pub distance: usize,
    pub kind: NearMatchKind,
}

/// Levenshtein distance between two strings, counted in chars.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Pairs from `left` × `right` that are close without being equal.
///
/// A pair is close when one key contains the other (the shorter having at
/// least three chars) or their edit distance is at most `max_distance`.
#[must_use]
pub fn near_matches(
    left: &BTreeSet<&str>,
    right: &BTreeSet<&str>,
    max_distance: usize,
) -> Vec<KeyNearMatch> {
    let mut matches = Vec::new();

    for &l in left {
        for &r in right {
            if l == r {
                continue;
            }
            if let Some((distance, kind)) = closeness(l, r, max_distance) {
                matches.push(KeyNearMatch {
                    left: l.to_string(),
                    right: r.to_string(),
                    distance,
                    kind,
                });
            }
        }
    }

    matches
}

fn closeness(a: &str, b: &str, max_distance: usize) -> Option<(usize, NearMatchKind)> {
    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    let (shorter, longer) = if a_len <= b_len { (a, b) } else { (b, a) };

    if a_len.min(b_len) >= MIN_SUBSTRING_LEN && longer.contains(shorter) {
        return Some((edit_distance(a, b), NearMatchKind::Substring));
    }

    // Distance is at least the length difference; skip the DP when that
    // already rules the pair out.
    if a_len.abs_diff(b_len) > max_distance {
        return None;
    }

    let distance = edit_distance(a, b);
    (distance <= max_distance).then_some((distance, NearMatchKind::EditDistance))
}

/// Near matches between the brands only `left_country` has and the brands
/// only `right_country` has.
#[must_use]
pub fn country_near_matches(
    catalog: &BrandCatalog,
    index: &CountryBrandIndex<'_>,
    left_country: &str,
    right_country: &str,
    max_distance: usize,
) -> Vec<NearMatch> {
    let left = index.names(left_country);
    let right = index.names(right_country);
    let left_only: BTreeSet<&str> = left.difference(&right).copied().collect();
    let right_only: BTreeSet<&str> = right.difference(&left).copied().collect();

    near_matches(&left_only, &right_only, max_distance)
        .into_iter()
        .map(|m| {
            let display = |key: &str| {
                catalog
                    .by_key(key)
                    .map_or_else(|| key.to_string(), |g| g.first_variant().to_string())
            };
            NearMatch {
                left_country: left_country.to_string(),
                right_country: right_country.to_string(),
                left_name: display(&m.left),
                right_name: display(&m.right),
                left_key: m.left,
                right_key: m.right,
                distance: m.distance,
                kind: m.kind,
            }
        })
        .collect()
}

/// Emit near matches for each adjacent pair of `countries` at debug level.
pub(crate) fn log_near_matches(
    catalog: &BrandCatalog,
    index: &CountryBrandIndex<'_>,
    countries: &[String],
    max_distance: usize,
) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    for pair in countries.windows(2) {
        let matches = country_near_matches(catalog, index, &pair[0], &pair[1], max_distance);
        if matches.is_empty() {
            tracing::debug!(left = %pair[0], right = %pair[1], "no near matches between countries");
        }
        for m in matches {
            tracing::debug!(
                left_country = %m.left_country,
                right_country = %m.right_country,
                left = %m.left_name,
                right = %m.right_name,
                distance = m.distance,
                kind = ?m.kind,
                "possible unmatched brand variant"
            );
        }
    }
}
