//! Brand label normalization and the special-case alias table.
//!
//! [`Normalizer::normalize`] produces the primary lookup key for a raw
//! label. Punctuation differences (`&` vs `and`, hyphens, dots, spacing)
//! are not folded into that key; [`name_variations`] yields them as
//! alternative keys, which the grouper tries in order.

use std::collections::HashMap;

use sbi_core::{ReconcileConfig, SpecialBrand};

/// Strips corporate suffixes and canonicalizes case and whitespace.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Suffixes split into tokens, longest first.
    suffixes: Vec<Vec<String>>,
}

impl Normalizer {
    #[must_use]
    pub fn new<S: AsRef<str>>(suffixes: &[S]) -> Self {
        let mut suffixes: Vec<Vec<String>> = suffixes
            .iter()
            .map(|s| {
                s.as_ref()
                    .to_lowercase()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|tokens| !tokens.is_empty())
            .collect();
        suffixes.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { suffixes }
    }

    /// Maps a raw brand label to its lookup key.
    ///
    /// Lower-cases, collapses whitespace, drops trailing commas from tokens,
    /// then strips trailing suffix tokens until none applies. The last
    /// remaining token is never stripped, so `"Group"` stays `"group"`.
    /// Blank input yields an empty key.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let lower = raw.to_lowercase();
        let mut tokens: Vec<&str> = lower
            .split_whitespace()
            .map(|t| t.trim_end_matches(','))
            .filter(|t| !t.is_empty())
            .collect();

        while let Some(len) = self.matching_suffix_len(&tokens) {
            tokens.truncate(tokens.len() - len);
        }

        tokens.join(" ")
    }

    /// Number of trailing tokens covered by the longest applicable suffix.
    fn matching_suffix_len(&self, tokens: &[&str]) -> Option<usize> {
        self.suffixes
            .iter()
            .find(|suffix| {
                suffix.len() < tokens.len()
                    && tokens[tokens.len() - suffix.len()..]
                        .iter()
                        .zip(suffix.iter())
                        .all(|(token, part)| token.trim_end_matches('.') == part.as_str())
            })
            .map(Vec::len)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(sbi_core::reconcile::DEFAULT_SUFFIXES)
    }
}

/// Alternative lookup keys for an already-normalized key, the key itself first.
///
/// Covers `&` written as `and` (and back), hyphens as spaces, dropped dots,
/// dropped whitespace, and a fully compact form combining all of them.
#[must_use]
pub fn name_variations(key: &str) -> Vec<String> {
    let mut variations = vec![key.to_string()];
    let mut push = |candidate: String| {
        if !candidate.is_empty() && !variations.contains(&candidate) {
            variations.push(candidate);
        }
    };

    push(collapse_whitespace(&key.replace('&', " and ")));
    push(collapse_whitespace(
        &key.split_whitespace()
            .map(|t| if t == "and" { "&" } else { t })
            .collect::<Vec<_>>()
            .join(" "),
    ));
    push(collapse_whitespace(&key.replace('-', " ")));
    push(key.replace('.', ""));
    push(key.split_whitespace().collect());
    push(compact_key(key));

    variations
}

/// The most aggressive variation: `&` spelled out, and all whitespace,
/// hyphens, dots and apostrophes removed.
#[must_use]
pub fn compact_key(key: &str) -> String {
    key.replace('&', "and")
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '\'' | '’'))
        .collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Curated brand identities consulted before generic normalization.
#[derive(Debug, Clone, Default)]
pub struct SpecialCaseTable {
    brands: Vec<SpecialBrand>,
    /// Every variation of every normalized alias and display name.
    lookup: HashMap<String, usize>,
}

impl SpecialCaseTable {
    #[must_use]
    pub fn new(brands: &[SpecialBrand], normalizer: &Normalizer) -> Self {
        let mut lookup = HashMap::new();

        for (idx, brand) in brands.iter().enumerate() {
            let spellings = std::iter::once(&brand.display).chain(brand.aliases.iter());
            for spelling in spellings {
                for variation in name_variations(&normalizer.normalize(spelling)) {
                    let owner = *lookup.entry(variation).or_insert(idx);
                    if owner != idx {
                        tracing::warn!(
                            spelling = %spelling,
                            kept = %brands[owner].display,
                            ignored = %brand.display,
                            "special-case spelling claimed by two brands"
                        );
                    }
                }
            }
        }

        Self {
            brands: brands.to_vec(),
            lookup,
        }
    }

    /// Finds the special brand a normalized key denotes, if any.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<(usize, &SpecialBrand)> {
        if key.is_empty() {
            return None;
        }
        name_variations(key)
            .iter()
            .find_map(|v| self.lookup.get(v))
            .map(|&idx| (idx, &self.brands[idx]))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

/// Normalizer plus special-case table, built once per request from config.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    pub normalizer: Normalizer,
    pub specials: SpecialCaseTable,
}

impl NameMatcher {
    #[must_use]
    pub fn from_config(config: &ReconcileConfig) -> Self {
        let normalizer = Normalizer::new(config.suffixes.as_slice());
        let specials = SpecialCaseTable::new(&config.special_brands, &normalizer);
        Self {
            normalizer,
            specials,
        }
    }

    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        self.normalizer.normalize(raw)
    }
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::from_config(&ReconcileConfig::default())
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
