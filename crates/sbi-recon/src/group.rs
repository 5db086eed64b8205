//! Grouping raw brand labels into [`BrandGroup`]s and picking canonical names.

use std::collections::HashMap;

use serde::Serialize;

use sbi_core::BrandRecord;

use crate::normalize::{name_variations, NameMatcher};

/// All raw spellings observed for one brand, plus the display name shown
/// for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandGroup {
    /// Normalized key the group was created under.
    pub key: String,
    /// Distinct raw labels in first-seen order.
    pub variants: Vec<String>,
    pub canonical: String,
    /// `true` when the canonical name comes from the special-case table.
    pub special: bool,
}

impl BrandGroup {
    /// First raw label observed for this brand.
    #[must_use]
    pub fn first_variant(&self) -> &str {
        self.variants.first().map_or(self.canonical.as_str(), String::as_str)
    }
}

/// The brand groups of one reconciliation request, sorted by canonical name.
#[derive(Debug, Clone, Default)]
pub struct BrandCatalog {
    groups: Vec<BrandGroup>,
    by_key: HashMap<String, usize>,
    by_canonical: HashMap<String, usize>,
    by_raw: HashMap<String, usize>,
    /// Every variation of every group key.
    by_variation: HashMap<String, usize>,
    matcher: NameMatcher,
}

impl BrandCatalog {
    #[must_use]
    pub fn groups(&self) -> &[BrandGroup] {
        &self.groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Canonical names in lexicographic order.
    #[must_use]
    pub fn canonical_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.canonical.as_str()).collect()
    }

    #[must_use]
    pub fn by_canonical(&self, canonical: &str) -> Option<&BrandGroup> {
        self.by_canonical.get(canonical).map(|&idx| &self.groups[idx])
    }

    #[must_use]
    pub fn by_key(&self, key: &str) -> Option<&BrandGroup> {
        self.by_key.get(key).map(|&idx| &self.groups[idx])
    }

    /// The group a record was assigned to, `None` for records without a name.
    #[must_use]
    pub fn group_for(&self, record: &BrandRecord) -> Option<&BrandGroup> {
        record
            .brand_name()
            .and_then(|raw| self.by_raw.get(raw))
            .map(|&idx| &self.groups[idx])
    }

    /// Finds the group an arbitrary, possibly never-seen label belongs to.
    ///
    /// Tries the exact raw label, the special-case table, the normalized
    /// key and finally each of its variations.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&BrandGroup> {
        if let Some(&idx) = self.by_raw.get(name) {
            return Some(&self.groups[idx]);
        }

        let key = self.matcher.normalize(name);
        if key.is_empty() {
            return None;
        }

        if let Some((_, special)) = self.matcher.specials.resolve(&key) {
            let special_key = self.matcher.normalize(&special.display);
            if let Some(group) = self.by_key(&special_key) {
                return Some(group);
            }
        }

        lookup_variation(&self.by_variation, &key).map(|idx| &self.groups[idx])
    }
}

/// First group registered under any variation of `key`.
fn lookup_variation(by_variation: &HashMap<String, usize>, key: &str) -> Option<usize> {
    name_variations(key)
        .iter()
        .find_map(|v| by_variation.get(v))
        .copied()
}

#[derive(Debug)]
struct PendingGroup {
    key: String,
    variants: Vec<String>,
    special_display: Option<String>,
}

/// Groups the brand labels of `records` into a [`BrandCatalog`].
///
/// Records with a null or blank brand name are skipped. Each distinct raw
/// label lands in exactly one group; the grouping is a deterministic
/// function of the records and their order.
pub fn group_records<'a, I>(records: I, matcher: &NameMatcher) -> BrandCatalog
where
    I: IntoIterator<Item = &'a BrandRecord>,
{
    let mut pending: Vec<PendingGroup> = Vec::new();
    let mut by_raw: HashMap<String, usize> = HashMap::new();
    let mut by_variation: HashMap<String, usize> = HashMap::new();
    let mut by_special: HashMap<usize, usize> = HashMap::new();

    for raw in records.into_iter().filter_map(BrandRecord::brand_name) {
        if by_raw.contains_key(raw) {
            continue;
        }

        let key = matcher.normalize(raw);
        let idx = if let Some((special_idx, special)) = matcher.specials.resolve(&key) {
            *by_special.entry(special_idx).or_insert_with(|| {
                let special_key = matcher.normalize(&special.display);
                open_group(
                    &mut pending,
                    &mut by_variation,
                    special_key,
                    Some(special.display.clone()),
                )
            })
        } else if let Some(idx) = lookup_variation(&by_variation, &key) {
            idx
        } else {
            open_group(&mut pending, &mut by_variation, key, None)
        };

        pending[idx].variants.push(raw.to_string());
        by_raw.insert(raw.to_string(), idx);
    }

    finish(pending, by_raw, by_variation, matcher.clone())
}

fn open_group(
    pending: &mut Vec<PendingGroup>,
    by_variation: &mut HashMap<String, usize>,
    key: String,
    special_display: Option<String>,
) -> usize {
    let idx = pending.len();
    for variation in name_variations(&key) {
        by_variation.entry(variation).or_insert(idx);
    }
    pending.push(PendingGroup {
        key,
        variants: Vec::new(),
        special_display,
    });
    idx
}

/// Picks canonical names, sorts the groups and re-points every index at
/// the sorted positions.
fn finish(
    pending: Vec<PendingGroup>,
    by_raw: HashMap<String, usize>,
    by_variation: HashMap<String, usize>,
    matcher: NameMatcher,
) -> BrandCatalog {
    let mut groups: Vec<(usize, BrandGroup)> = pending
        .into_iter()
        .enumerate()
        .filter_map(|(old_idx, group)| {
            let (canonical, special) = match group.special_display {
                Some(display) => (display, true),
                None => (choose_canonical(&group.variants)?.to_string(), false),
            };
            Some((
                old_idx,
                BrandGroup {
                    key: group.key,
                    variants: group.variants,
                    canonical,
                    special,
                },
            ))
        })
        .collect();

    groups.sort_by(|(_, a), (_, b)| {
        a.canonical
            .cmp(&b.canonical)
            .then_with(|| a.key.cmp(&b.key))
    });

    let remap: HashMap<usize, usize> = groups
        .iter()
        .enumerate()
        .map(|(new_idx, (old_idx, _))| (*old_idx, new_idx))
        .collect();
    let groups: Vec<BrandGroup> = groups.into_iter().map(|(_, g)| g).collect();

    let by_key = groups
        .iter()
        .enumerate()
        .map(|(idx, g)| (g.key.clone(), idx))
        .collect();
    let by_canonical = groups
        .iter()
        .enumerate()
        .map(|(idx, g)| (g.canonical.clone(), idx))
        .collect();
    let rebase = |map: HashMap<String, usize>| -> HashMap<String, usize> {
        map.into_iter()
            .filter_map(|(name, old_idx)| remap.get(&old_idx).map(|&idx| (name, idx)))
            .collect()
    };

    BrandCatalog {
        by_key,
        by_canonical,
        by_raw: rebase(by_raw),
        by_variation: rebase(by_variation),
        groups,
        matcher,
    }
}

/// Canonical display name among a group's raw variants.
///
/// Variants starting with an uppercase letter win over the rest (all-lowercase
/// entries are treated as data-entry noise), then the shortest, then the
/// lexicographically smallest.
#[must_use]
pub fn choose_canonical(variants: &[String]) -> Option<&str> {
    let capitalized = |v: &&String| v.chars().next().is_some_and(char::is_uppercase);
    let pool: Vec<&String> = if variants.iter().any(|v| capitalized(&v)) {
        variants.iter().filter(capitalized).collect()
    } else {
        variants.iter().collect()
    };

    pool.into_iter()
        .min_by(|a, b| {
            a.chars()
                .count()
                .cmp(&b.chars().count())
                .then_with(|| a.cmp(b))
        })
        .map(String::as_str)
}

#[cfg(test)]
#[path = "group_test.rs"]
mod tests;
