//! End-to-end properties of the reconciliation engine, exercised through
//! the public API only.

use std::collections::HashSet;
use std::path::PathBuf;

use serde_json::json;

use sbi_core::{load_reconcile_config, BrandRecord, ReconcileConfig};
use sbi_recon::{
    build_catalog, diagnose, reconcile, IntersectionStatus, MatchMode, Normalizer,
    ReconcileRequest,
};

fn records(value: serde_json::Value) -> Vec<BrandRecord> {
    serde_json::from_value(value).expect("fixture records should deserialize")
}

fn survey_fixture() -> Vec<BrandRecord> {
    records(json!([
        { "country": "SE", "brandName": "IKEA", "year": 2024, "score": 80 },
        { "country": "NO", "brandName": "Ikea", "year": 2024, "score": 75 },
        { "country": "SE", "brandName": "lego", "year": 2024, "score": 60 }
    ]))
}

fn shipped_config() -> ReconcileConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/reconcile.yaml");
    load_reconcile_config(&path).expect("shipped reconcile config should load")
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[test]
fn normalization_is_deterministic_and_idempotent() {
    let normalizer = Normalizer::default();
    for raw in ["IKEA", "  Volvo   Cars AB ", "Acme Group", "H&M", "Telia Company"] {
        let once = normalizer.normalize(raw);
        assert_eq!(once, normalizer.normalize(raw));
        assert_eq!(once, normalizer.normalize(&once), "not idempotent for {raw:?}");
    }
}

#[test]
fn case_variants_share_a_key() {
    let normalizer = Normalizer::default();
    let keys: HashSet<String> = ["IKEA", "ikea", "Ikea"]
        .iter()
        .map(|raw| normalizer.normalize(raw))
        .collect();
    assert_eq!(keys.len(), 1);
}

#[test]
fn suffixes_are_stripped() {
    let normalizer = Normalizer::default();
    assert_eq!(normalizer.normalize("Acme Group"), normalizer.normalize("Acme"));
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

#[test]
fn grouping_partitions_distinct_raw_names() {
    let input = records(json!([
        { "country": "SE", "brandName": "IKEA", "score": 1 },
        { "country": "NO", "brandName": "Ikea", "score": 1 },
        { "country": "DK", "brandName": "IKEA", "score": 1 },
        { "country": "SE", "brandName": "H&M", "score": 1 },
        { "country": "FI", "brandName": "H and M", "score": 1 },
        { "country": "SE", "brandName": null, "score": 1 },
        { "country": "SE", "brandName": "   ", "score": 1 },
        { "country": "NO", "brandName": "Coca Cola", "score": 1 },
        { "country": "DK", "brandName": "Coca-Cola", "score": 1 }
    ]));
    let catalog = build_catalog(&input, &ReconcileConfig::default()).unwrap();

    let distinct: HashSet<&str> = input.iter().filter_map(BrandRecord::brand_name).collect();
    let mut seen = HashSet::new();
    for group in catalog.groups() {
        for variant in &group.variants {
            assert!(seen.insert(variant.as_str()), "{variant} in two groups");
        }
    }
    assert_eq!(seen, distinct);
}

#[test]
fn canonical_is_a_member_or_special_override() {
    let input = records(json!([
        { "country": "SE", "brandName": "H and M", "score": 1 },
        { "country": "NO", "brandName": "Hennes & Mauritz", "score": 1 },
        { "country": "SE", "brandName": "Volvo", "score": 1 },
        { "country": "NO", "brandName": "VOLVO", "score": 1 },
        { "country": "DK", "brandName": "arla", "score": 1 }
    ]));
    let catalog = build_catalog(&input, &shipped_config()).unwrap();

    for group in catalog.groups() {
        assert!(
            group.special || group.variants.contains(&group.canonical),
            "canonical {} not among {:?}",
            group.canonical,
            group.variants
        );
    }

    let hm = catalog.resolve("H & M").unwrap();
    assert_eq!(hm.canonical, "H&M");
    assert!(hm.special);
    assert_eq!(hm.variants, vec!["H and M", "Hennes & Mauritz"]);
    assert_eq!(catalog.resolve("arla").unwrap().canonical, "Arla");
}

// ---------------------------------------------------------------------------
// Intersection
// ---------------------------------------------------------------------------

#[test]
fn three_country_intersection_by_mode() {
    let input = records(json!([
        { "country": "A", "brandName": "Nike", "score": 1 },
        { "country": "A", "brandName": "Zara", "score": 1 },
        { "country": "B", "brandName": "nike", "score": 1 },
        { "country": "B", "brandName": "H&M", "score": 1 },
        { "country": "C", "brandName": "Nike Group", "score": 1 },
        { "country": "C", "brandName": "Zara", "score": 1 }
    ]));
    let config = ReconcileConfig::default();

    let all = reconcile(
        &input,
        &ReconcileRequest::new(["A", "B", "C"], MatchMode::All),
        &config,
    )
    .unwrap();
    assert_eq!(all.brands(), ["Nike"]);

    let two = reconcile(
        &input,
        &ReconcileRequest::new(["A", "B", "C"], MatchMode::AtLeast(2)),
        &config,
    )
    .unwrap();
    assert_eq!(two.brands(), ["Nike", "Zara"]);
    assert_eq!(two.status(), IntersectionStatus::Matched);
}

#[test]
fn fallback_needs_empty_result_and_backing_records() {
    let input = records(json!([
        { "country": "SE", "brandName": "IKEA AB", "score": 70 },
        { "country": "SE", "brandName": "Systembolaget", "score": 65 },
        { "country": "NO", "brandName": "Vinmonopolet", "score": 60 },
        { "country": "DK", "brandName": "Lego", "score": 90 }
    ]));
    let config = shipped_config();

    let result = reconcile(
        &input,
        &ReconcileRequest::new(["SE", "NO"], MatchMode::All),
        &config,
    )
    .unwrap();
    assert_eq!(result.status(), IntersectionStatus::Fallback);
    assert_eq!(result.brands(), ["IKEA AB"]);
    assert_eq!(result.intersection.fallback_brands, ["IKEA AB"]);

    let no_data = reconcile(
        &input,
        &ReconcileRequest::new(["IS", "EE"], MatchMode::All),
        &config,
    )
    .unwrap();
    assert!(no_data.brands().is_empty());
    assert_eq!(no_data.status(), IntersectionStatus::EmptyInput);
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[test]
fn best_record_selection_is_idempotent() {
    let input = survey_fixture();
    let request = ReconcileRequest::new(["SE", "NO"], MatchMode::AtLeast(2));
    let config = ReconcileConfig::default();

    let first = reconcile(&input, &request, &config).unwrap();
    let second = reconcile(&input, &request, &config).unwrap();
    assert_eq!(first.best_records, second.best_records);
    assert_eq!(first.intersection, second.intersection);
}

#[test]
fn survey_scenario_end_to_end() {
    let input = survey_fixture();
    let request = ReconcileRequest::new(["SE", "NO"], MatchMode::AtLeast(2));
    let result = reconcile(&input, &request, &ReconcileConfig::default()).unwrap();

    assert_eq!(result.brands(), ["IKEA"]);
    assert_eq!(result.best_records.len(), 2);
    assert_eq!(result.best_records["IKEA-SE"].score, Some(80.0));
    assert_eq!(result.best_records["IKEA-NO"].score, Some(75.0));
    assert_eq!(
        result.best_records["IKEA-NO"].brand_name.as_deref(),
        Some("Ikea")
    );
    assert!(result.coverage["IKEA"].has_data);
    assert_eq!(result.coverage["IKEA"].countries, ["SE", "NO"]);
}

#[test]
fn survey_scenario_with_shipped_fallback_list() {
    let input = survey_fixture();
    let config = shipped_config();
    let request = ReconcileRequest::at_least_default(["SE", "NO"], &config);
    let result = reconcile(&input, &request, &config).unwrap();

    // One natural match is below the configured minimum, so backed
    // candidates top the list up.
    assert_eq!(result.brands(), ["IKEA", "lego"]);
    assert_eq!(result.intersection.fallback_brands, ["lego"]);
    assert_eq!(result.status(), IntersectionStatus::Fallback);
    assert!(!result.best_records.contains_key("lego-NO"));
}

// ---------------------------------------------------------------------------
// Diagnostics and errors
// ---------------------------------------------------------------------------

#[test]
fn diagnose_explains_a_missed_match() {
    let input = records(json!([
        { "country": "SE", "brandName": "Stadium", "score": 50 },
        { "country": "NO", "brandName": "Stadion", "score": 48 }
    ]));
    let request = ReconcileRequest::new(["SE", "NO"], MatchMode::All);
    let config = ReconcileConfig::default();

    let result = reconcile(&input, &request, &config).unwrap();
    assert_eq!(result.status(), IntersectionStatus::NoCommonBrands);

    let matches = diagnose(&input, &request, &config).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].left_name, "Stadium");
    assert_eq!(matches[0].right_name, "Stadion");
    assert_eq!(matches[0].distance, 2);
}

#[test]
fn malformed_requests_are_rejected() {
    let input = survey_fixture();
    let config = ReconcileConfig::default();

    let empty: [&str; 0] = [];
    assert!(reconcile(&input, &ReconcileRequest::new(empty, MatchMode::All), &config).is_err());
    assert!(reconcile(
        &input,
        &ReconcileRequest::new(["SE", "SE"], MatchMode::All),
        &config
    )
    .is_err());
    assert!(reconcile(
        &input,
        &ReconcileRequest::new(["SE", "NO"], MatchMode::AtLeast(0)),
        &config
    )
    .is_err());
}
