use super::*;

fn special(display: &str, aliases: &[&str]) -> SpecialBrand {
    SpecialBrand {
        display: display.to_string(),
        aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
    }
}

// -----------------------------------------------------------------------
// Normalizer
// -----------------------------------------------------------------------

#[test]
fn normalize_is_case_insensitive() {
    let n = Normalizer::default();
    assert_eq!(n.normalize("IKEA"), "ikea");
    assert_eq!(n.normalize("ikea"), "ikea");
    assert_eq!(n.normalize("Ikea"), "ikea");
}

#[test]
fn normalize_trims_and_collapses_whitespace() {
    let n = Normalizer::default();
    assert_eq!(n.normalize("  Clas   Ohlson \t"), "clas ohlson");
}

#[test]
fn normalize_strips_trailing_suffixes() {
    let n = Normalizer::default();
    assert_eq!(n.normalize("Acme Group"), n.normalize("Acme"));
    assert_eq!(n.normalize("Telenor ASA Group"), "telenor asa");
    assert_eq!(n.normalize("Novo Nordisk A/S"), "novo nordisk");
    assert_eq!(n.normalize("Bosch GmbH"), "bosch");
    assert_eq!(n.normalize("Apple Inc."), "apple");
    assert_eq!(n.normalize("Acme, Inc"), "acme");
}

#[test]
fn normalize_strips_stacked_suffixes() {
    let n = Normalizer::default();
    assert_eq!(n.normalize("Axfood Retail Group AB"), "axfood");
}

#[test]
fn normalize_prefers_multi_token_suffix() {
    let n = Normalizer::default();
    assert_eq!(n.normalize("Johnson & Co"), "johnson");
}

#[test]
fn normalize_only_strips_whole_trailing_tokens() {
    let n = Normalizer::default();
    assert_eq!(n.normalize("Coop"), "coop");
    assert_eq!(n.normalize("Group Nine Media"), "group nine media");
    assert_eq!(n.normalize("Stores Direct"), "stores direct");
}

#[test]
fn normalize_never_strips_the_last_token() {
    let n = Normalizer::default();
    assert_eq!(n.normalize("Group"), "group");
    assert_eq!(n.normalize("AB Group"), "ab");
}

#[test]
fn normalize_blank_input_yields_empty_key() {
    let n = Normalizer::default();
    assert_eq!(n.normalize(""), "");
    assert_eq!(n.normalize("   \t "), "");
    assert_eq!(n.normalize(" , "), "");
}

#[test]
fn normalize_is_idempotent() {
    let n = Normalizer::default();
    let samples = [
        "IKEA",
        "Acme Group",
        "Foo AB ,",
        "H & M",
        "Coca-Cola Company",
        "Johnson & Co.",
        "Group",
        "  Åhléns  Stores ",
        "Telia Company AB",
        "7-Eleven",
    ];
    for raw in samples {
        let once = n.normalize(raw);
        assert_eq!(n.normalize(&once), once, "not idempotent for {raw:?}");
        assert_eq!(n.normalize(raw), once, "not deterministic for {raw:?}");
    }
}

#[test]
fn normalize_uses_configured_suffixes() {
    let n = Normalizer::new(&["holding"]);
    assert_eq!(n.normalize("Acme Holding"), "acme");
    assert_eq!(n.normalize("Acme Group"), "acme group");
}

// -----------------------------------------------------------------------
// name_variations
// -----------------------------------------------------------------------

#[test]
fn variations_start_with_the_key() {
    let v = name_variations("h & m");
    assert_eq!(v[0], "h & m");
}

#[test]
fn variations_cover_ampersand_and_compact_forms() {
    let v = name_variations("h & m");
    assert!(v.contains(&"h and m".to_string()));
    assert!(v.contains(&"h&m".to_string()));
    assert!(v.contains(&"handm".to_string()));

    let v = name_variations("marks and spencer");
    assert!(v.contains(&"marks & spencer".to_string()));
}

#[test]
fn variations_cover_hyphen_and_dot_forms() {
    let v = name_variations("coca-cola");
    assert!(v.contains(&"coca cola".to_string()));
    assert!(v.contains(&"cocacola".to_string()));

    let v = name_variations("dr. oetker");
    assert!(v.contains(&"dr oetker".to_string()));
}

#[test]
fn variations_have_no_duplicates() {
    let v = name_variations("lego");
    assert_eq!(v, vec!["lego".to_string()]);
}

#[test]
fn compact_key_unifies_spellings() {
    assert_eq!(compact_key("mcdonald's"), compact_key("mcdonalds"));
    assert_eq!(compact_key("h & m"), compact_key("h and m"));
    assert_eq!(compact_key("7-eleven"), compact_key("7 eleven"));
}

// -----------------------------------------------------------------------
// SpecialCaseTable
// -----------------------------------------------------------------------

#[test]
fn special_table_resolves_aliases_and_display() {
    let n = Normalizer::default();
    let table = SpecialCaseTable::new(&[special("H&M", &["Hennes & Mauritz"])], &n);
    assert!(table.resolve(&n.normalize("Hennes och Mauritz")).is_none());

    let (idx, brand) = table.resolve(&n.normalize("HENNES & MAURITZ AB")).unwrap();
    assert_eq!(idx, 0);
    assert_eq!(brand.display, "H&M");

    let (_, brand) = table.resolve(&n.normalize("h and m")).unwrap();
    assert_eq!(brand.display, "H&M");
}

#[test]
fn special_table_ignores_empty_key() {
    let n = Normalizer::default();
    let table = SpecialCaseTable::new(&[special("IKEA", &[])], &n);
    assert!(table.resolve("").is_none());
}

#[test]
fn special_table_first_brand_keeps_contested_spelling() {
    let n = Normalizer::default();
    let table = SpecialCaseTable::new(
        &[special("Circle K", &["Statoil"]), special("Equinor", &["Statoil"])],
        &n,
    );
    let (_, brand) = table.resolve("statoil").unwrap();
    assert_eq!(brand.display, "Circle K");
}

#[test]
fn name_matcher_from_default_config_has_no_specials() {
    let matcher = NameMatcher::default();
    assert!(matcher.specials.is_empty());
    assert_eq!(matcher.normalize("Nike Group"), "nike");
}
