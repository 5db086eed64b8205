//! Plain-text and JSON output for the subcommands.

use std::io::Write;

use serde::Serialize;

use sbi_recon::{BrandGroup, Intersection, NearMatch, NearMatchKind};

/// Status line followed by one canonical name per line. Names that came
/// from the fallback list are marked with `*`.
pub(crate) fn write_brands(out: &mut impl Write, intersection: &Intersection) -> anyhow::Result<()> {
    writeln!(
        out,
        "status: {} ({} brands, {} from fallback)",
        intersection.status,
        intersection.brands.len(),
        intersection.fallback_brands.len()
    )?;
    for brand in &intersection.brands {
        if intersection.fallback_brands.contains(brand) {
            writeln!(out, "{brand} *")?;
        } else {
            writeln!(out, "{brand}")?;
        }
    }
    Ok(())
}

pub(crate) fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub(crate) fn write_near_matches(out: &mut impl Write, matches: &[NearMatch]) -> anyhow::Result<()> {
    if matches.is_empty() {
        writeln!(out, "no near matches found")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<8}{:<30}{:<8}{:<30}{:<6}KIND",
        "LEFT", "NAME", "RIGHT", "NAME", "DIST"
    )?;
    for m in matches {
        writeln!(
            out,
            "{:<8}{:<30}{:<8}{:<30}{:<6}{}",
            m.left_country,
            m.left_name,
            m.right_country,
            m.right_name,
            m.distance,
            kind_label(m)
        )?;
    }
    Ok(())
}

fn kind_label(m: &NearMatch) -> &'static str {
    match m.kind {
        NearMatchKind::Substring => "substring",
        NearMatchKind::EditDistance => "edit",
    }
}

pub(crate) fn write_group(out: &mut impl Write, group: &BrandGroup) -> anyhow::Result<()> {
    writeln!(out, "canonical: {}", group.canonical)?;
    writeln!(out, "key:       {}", group.key)?;
    writeln!(out, "special:   {}", group.special)?;
    writeln!(out, "variants:  {}", group.variants.join(", "))?;
    Ok(())
}
