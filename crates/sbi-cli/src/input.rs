//! Reading record files and reconcile tables, and turning flags into a
//! [`ReconcileRequest`].

use std::path::Path;

use anyhow::Context;

use sbi_core::{AppConfig, BrandRecord, ReconcileConfig};
use sbi_recon::{MatchMode, ReconcileRequest};

use crate::{RequestArgs, SourceArgs};

/// Load the records and reconcile tables named by `source`.
pub(crate) fn load_source(
    source: &SourceArgs,
    app_config: &AppConfig,
) -> anyhow::Result<(Vec<BrandRecord>, ReconcileConfig)> {
    let records = load_records(&source.records)?;
    let config = load_config(source.config.as_deref(), app_config)?;
    Ok((records, config))
}

/// Parse a JSON array of brand records.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a record array.
pub(crate) fn load_records(path: &Path) -> anyhow::Result<Vec<BrandRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read records from {}", path.display()))?;
    let records: Vec<BrandRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse records in {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Reconcile tables from `explicit`, else from the configured path when it
/// exists, else the built-in defaults.
pub(crate) fn load_config(
    explicit: Option<&Path>,
    app_config: &AppConfig,
) -> anyhow::Result<ReconcileConfig> {
    let path = match explicit {
        Some(path) => path,
        None if app_config.reconcile_config_path.exists() => {
            app_config.reconcile_config_path.as_path()
        }
        None => {
            tracing::info!(
                path = %app_config.reconcile_config_path.display(),
                "reconcile config not found; using built-in defaults"
            );
            return Ok(ReconcileConfig::default());
        }
    };

    sbi_core::load_reconcile_config(path)
        .with_context(|| format!("failed to load reconcile config {}", path.display()))
}

/// Build the request from flags, falling back to the configured countries
/// and minimum.
pub(crate) fn build_request(
    args: &RequestArgs,
    app_config: &AppConfig,
    config: &ReconcileConfig,
) -> anyhow::Result<ReconcileRequest> {
    let countries = match &args.countries {
        Some(raw) => sbi_core::parse_country_list("--countries", raw)?,
        None => app_config.default_countries.clone(),
    };

    let mode = if args.all {
        MatchMode::All
    } else {
        MatchMode::AtLeast(args.min_countries.unwrap_or(config.min_countries))
    };

    let mut request = ReconcileRequest::new(countries, mode);
    if let Some(year) = args.year {
        request = request.with_year(year);
    }
    Ok(request)
}

#[cfg(test)]
#[path = "input_test.rs"]
mod tests;
