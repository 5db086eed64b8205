mod input;
mod report;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sbi_core::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "sbi-cli")]
#[command(about = "Reconcile Sustainable Brand Index brand names across countries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where records and reconcile tables come from.
#[derive(Debug, Clone, Args)]
struct SourceArgs {
    /// JSON file holding an array of brand records
    #[arg(long)]
    records: PathBuf,
    /// Reconcile tables (YAML); defaults to `SBI_RECONCILE_CONFIG` when that file exists
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct RequestArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Comma-separated country codes (e.g., SE,NO); defaults to `SBI_DEFAULT_COUNTRIES`
    #[arg(long)]
    countries: Option<String>,
    /// Only use records from this survey year
    #[arg(long)]
    year: Option<i32>,
    /// Require brands to appear in every requested country
    #[arg(long, conflicts_with = "min_countries")]
    all: bool,
    /// Require brands to appear in at least this many countries
    #[arg(long)]
    min_countries: Option<usize>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the canonical brands shared by the requested countries
    Brands(RequestArgs),
    /// Print the best record per brand and country as JSON
    Best(RequestArgs),
    /// Print which countries hold data for each brand as JSON
    Coverage(RequestArgs),
    /// List near-miss spellings between the requested countries
    Diagnose(RequestArgs),
    /// Show the brand group a name resolves to
    Lookup {
        /// Brand name as written in any country table
        name: String,
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let app_config =
        sbi_core::load_app_config_from_env().context("failed to load application config")?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(app_config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    run(cli.command, &app_config, &mut stdout)
}

fn run(command: Commands, app_config: &AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::Brands(args) => {
            let (records, config) = input::load_source(&args.source, app_config)?;
            let request = input::build_request(&args, app_config, &config)?;
            let result = sbi_recon::reconcile(&records, &request, &config)?;
            report::write_brands(out, &result.intersection)
        }
        Commands::Best(args) => {
            let (records, config) = input::load_source(&args.source, app_config)?;
            let request = input::build_request(&args, app_config, &config)?;
            let result = sbi_recon::reconcile(&records, &request, &config)?;
            report::write_json(out, &result.best_records)
        }
        Commands::Coverage(args) => {
            let (records, config) = input::load_source(&args.source, app_config)?;
            let request = input::build_request(&args, app_config, &config)?;
            let result = sbi_recon::reconcile(&records, &request, &config)?;
            report::write_json(out, &result.coverage)
        }
        Commands::Diagnose(args) => {
            let (records, config) = input::load_source(&args.source, app_config)?;
            let request = input::build_request(&args, app_config, &config)?;
            let matches = sbi_recon::diagnose(&records, &request, &config)?;
            report::write_near_matches(out, &matches)
        }
        Commands::Lookup { name, source } => {
            let (records, config) = input::load_source(&source, app_config)?;
            let catalog = sbi_recon::build_catalog(&records, &config)?;
            let group = catalog
                .resolve(&name)
                .ok_or_else(|| anyhow::anyhow!("no brand matches '{name}'"))?;
            report::write_group(out, group)
        }
    }
}
