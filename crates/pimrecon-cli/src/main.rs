mod normalize;
mod reconcile;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::normalize::NormalizeCommands;

#[derive(Debug, Parser)]
#[command(name = "pimrecon")]
#[command(about = "Reconcile product master data against vendor catalog values")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare spreadsheet records against scraped catalog data
    Reconcile {
        /// JSON array of spreadsheet rows keyed by column header
        #[arg(long)]
        records: PathBuf,
        /// JSON object mapping catalog identifier to its scraped attributes
        #[arg(long)]
        web: PathBuf,
        /// Reconciliation profile; overrides `PIMRECON_PROFILE_PATH`
        #[arg(long)]
        profile: Option<PathBuf>,
        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show how a single raw value normalizes
    Normalize {
        #[command(subcommand)]
        command: NormalizeCommands,
    },
}

fn main() -> anyhow::Result<()> {
    let config = pimrecon_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Reconcile {
            records,
            web,
            profile,
            output,
        }) => reconcile::run_reconcile(
            &config,
            &records,
            &web,
            profile.as_deref(),
            output.as_deref(),
        )?,
        Some(Commands::Normalize { command }) => {
            normalize::run_normalize(&command, config.output_pretty)?;
        }
        None => println!("pimrecon: use `reconcile` or `normalize`; see --help"),
    }

    Ok(())
}
