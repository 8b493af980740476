use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use running_calendar::config::AppConfig;
use running_calendar::pipeline::{
    run_directory, run_fix_diacritics, run_statistics, run_tables, run_validation, update_all,
};

#[derive(Parser)]
#[command(name = "running-calendar")]
#[command(about = "Yearly event tables, statistics and directory for a running-competition catalogue")]
#[command(version)]
struct Cli {
    /// Path to configuration file (defaults are used if it does not exist)
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the competition catalogue
    Validate,

    /// Generate the per-year event tables
    Tables,

    /// Recompute the statistics document
    Statistics,

    /// Generate the alphabetical competition directory
    Directory,

    /// Correct missing Romanian diacritics in the catalogue
    FixDiacritics {
        /// Report the corrections without saving them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate, then regenerate every output
    UpdateAll {
        /// Do not regenerate the directory
        #[arg(long)]
        skip_directory: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }

    // Initialize tracing
    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting running-calendar v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Using data directory {:?}", config.data_dir);

    let storage = config.storage();

    match cli.command {
        Commands::Validate => {
            let report = run_validation(&storage)?;
            println!(
                "\nAll {} validation checks passed.",
                report.results.len()
            );
        }

        Commands::Tables => {
            let written = run_tables(&storage, &config.event_years)?;
            println!("\n=== Event Tables ===");
            println!("Files written:    {}", written);
        }

        Commands::Statistics => {
            let report = run_statistics(&storage)?;
            println!("\n=== Statistics ===");
            for (year, total) in &report.total_competitions {
                println!("{}:             {}", year, total);
            }
        }

        Commands::Directory => {
            let entries = run_directory(&storage, &config.directory_years)?;
            println!("\n=== Directory ===");
            println!("Competitions:     {}", entries);
        }

        Commands::FixDiacritics { dry_run } => {
            let report = run_fix_diacritics(&storage, dry_run)?;
            println!("\n=== Diacritic Corrections ===");
            println!("Competitions:     {}", report.competitions.len());
            println!("Changes:          {}", report.total_changes());
            if dry_run && !report.is_empty() {
                println!("\n(dry run - catalogue not modified)");
            }
        }

        Commands::UpdateAll { skip_directory } => {
            let summary = update_all(&config, skip_directory)?;
            println!("\n=== Update complete ===");
            println!("Event tables:     {}", summary.tables_written);
            println!("Statistics years: {}", summary.statistics_years);
            match summary.directory_entries {
                Some(entries) => println!("Directory:        {}", entries),
                None => println!("Directory:        skipped"),
            }
        }
    }

    Ok(())
}
