//! Catalogue update steps and the full update run.
//!
//! Every step reads the catalogue from disk on its own, so steps can run
//! alone from the command line or in sequence through [`update_all`].

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::calculate::compute_statistics;
use crate::calendar::materialize;
use crate::config::AppConfig;
use crate::diacritics::{DiacriticCorrector, DiacriticReport};
use crate::directory::build_directory;
use crate::models::{CompetitionDocument, StatisticsReport};
use crate::storage::{
    parse_document, read_json, write_json, write_statistics, write_yearly_events, StorageConfig,
};
use crate::validate::{validate, ValidationReport};

fn load_document(storage: &StorageConfig) -> Result<CompetitionDocument> {
    let path = storage.input_path();
    let value = read_json(&path)
        .with_context(|| format!("Failed to read competitions from {:?}", path))?;
    let document = parse_document(&path, value)
        .with_context(|| format!("Malformed competition catalogue {:?}", path))?;
    info!(
        "Loaded {} tracked and {} untracked competitions",
        document.competitions.len(),
        document.competitions_no_statistics.len()
    );
    Ok(document)
}

/// Check the catalogue. Fails when any check reports a violation.
pub fn run_validation(storage: &StorageConfig) -> Result<ValidationReport> {
    let path = storage.input_path();
    info!("Validating {:?}", path);

    let value = read_json(&path)
        .with_context(|| format!("Failed to read competitions from {:?}", path))?;
    let report = validate(&value);

    if !report.is_valid() {
        let failed = report.results.len() - report.passed_count();
        bail!(
            "Validation failed: {} of {} checks reported {} error(s)",
            failed,
            report.results.len(),
            report.errors().count()
        );
    }

    info!("All {} checks passed", report.results.len());
    Ok(report)
}

/// Write one event table per year. Returns the number of files written.
pub fn run_tables(storage: &StorageConfig, years: &[i32]) -> Result<usize> {
    let document = load_document(storage)?;
    let events = materialize(&document, years);

    let written = write_yearly_events(storage, &events)
        .with_context(|| format!("Failed to write event tables to {:?}", storage.data_dir))?;

    info!("Wrote {} event tables ({} events)", written, events.total());
    Ok(written)
}

/// Recompute the aggregates and merge them into the statistics document.
pub fn run_statistics(storage: &StorageConfig) -> Result<StatisticsReport> {
    let document = load_document(storage)?;
    let report = compute_statistics(&document);

    let path = storage.statistics_path();
    write_statistics(&path, &report)
        .with_context(|| format!("Failed to update statistics in {:?}", path))?;

    Ok(report)
}

/// Write the alphabetical directory. Returns the number of entries.
pub fn run_directory(storage: &StorageConfig, years: &[i32]) -> Result<usize> {
    let document = load_document(storage)?;
    let directory = build_directory(&document, years);

    let path = storage.directory_path();
    write_json(&path, &directory)
        .with_context(|| format!("Failed to write directory to {:?}", path))?;

    info!("Saved directory to {:?}", path);
    Ok(directory.total())
}

/// Correct diacritics in the catalogue, rewriting it only when something
/// changed and `dry_run` is off.
pub fn run_fix_diacritics(storage: &StorageConfig, dry_run: bool) -> Result<DiacriticReport> {
    let path = storage.input_path();
    let mut value = read_json(&path)
        .with_context(|| format!("Failed to read competitions from {:?}", path))?;

    let corrector = DiacriticCorrector::new().context("Failed to compile diacritic rules")?;
    let report = corrector.fix_document(&mut value);

    for competition in &report.competitions {
        let id = competition
            .id
            .map_or_else(|| "?".to_string(), |id| id.to_string());
        info!(
            "{}[{}] '{}' (id={}):",
            competition.list, competition.index, competition.name, id
        );
        for change in &competition.changes {
            info!("  - {}: {} -> {}", change.field, change.from, change.to);
        }
    }

    if report.is_empty() {
        info!("No changes needed, all diacritics are correct");
    } else if dry_run {
        info!("Dry run: {} change(s) not saved", report.total_changes());
    } else {
        write_json(&path, &value)
            .with_context(|| format!("Failed to save corrected catalogue to {:?}", path))?;
        info!("Saved {} change(s) to {:?}", report.total_changes(), path);
    }

    Ok(report)
}

/// What a full update produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    pub tables_written: usize,
    pub statistics_years: usize,
    pub directory_entries: Option<usize>,
}

/// Validate, then regenerate event tables, statistics and (unless skipped)
/// the directory. The first failing step aborts the run.
pub fn update_all(config: &AppConfig, skip_directory: bool) -> Result<UpdateSummary> {
    let storage = config.storage();
    let steps = if skip_directory { 3 } else { 4 };

    info!("[1/{}] Validating competitions", steps);
    run_validation(&storage).context("Update aborted at validation")?;

    info!("[2/{}] Generating event tables", steps);
    let tables_written =
        run_tables(&storage, &config.event_years).context("Update aborted at event tables")?;

    info!("[3/{}] Calculating statistics", steps);
    let statistics = run_statistics(&storage).context("Update aborted at statistics")?;

    let directory_entries = if skip_directory {
        warn!("Skipping directory");
        None
    } else {
        info!("[4/{}] Sorting competition directory", steps);
        Some(
            run_directory(&storage, &config.directory_years)
                .context("Update aborted at directory")?,
        )
    };

    info!("All {} steps completed", steps);
    Ok(UpdateSummary {
        tables_written,
        statistics_years: statistics.total_competitions.len(),
        directory_entries,
    })
}
