//! Statistics calculation engine.
//!
//! Computes the yearly aggregates of the statistics document:
//! - Editions per year
//! - Editions per month
//! - Editions per competition type
//! - Editions per county
//! - Top towns (see [`towns`])
//!
//! Only tracked competitions are counted; the no-statistics list never
//! contributes.

pub mod towns;

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use crate::models::{
    Competition, CompetitionDocument, CompetitionType, CountyCounts, MonthCounts,
    StatisticsReport, TownRanking, TypeCounts,
};

pub use towns::{rank_towns, rank_towns_by_year};

/// Iterate (year key, competition, month) for every edition.
fn editions<'a>(
    competitions: &'a [Competition],
) -> impl Iterator<Item = (String, &'a Competition, u32)> + 'a {
    competitions.iter().flat_map(|c| {
        c.editions
            .iter()
            .map(move |e| (e.year.to_string(), c, e.month))
    })
}

/// Count editions per year.
pub fn total_by_year(competitions: &[Competition]) -> BTreeMap<String, u32> {
    let mut totals = BTreeMap::new();
    for (year, _, _) in editions(competitions) {
        *totals.entry(year).or_insert(0) += 1;
    }
    totals
}

/// Count editions per month for each year. Months outside 1-12 are dropped.
pub fn by_month(competitions: &[Competition]) -> BTreeMap<String, MonthCounts> {
    let mut months: BTreeMap<String, MonthCounts> = BTreeMap::new();
    for (year, competition, month) in editions(competitions) {
        if !(1..=12).contains(&month) {
            debug!(
                "Dropping '{}' {} from month histogram: month {} out of range",
                competition.name, year, month
            );
            continue;
        }
        months.entry(year).or_insert([0; 12])[month as usize - 1] += 1;
    }
    months
}

/// Count editions per normalized competition type for each year.
pub fn by_type(competitions: &[Competition]) -> BTreeMap<String, TypeCounts> {
    let mut types: BTreeMap<String, TypeCounts> = BTreeMap::new();
    for (year, competition, _) in editions(competitions) {
        types
            .entry(year)
            .or_default()
            .increment(CompetitionType::from_raw(&competition.kind));
    }
    types
}

/// Count editions per county for each year.
///
/// Competitions without a county are ignored. Codes outside the fixed
/// county list are dropped, but the year still gets a zero-filled entry.
pub fn by_county(competitions: &[Competition]) -> BTreeMap<String, CountyCounts> {
    let mut counties: BTreeMap<String, CountyCounts> = BTreeMap::new();
    for (year, competition, _) in editions(competitions) {
        if competition.county.is_empty() {
            continue;
        }
        let counted = counties
            .entry(year.clone())
            .or_default()
            .increment(&competition.county);
        if !counted {
            debug!(
                "Dropping '{}' {} from county histogram: unknown county '{}'",
                competition.name, year, competition.county
            );
        }
    }
    counties
}

/// Raw edition counts per town for each year. Empty locations are ignored.
pub fn town_counts(competitions: &[Competition]) -> BTreeMap<String, HashMap<String, u32>> {
    let mut towns: BTreeMap<String, HashMap<String, u32>> = BTreeMap::new();
    for (year, competition, _) in editions(competitions) {
        if competition.location.is_empty() {
            continue;
        }
        *towns
            .entry(year)
            .or_default()
            .entry(competition.location.clone())
            .or_insert(0) += 1;
    }
    towns
}

/// Top towns per year.
pub fn by_towns(competitions: &[Competition]) -> BTreeMap<String, TownRanking> {
    rank_towns_by_year(&town_counts(competitions))
}

/// Compute every aggregate over the tracked competitions of `document`.
pub fn compute_statistics(document: &CompetitionDocument) -> StatisticsReport {
    let tracked = &document.competitions;

    info!("Calculating statistics over {} tracked competitions", tracked.len());

    let report = StatisticsReport {
        total_competitions: total_by_year(tracked),
        competitions_by_month: by_month(tracked),
        competitions_by_type: by_type(tracked),
        competitions_by_county: by_county(tracked),
        competitions_by_towns: by_towns(tracked),
    };

    info!(
        "Total competitions by year: {:?}",
        report.total_competitions
    );
    debug!(
        "Aggregates cover {} month / {} type / {} county / {} town years",
        report.competitions_by_month.len(),
        report.competitions_by_type.len(),
        report.competitions_by_county.len(),
        report.competitions_by_towns.len()
    );

    report
}
