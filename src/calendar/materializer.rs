//! Event materialization: expands every competition's editions into
//! per-year event tables.

use std::collections::BTreeMap;

use tracing::debug;

use super::resolver::resolve_edition;
use crate::models::{CompetitionDocument, Event};

/// Events grouped by target year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearlyEvents {
    by_year: BTreeMap<i32, Vec<Event>>,
}

impl YearlyEvents {
    /// Events for one year, sorted. `None` if the year was not a target.
    pub fn get(&self, year: i32) -> Option<&[Event]> {
        self.by_year.get(&year).map(|v| v.as_slice())
    }

    /// (year, events) pairs, years ascending.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &[Event])> {
        self.by_year.iter().map(|(y, v)| (*y, v.as_slice()))
    }

    pub fn years(&self) -> Vec<i32> {
        self.by_year.keys().copied().collect()
    }

    /// Total events across all years.
    pub fn total(&self) -> usize {
        self.by_year.values().map(Vec::len).sum()
    }
}

/// Sort events by date, then id, with the sentinel id last among equal dates.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by_key(Event::sort_key);
}

/// Materialize the events of both competition lists for the given years.
///
/// Every target year gets a (possibly empty) bucket; editions in other years
/// are skipped. The document is not modified.
pub fn materialize(document: &CompetitionDocument, target_years: &[i32]) -> YearlyEvents {
    let mut by_year: BTreeMap<i32, Vec<Event>> =
        target_years.iter().map(|y| (*y, Vec::new())).collect();

    for competition in document.all_competitions() {
        for edition in &competition.editions {
            let Some(bucket) = by_year.get_mut(&edition.year) else {
                debug!(
                    "Skipping '{}' edition {}: not a target year",
                    competition.name, edition.year
                );
                continue;
            };

            bucket.push(resolve_edition(competition, edition));
        }
    }

    for events in by_year.values_mut() {
        sort_events(events);
    }

    YearlyEvents { by_year }
}
