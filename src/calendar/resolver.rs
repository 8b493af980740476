//! Edition resolution: finds the edition for a year and resolves its
//! display fields.

use chrono::NaiveDate;

use crate::models::{Competition, Edition, Event};

/// How a display date is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "Sun 13-Apr-2025", used by the yearly event tables
    WithYear,
    /// "Sun 13-Apr", used by the directory where the year is the column
    WithoutYear,
}

impl DateStyle {
    fn format_str(&self) -> &'static str {
        match self {
            DateStyle::WithYear => "%a %-d-%b-%Y",
            DateStyle::WithoutYear => "%a %-d-%b",
        }
    }
}

/// Find the edition held in `year`, if any.
pub fn find_edition(competition: &Competition, year: i32) -> Option<&Edition> {
    competition.editions.iter().find(|e| e.year == year)
}

/// Format a calendar date for display. Invalid dates yield an empty string.
pub fn display_date(year: i32, month: u32, day: u32, style: DateStyle) -> String {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date.format(style.format_str()).to_string(),
        None => String::new(),
    }
}

/// Edition distances if overridden, otherwise the competition defaults.
pub fn resolve_distances(competition: &Competition, edition: &Edition) -> Vec<String> {
    match &edition.custom_distances {
        Some(custom) => custom.clone(),
        None => competition.distances.clone(),
    }
}

/// Link precedence: competition link, edition link, facebook link, empty.
pub fn resolve_link(competition: &Competition, edition: &Edition) -> String {
    if !competition.link.is_empty() {
        return competition.link.clone();
    }

    if let Some(link) = edition.event_link.as_deref().filter(|l| !l.is_empty()) {
        return link.to_string();
    }

    competition
        .link_fb
        .as_deref()
        .filter(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Build the event for one edition of `competition`.
pub fn resolve_edition(competition: &Competition, edition: &Edition) -> Event {
    Event {
        name: competition.name.clone(),
        location: competition.location.clone(),
        location_details: competition.location_details.clone().unwrap_or_default(),
        display_date: display_date(
            edition.year,
            edition.month,
            edition.day,
            DateStyle::WithYear,
        ),
        county: competition.county.clone(),
        kind: competition.kind.clone(),
        distances: resolve_distances(competition, edition),
        link: resolve_link(competition, edition),
        id: competition.id,
        year: edition.year,
        month: edition.month,
        day: edition.day,
    }
}

/// Resolve the event for `competition` in `year`.
///
/// Returns `None` when the competition has no edition that year.
pub fn resolve_event(competition: &Competition, year: i32) -> Option<Event> {
    find_edition(competition, year).map(|edition| resolve_edition(competition, edition))
}
