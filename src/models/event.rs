//! Materialized per-year event model.

use serde::{Deserialize, Serialize};

use super::SENTINEL_ID;

/// A flattened (competition, edition) pair for one target year.
///
/// Field order is the serialized order of `output-events-<year>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,

    pub location: String,

    /// Empty when the competition has no location details
    pub location_details: String,

    /// e.g. "Sun 13-Apr-2025"
    pub display_date: String,

    pub county: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub distances: Vec<String>,

    pub link: String,

    /// Source competition id (0 for untracked competitions)
    pub id: u32,

    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Event {
    /// Ordering key: date first, then [`IdRank`].
    pub fn sort_key(&self) -> (i32, u32, u32, IdRank) {
        (self.year, self.month, self.day, IdRank::from_id(self.id))
    }
}

/// Id component of the event ordering.
///
/// The sentinel id sorts after every canonical id, as if it were +infinity.
/// Only the id component is affected; dates always order first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdRank {
    Canonical(u32),
    Sentinel,
}

impl IdRank {
    pub fn from_id(id: u32) -> Self {
        if id == SENTINEL_ID {
            IdRank::Sentinel
        } else {
            IdRank::Canonical(id)
        }
    }
}
