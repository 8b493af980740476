//! Derived statistics models.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// The 41 county codes plus București, in report order.
pub const COUNTIES: [&str; 42] = [
    "AB", "AR", "AG", "B", "BC", "BH", "BN", "BT", "BR", "BV", "BZ", "CL", "CS", "CJ", "CT", "CV",
    "DB", "DJ", "GL", "GR", "GJ", "HR", "HD", "IL", "IS", "IF", "MM", "MH", "MS", "NT", "OT", "PH",
    "SJ", "SM", "SB", "SV", "TR", "TM", "TL", "VL", "VS", "VN",
];

/// Competition category used by the type histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionType {
    Trail,
    Road,
    Other,
}

impl CompetitionType {
    /// All categories, in report order.
    pub const ALL: [CompetitionType; 3] = [
        CompetitionType::Trail,
        CompetitionType::Road,
        CompetitionType::Other,
    ];

    /// Normalize a free-form type; anything but road/trail is `Other`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "trail" => CompetitionType::Trail,
            "road" => CompetitionType::Road,
            _ => CompetitionType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitionType::Trail => "trail",
            CompetitionType::Road => "road",
            CompetitionType::Other => "other",
        }
    }
}

impl std::fmt::Display for CompetitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Editions per month, index 0 = January.
pub type MonthCounts = [u32; 12];

/// Editions per competition type. Always serializes all three keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct TypeCounts {
    pub trail: u32,
    pub road: u32,
    pub other: u32,
}

impl TypeCounts {
    pub fn increment(&mut self, kind: CompetitionType) {
        match kind {
            CompetitionType::Trail => self.trail += 1,
            CompetitionType::Road => self.road += 1,
            CompetitionType::Other => self.other += 1,
        }
    }

    pub fn get(&self, kind: CompetitionType) -> u32 {
        match kind {
            CompetitionType::Trail => self.trail,
            CompetitionType::Road => self.road,
            CompetitionType::Other => self.other,
        }
    }

    pub fn total(&self) -> u32 {
        self.trail + self.road + self.other
    }
}

/// Editions per county over the fixed [`COUNTIES`] key set.
///
/// Serializes as a map with every county present, zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountyCounts {
    counts: [u32; COUNTIES.len()],
}

impl Default for CountyCounts {
    fn default() -> Self {
        Self {
            counts: [0; COUNTIES.len()],
        }
    }
}

impl CountyCounts {
    fn index_of(code: &str) -> Option<usize> {
        COUNTIES.iter().position(|c| *c == code)
    }

    /// Count one edition. Returns false (and counts nothing) for unknown codes.
    pub fn increment(&mut self, code: &str) -> bool {
        match Self::index_of(code) {
            Some(idx) => {
                self.counts[idx] += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, code: &str) -> Option<u32> {
        Self::index_of(code).map(|idx| self.counts[idx])
    }

    /// (code, count) pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        COUNTIES.iter().copied().zip(self.counts.iter().copied())
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

impl Serialize for CountyCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(COUNTIES.len()))?;
        for (code, count) in self.iter() {
            map.serialize_entry(code, &count)?;
        }
        map.end()
    }
}

/// A town and its edition count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TownCount {
    pub name: String,
    pub count: u32,
}

impl TownCount {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Ranked towns for one year. Serializes as an ordered `{town: count}` map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TownRanking(pub Vec<TownCount>);

impl TownRanking {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.0.iter().find(|t| t.name == name).map(|t| t.count)
    }
}

impl Serialize for TownRanking {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for town in &self.0 {
            map.serialize_entry(&town.name, &town.count)?;
        }
        map.end()
    }
}

/// The five aggregates stored under `statistics` in the statistics document.
///
/// Every map is keyed by the year as a string, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct StatisticsReport {
    pub total_competitions: BTreeMap<String, u32>,
    pub competitions_by_month: BTreeMap<String, MonthCounts>,
    pub competitions_by_type: BTreeMap<String, TypeCounts>,
    pub competitions_by_county: BTreeMap<String, CountyCounts>,
    pub competitions_by_towns: BTreeMap<String, TownRanking>,
}

impl StatisticsReport {
    /// Keys replaced in the persisted document; everything else is preserved.
    pub const KEYS: [&'static str; 5] = [
        "total_competitions",
        "competitions_by_month",
        "competitions_by_type",
        "competitions_by_county",
        "competitions_by_towns",
    ];
}
