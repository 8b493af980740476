//! Input catalogue model: competitions and their yearly editions.

use serde::{Deserialize, Serialize};

/// Id shared by every competition excluded from statistics.
pub const SENTINEL_ID: u32 = 0;

/// County marker used by cross-border (Moldova) competitions.
pub const CROSS_BORDER_COUNTY: &str = "MDA*";

/// One year's concrete instance of a competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
    pub year: i32,
    pub month: u32,
    pub day: u32,

    /// Replaces the competition's distances for this year only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_distances: Option<Vec<String>>,

    /// Registration/info link for this year only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_link: Option<String>,
}

impl Edition {
    /// Create an edition with no per-year overrides.
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            custom_distances: None,
            event_link: None,
        }
    }

    /// Builder method to override distances for this year.
    pub fn with_custom_distances(mut self, distances: Vec<String>) -> Self {
        self.custom_distances = Some(distances);
        self
    }

    /// Builder method to set the per-year link.
    pub fn with_event_link(mut self, link: impl Into<String>) -> Self {
        self.event_link = Some(link.into());
        self
    }
}

/// A recurring sporting event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    /// 1..N for tracked competitions, 0 for the no-statistics list
    pub id: u32,

    pub name: String,

    /// Town or city; empty for virtual competitions
    #[serde(default)]
    pub location: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_details: Option<String>,

    /// County code (e.g. "CJ", "B", "MDA*")
    #[serde(default)]
    pub county: String,

    /// Free-form; "road" and "trail" are the canonical values
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub distances: Vec<String>,

    #[serde(default)]
    pub link: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_fb: Option<String>,

    #[serde(default)]
    pub editions: Vec<Edition>,
}

impl Competition {
    /// Create a competition with empty descriptive fields.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            location: String::new(),
            location_details: None,
            county: String::new(),
            kind: String::new(),
            distances: Vec::new(),
            link: String::new(),
            link_fb: None,
            editions: Vec::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_location_details(mut self, details: impl Into<String>) -> Self {
        self.location_details = Some(details.into());
        self
    }

    pub fn with_county(mut self, county: impl Into<String>) -> Self {
        self.county = county.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_distances(mut self, distances: &[&str]) -> Self {
        self.distances = distances.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_link_fb(mut self, link: impl Into<String>) -> Self {
        self.link_fb = Some(link.into());
        self
    }

    pub fn with_edition(mut self, edition: Edition) -> Self {
        self.editions.push(edition);
        self
    }

    /// Whether this competition uses the "no canonical id" sentinel.
    pub fn is_untracked(&self) -> bool {
        self.id == SENTINEL_ID
    }

    /// Whether this is a cross-border competition.
    pub fn is_cross_border(&self) -> bool {
        self.county == CROSS_BORDER_COUNTY
    }
}

/// Root of `input-all-competitions.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionDocument {
    /// Tracked competitions with full statistics support
    pub competitions: Vec<Competition>,

    /// Competitions excluded from aggregate statistics
    pub competitions_no_statistics: Vec<Competition>,
}

impl CompetitionDocument {
    pub fn new(
        competitions: Vec<Competition>,
        competitions_no_statistics: Vec<Competition>,
    ) -> Self {
        Self {
            competitions,
            competitions_no_statistics,
        }
    }

    /// Tracked competitions followed by the no-statistics list.
    pub fn all_competitions(&self) -> impl Iterator<Item = &Competition> {
        self.competitions
            .iter()
            .chain(self.competitions_no_statistics.iter())
    }

    /// Number of competitions across both lists.
    pub fn len(&self) -> usize {
        self.competitions.len() + self.competitions_no_statistics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_competition_deserialize_full() {
        let value = json!({
            "id": 7,
            "name": "Maratonul Clujului",
            "location": "Cluj-Napoca",
            "location_details": "Parcul Central",
            "county": "CJ",
            "type": "road",
            "distances": ["42km", "21km"],
            "link": "https://example.com",
            "link_fb": "https://facebook.com/mc",
            "editions": [
                {"year": 2025, "month": 4, "day": 13},
                {"year": 2024, "month": 4, "day": 14, "custom_distances": ["21km"], "event_link": "https://example.com/2024"}
            ]
        });

        let competition: Competition = serde_json::from_value(value).unwrap();

        assert_eq!(competition.id, 7);
        assert_eq!(competition.kind, "road");
        assert_eq!(competition.location_details.as_deref(), Some("Parcul Central"));
        assert_eq!(competition.editions.len(), 2);
        assert!(competition.editions[0].custom_distances.is_none());
        assert_eq!(
            competition.editions[1].custom_distances,
            Some(vec!["21km".to_string()])
        );
    }

    #[test]
    fn test_competition_optional_fields_default() {
        let value = json!({
            "id": 0,
            "name": "Virtual Run",
            "editions": [{"year": 2025, "month": 1, "day": 1}]
        });

        let competition: Competition = serde_json::from_value(value).unwrap();

        assert!(competition.location.is_empty());
        assert!(competition.county.is_empty());
        assert!(competition.kind.is_empty());
        assert!(competition.link_fb.is_none());
        assert!(competition.is_untracked());
    }

    #[test]
    fn test_editions_do_not_share_defaults() {
        let mut a = Edition::new(2025, 1, 1);
        let b = Edition::new(2025, 1, 1);

        a.custom_distances.get_or_insert_with(Vec::new).push("5km".into());

        assert!(b.custom_distances.is_none());
    }

    #[test]
    fn test_cross_border() {
        let competition = Competition::new(0, "Chisinau Half").with_county("MDA*");
        assert!(competition.is_cross_border());
        assert!(!Competition::new(1, "X").with_county("CJ").is_cross_border());
    }

    #[test]
    fn test_document_all_competitions_order() {
        let doc = CompetitionDocument::new(
            vec![Competition::new(1, "A"), Competition::new(2, "B")],
            vec![Competition::new(0, "C")],
        );

        let names: Vec<_> = doc.all_competitions().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(doc.len(), 3);
    }
}
