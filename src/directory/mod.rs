//! Alphabetical competition directory.
//!
//! Builds three name-sorted lists (tracked, cross-border, other untracked),
//! each carrying the edition date of a fixed set of years. Names are ordered
//! by Romanian alphabet: A Ă Â B C D E F G H I Î J K L M N O P Q R S Ș T Ț U
//! V W X Y Z.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::info;

use crate::calendar::{display_date, find_edition, DateStyle};
use crate::models::{Competition, CompetitionDocument};

/// Letters placed right after their base letter, with their substitution.
const COLLATION_SUBSTITUTIONS: [(char, &str); 7] = [
    ('ă', "a~1"),
    ('â', "a~2"),
    ('î', "i~1"),
    ('ș', "s~1"),
    ('ş', "s~1"),
    ('ț', "t~1"),
    ('ţ', "t~1"),
];

/// Sort key for Romanian alphabetical order.
///
/// Lowercases the text, then replaces every extended letter with its base
/// letter followed by a marker that orders after any plain letter.
pub fn collation_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len() + 8);
    for c in text.chars().flat_map(char::to_lowercase) {
        match COLLATION_SUBSTITUTIONS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => key.push_str(to),
            None => key.push(c),
        }
    }
    key
}

/// Sort entries by the collation key of their name. Stable for equal keys.
pub fn sort_by_name(entries: &mut [DirectoryEntry]) {
    entries.sort_by_cached_key(|e| collation_key(&e.name));
}

/// Edition dates for the directory years, serialized as `year_<y>` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditionDates(pub Vec<(i32, String)>);

impl EditionDates {
    /// Date without year per requested year, or "" when there is no edition.
    pub fn for_competition(competition: &Competition, years: &[i32]) -> Self {
        Self(
            years
                .iter()
                .map(|year| {
                    let date = find_edition(competition, *year)
                        .map(|e| display_date(e.year, e.month, e.day, DateStyle::WithoutYear))
                        .unwrap_or_default();
                    (*year, date)
                })
                .collect(),
        )
    }

    pub fn get(&self, year: i32) -> Option<&str> {
        self.0
            .iter()
            .find(|(y, _)| *y == year)
            .map(|(_, d)| d.as_str())
    }
}

impl Serialize for EditionDates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (year, date) in &self.0 {
            map.serialize_entry(&format!("year_{}", year), date)?;
        }
        map.end()
    }
}

/// One row of the directory.
///
/// Tracked rows carry id, location and county; cross-border rows carry the
/// location; other rows carry only the name and dates.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DirectoryEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,

    #[serde(flatten)]
    pub dates: EditionDates,
}

impl DirectoryEntry {
    fn tracked(competition: &Competition, years: &[i32]) -> Self {
        Self {
            id: Some(competition.id),
            name: competition.name.clone(),
            location: Some(competition.location.clone()),
            county: Some(competition.county.clone()),
            dates: EditionDates::for_competition(competition, years),
        }
    }

    fn cross_border(competition: &Competition, years: &[i32]) -> Self {
        Self {
            id: None,
            name: competition.name.clone(),
            location: Some(competition.location.clone()),
            county: None,
            dates: EditionDates::for_competition(competition, years),
        }
    }

    fn other(competition: &Competition, years: &[i32]) -> Self {
        Self {
            id: None,
            name: competition.name.clone(),
            location: None,
            county: None,
            dates: EditionDates::for_competition(competition, years),
        }
    }
}

/// The directory document written to `output-all-competitions-list.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct CompetitionDirectory {
    pub competitions: Vec<DirectoryEntry>,
    pub competitions_moldova: Vec<DirectoryEntry>,
    pub competitions_other: Vec<DirectoryEntry>,
}

impl CompetitionDirectory {
    pub fn total(&self) -> usize {
        self.competitions.len() + self.competitions_moldova.len() + self.competitions_other.len()
    }
}

/// Build the sorted directory for the given years.
pub fn build_directory(document: &CompetitionDocument, years: &[i32]) -> CompetitionDirectory {
    let mut directory = CompetitionDirectory {
        competitions: document
            .competitions
            .iter()
            .map(|c| DirectoryEntry::tracked(c, years))
            .collect(),
        ..Default::default()
    };

    for competition in &document.competitions_no_statistics {
        if competition.is_cross_border() {
            directory
                .competitions_moldova
                .push(DirectoryEntry::cross_border(competition, years));
        } else {
            directory
                .competitions_other
                .push(DirectoryEntry::other(competition, years));
        }
    }

    sort_by_name(&mut directory.competitions);
    sort_by_name(&mut directory.competitions_moldova);
    sort_by_name(&mut directory.competitions_other);

    info!(
        "Directory: {} regular, {} Moldova, {} other ({} total)",
        directory.competitions.len(),
        directory.competitions_moldova.len(),
        directory.competitions_other.len(),
        directory.total()
    );

    directory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Edition;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn names(entries: &[DirectoryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_collation_key() {
        assert_eq!(collation_key("Ștefănești"), "s~1tefa~1nes~1ti");
        assert_eq!(collation_key("Î"), "i~1");
        assert_eq!(collation_key("Câmpina"), "ca~2mpina");
    }

    #[test]
    fn test_romanian_order() {
        let mut entries: Vec<DirectoryEntry> = [
            "Ţara", "Zimbru", "Sibiu", "Șimleu", "Tei", "Arad", "Ăla", "Âla",
        ]
        .iter()
        .map(|n| DirectoryEntry::other(&Competition::new(0, *n), &[]))
        .collect();

        sort_by_name(&mut entries);

        assert_eq!(
            names(&entries),
            vec!["Arad", "Ăla", "Âla", "Sibiu", "Șimleu", "Tei", "Ţara", "Zimbru"]
        );
    }

    #[test]
    fn test_case_insensitive_order() {
        let mut entries: Vec<DirectoryEntry> = ["beta", "Alpha", "Gamma"]
            .iter()
            .map(|n| DirectoryEntry::other(&Competition::new(0, *n), &[]))
            .collect();

        sort_by_name(&mut entries);

        assert_eq!(names(&entries), vec!["Alpha", "beta", "Gamma"]);
    }

    #[test]
    fn test_edition_dates() {
        let competition = Competition::new(1, "Crosul")
            .with_edition(Edition::new(2026, 1, 24))
            .with_edition(Edition::new(2024, 2, 3));

        let dates = EditionDates::for_competition(&competition, &[2026, 2025, 2024]);

        assert_eq!(dates.get(2026), Some("Sat 24-Jan"));
        assert_eq!(dates.get(2025), Some(""));
        assert_eq!(dates.get(2024), Some("Sat 3-Feb"));
        assert_eq!(dates.get(2023), None);
    }

    #[test]
    fn test_build_directory_splits_untracked() {
        let document = CompetitionDocument::new(
            vec![
                Competition::new(1, "Zalău Run").with_location("Zalău").with_county("SJ"),
                Competition::new(2, "Alba Trail").with_location("Alba Iulia").with_county("AB"),
            ],
            vec![
                Competition::new(0, "Chișinău Marathon")
                    .with_location("Chișinău")
                    .with_county("MDA*"),
                Competition::new(0, "Virtual 5k"),
            ],
        );

        let directory = build_directory(&document, &[2026, 2025]);

        assert_eq!(names(&directory.competitions), vec!["Alba Trail", "Zalău Run"]);
        assert_eq!(names(&directory.competitions_moldova), vec!["Chișinău Marathon"]);
        assert_eq!(names(&directory.competitions_other), vec!["Virtual 5k"]);
        assert_eq!(directory.total(), 4);
    }

    #[test]
    fn test_directory_entry_serialization() {
        let competition = Competition::new(4, "Maratonul Bucureștiului")
            .with_location("București")
            .with_county("B")
            .with_edition(Edition::new(2025, 10, 12));

        let tracked =
            serde_json::to_value(DirectoryEntry::tracked(&competition, &[2026, 2025])).unwrap();
        assert_eq!(
            tracked,
            json!({
                "id": 4,
                "name": "Maratonul Bucureștiului",
                "location": "București",
                "county": "B",
                "year_2026": "",
                "year_2025": "Sun 12-Oct"
            })
        );

        let keys: Vec<&String> = tracked.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["id", "name", "location", "county", "year_2026", "year_2025"]);

        let other = serde_json::to_value(DirectoryEntry::other(&competition, &[2025])).unwrap();
        assert_eq!(
            other,
            json!({"name": "Maratonul Bucureștiului", "year_2025": "Sun 12-Oct"})
        );

        let moldova =
            serde_json::to_value(DirectoryEntry::cross_border(&competition, &[2025])).unwrap();
        assert_eq!(moldova.as_object().unwrap().len(), 3);
        assert!(moldova.get("county").is_none());
    }
}
