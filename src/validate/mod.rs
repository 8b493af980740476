//! Pre-flight validation of the competition catalogue.
//!
//! Runs on the raw JSON value so wrong field types can be reported instead
//! of failing deserialization. Each check collects human-readable
//! violations; the document passes when every check is empty.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Name of the tracked competition list.
pub const TRACKED_LIST: &str = "competitions";

/// Name of the no-statistics competition list.
pub const UNTRACKED_LIST: &str = "competitions_no_statistics";

const REQUIRED_COMPETITION_FIELDS: [&str; 9] = [
    "id",
    "name",
    "location",
    "county",
    "type",
    "distances",
    "link",
    "link_fb",
    "editions",
];

const REQUIRED_EDITION_FIELDS: [&str; 3] = ["year", "month", "day"];

const MIN_YEAR: i64 = 2000;
const MAX_YEAR: i64 = 2050;

/// The individual checks, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Structure,
    Dates,
    UniqueYears,
    CompetitionIds,
    UniqueNames,
}

impl Check {
    pub const ALL: [Check; 5] = [
        Check::Structure,
        Check::Dates,
        Check::UniqueYears,
        Check::CompetitionIds,
        Check::UniqueNames,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Check::Structure => "JSON structure",
            Check::Dates => "edition dates",
            Check::UniqueYears => "unique years per competition",
            Check::CompetitionIds => "competition IDs",
            Check::UniqueNames => "unique competition names",
        }
    }

    fn run(&self, document: &Value) -> Vec<String> {
        match self {
            Check::Structure => validate_structure(document),
            Check::Dates => validate_dates(document),
            Check::UniqueYears => validate_unique_years(document),
            Check::CompetitionIds => validate_competition_ids(document),
            Check::UniqueNames => validate_unique_names(document),
        }
    }
}

/// Outcome of one check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub check: Check,
    pub errors: Vec<String>,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of every check.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub results: Vec<CheckResult>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(CheckResult::passed)
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    /// All violations across checks, in check order.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .flat_map(|r| r.errors.iter().map(String::as_str))
    }
}

/// Run every check and log a summary.
pub fn validate(document: &Value) -> ValidationReport {
    let results: Vec<CheckResult> = Check::ALL
        .iter()
        .map(|check| {
            let errors = check.run(document);
            if errors.is_empty() {
                info!("[PASS] {}", check.description());
            } else {
                warn!("[FAIL] {}: {} error(s)", check.description(), errors.len());
                for error in &errors {
                    warn!("  - {}", error);
                }
            }
            CheckResult {
                check: *check,
                errors,
            }
        })
        .collect();

    let report = ValidationReport { results };
    info!(
        "Validation summary: {}/{} checks passed",
        report.passed_count(),
        report.results.len()
    );
    report
}

/// A competition's position and label for error messages.
struct Label<'a> {
    list: &'a str,
    index: usize,
    name: String,
    id: String,
}

impl<'a> Label<'a> {
    fn new(list: &'a str, index: usize, competition: &Map<String, Value>) -> Self {
        let name = match competition.get("name") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => format!("Unknown_{}", index),
        };
        let id = competition
            .get("id")
            .map(|v| v.to_string())
            .unwrap_or_else(|| "?".to_string());
        Self {
            list,
            index,
            name,
            id,
        }
    }

    fn prefix(&self) -> String {
        format!("{}[{}] '{}' (id={})", self.list, self.index, self.name, self.id)
    }

    fn edition(&self, index: usize) -> String {
        format!("{}, edition[{}]", self.prefix(), index)
    }
}

/// The competition lists present in the document, as arrays.
fn competition_lists(document: &Value) -> Vec<(&'static str, &Vec<Value>)> {
    [TRACKED_LIST, UNTRACKED_LIST]
        .into_iter()
        .filter_map(|name| match document.get(name) {
            Some(Value::Array(items)) => Some((name, items)),
            _ => None,
        })
        .collect()
}

/// Every competition object with its list name and index.
fn competitions(document: &Value) -> Vec<(&'static str, usize, &Map<String, Value>)> {
    competition_lists(document)
        .into_iter()
        .flat_map(|(list, items)| {
            items
                .iter()
                .enumerate()
                .filter_map(move |(i, item)| item.as_object().map(|obj| (list, i, obj)))
        })
        .collect()
}

fn is_string_array(value: &Value) -> bool {
    value
        .as_array()
        .map(|items| items.iter().all(Value::is_string))
        .unwrap_or(false)
}

/// Root keys, field presence and field types.
pub fn validate_structure(document: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = document.as_object() else {
        errors.push("Root element must be a JSON object".to_string());
        return errors;
    };

    for key in [TRACKED_LIST, UNTRACKED_LIST] {
        if !root.contains_key(key) {
            errors.push(format!("Missing required root key: '{}'", key));
        }
    }
    if !errors.is_empty() {
        return errors;
    }

    for list_name in [TRACKED_LIST, UNTRACKED_LIST] {
        let Some(items) = root[list_name].as_array() else {
            errors.push(format!("'{}' must be an array", list_name));
            continue;
        };

        for (index, item) in items.iter().enumerate() {
            let Some(competition) = item.as_object() else {
                errors.push(format!("{}[{}]: Must be an object", list_name, index));
                continue;
            };
            let label = Label::new(list_name, index, competition);

            for field in REQUIRED_COMPETITION_FIELDS {
                if !competition.contains_key(field) {
                    errors.push(format!(
                        "{}: Missing required field '{}'",
                        label.prefix(),
                        field
                    ));
                }
            }

            if let Some(id) = competition.get("id") {
                if !id.is_i64() && !id.is_u64() {
                    errors.push(format!("{}: Field 'id' must be an integer", label.prefix()));
                }
            }

            for field in ["name", "location", "county", "type", "link", "link_fb"] {
                if let Some(value) = competition.get(field) {
                    if !value.is_string() {
                        errors.push(format!(
                            "{}: Field '{}' must be a string",
                            label.prefix(),
                            field
                        ));
                    }
                }
            }

            if let Some(distances) = competition.get("distances") {
                if !distances.is_array() {
                    errors.push(format!(
                        "{}: Field 'distances' must be an array",
                        label.prefix()
                    ));
                } else if !is_string_array(distances) {
                    errors.push(format!(
                        "{}: Every entry of 'distances' must be a string",
                        label.prefix()
                    ));
                }
            }

            let Some(editions) = competition.get("editions") else {
                continue;
            };
            let Some(editions) = editions.as_array() else {
                errors.push(format!(
                    "{}: Field 'editions' must be an array",
                    label.prefix()
                ));
                continue;
            };
            if editions.is_empty() {
                errors.push(format!("{}: 'editions' array cannot be empty", label.prefix()));
            }

            for (ed_index, edition) in editions.iter().enumerate() {
                let Some(edition) = edition.as_object() else {
                    errors.push(format!("{}: Must be an object", label.edition(ed_index)));
                    continue;
                };

                for field in REQUIRED_EDITION_FIELDS {
                    match edition.get(field) {
                        None => errors.push(format!(
                            "{}: Missing required field '{}'",
                            label.edition(ed_index),
                            field
                        )),
                        Some(v) if !v.is_i64() && !v.is_u64() => errors.push(format!(
                            "{}: Field '{}' must be an integer",
                            label.edition(ed_index),
                            field
                        )),
                        Some(_) => {}
                    }
                }

                if let Some(custom) = edition.get("custom_distances") {
                    if !is_string_array(custom) {
                        errors.push(format!(
                            "{}: Field 'custom_distances' must be an array of strings",
                            label.edition(ed_index)
                        ));
                    }
                }

                if let Some(link) = edition.get("event_link") {
                    if !link.is_string() {
                        errors.push(format!(
                            "{}: Field 'event_link' must be a string",
                            label.edition(ed_index)
                        ));
                    }
                }
            }
        }
    }

    errors
}

/// Every edition forms a real calendar date within the supported range.
pub fn validate_dates(document: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    for (list, index, competition) in competitions(document) {
        let label = Label::new(list, index, competition);

        let Some(editions) = competition.get("editions").and_then(Value::as_array) else {
            errors.push(format!("{}: Missing 'editions' property", label.prefix()));
            continue;
        };

        for (ed_index, edition) in editions.iter().enumerate() {
            let field = |name: &str| edition.get(name).filter(|v| !v.is_null());

            let (Some(year), Some(month), Some(day)) =
                (field("year"), field("month"), field("day"))
            else {
                let missing = ["year", "month", "day"]
                    .into_iter()
                    .find(|name| field(*name).is_none())
                    .unwrap_or("year");
                errors.push(format!("{}: Missing '{}'", label.edition(ed_index), missing));
                continue;
            };

            let year = match year.as_i64() {
                Some(y) if (MIN_YEAR..=MAX_YEAR).contains(&y) => y,
                _ => {
                    errors.push(format!(
                        "{}: Invalid year '{}' (must be integer between {}-{})",
                        label.edition(ed_index),
                        year,
                        MIN_YEAR,
                        MAX_YEAR
                    ));
                    continue;
                }
            };

            let month = match month.as_i64() {
                Some(m) if (1..=12).contains(&m) => m,
                _ => {
                    errors.push(format!(
                        "{}: Invalid month '{}' (must be integer between 1-12)",
                        label.edition(ed_index),
                        month
                    ));
                    continue;
                }
            };

            let day = match day.as_i64() {
                Some(d) if d >= 1 => d,
                _ => {
                    errors.push(format!(
                        "{}: Invalid day '{}' (must be positive integer)",
                        label.edition(ed_index),
                        day
                    ));
                    continue;
                }
            };

            let valid = u32::try_from(day)
                .ok()
                .and_then(|d| NaiveDate::from_ymd_opt(year as i32, month as u32, d))
                .is_some();
            if !valid {
                errors.push(format!(
                    "{}: Invalid date {}-{:02}-{:02}",
                    label.edition(ed_index),
                    year,
                    month,
                    day
                ));
            }
        }
    }

    errors
}

/// A competition holds at most one edition per year.
pub fn validate_unique_years(document: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    for (list, index, competition) in competitions(document) {
        let Some(editions) = competition.get("editions").and_then(Value::as_array) else {
            continue;
        };

        let mut seen = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for year in editions
            .iter()
            .filter_map(|e| e.get("year").and_then(Value::as_i64))
        {
            if !seen.insert(year) {
                duplicates.insert(year);
            }
        }

        if !duplicates.is_empty() {
            let years: Vec<String> = duplicates.iter().map(|y| y.to_string()).collect();
            errors.push(format!(
                "{}: Duplicate year(s) found in editions: {}",
                Label::new(list, index, competition).prefix(),
                years.join(", ")
            ));
        }
    }

    errors
}

/// Tracked ids run 1..N in order; untracked ids are all 0.
pub fn validate_competition_ids(document: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(items) = document.get(TRACKED_LIST).and_then(Value::as_array) {
        let mut expected: i64 = 1;
        for (index, item) in items.iter().enumerate() {
            let Some(competition) = item.as_object() else {
                continue;
            };
            let Some(id) = competition.get("id") else {
                continue;
            };
            if id.as_i64() != Some(expected) {
                let label = Label::new(TRACKED_LIST, index, competition);
                errors.push(format!(
                    "{}[{}] '{}': Expected id={}, but found id={}. IDs must be consecutive starting with 1.",
                    TRACKED_LIST, index, label.name, expected, id
                ));
            }
            expected += 1;
        }
    }

    if let Some(items) = document.get(UNTRACKED_LIST).and_then(Value::as_array) {
        for (index, item) in items.iter().enumerate() {
            let Some(competition) = item.as_object() else {
                continue;
            };
            let Some(id) = competition.get("id") else {
                continue;
            };
            if id.as_i64() != Some(0) {
                let label = Label::new(UNTRACKED_LIST, index, competition);
                errors.push(format!(
                    "{}[{}] '{}': Expected id=0, but found id={}. All competitions in this list must have id=0.",
                    UNTRACKED_LIST, index, label.name, id
                ));
            }
        }
    }

    errors
}

/// Competition names are unique across both lists.
pub fn validate_unique_names(document: &Value) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut locations: HashMap<&str, Vec<String>> = HashMap::new();

    for (list, index, competition) in competitions(document) {
        let Some(name) = competition.get("name").and_then(Value::as_str) else {
            continue;
        };
        let id = competition
            .get("id")
            .map(|v| v.to_string())
            .unwrap_or_else(|| "?".to_string());

        let entry = locations.entry(name).or_default();
        if entry.is_empty() {
            order.push(name);
        }
        entry.push(format!("{}[{}] (id={})", list, index, id));
    }

    order
        .into_iter()
        .filter_map(|name| {
            let found = &locations[name];
            (found.len() > 1).then(|| {
                format!(
                    "Duplicate competition name '{}' found at: {}",
                    name,
                    found.join(", ")
                )
            })
        })
        .collect()
}
