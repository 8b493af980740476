//! JSON document reading and writing.
//!
//! Output files are pretty-printed with two-space indentation and keep
//! non-ASCII text as-is.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use super::{StorageConfig, StorageError};
use crate::calendar::YearlyEvents;
use crate::models::{CompetitionDocument, StatisticsReport};

/// Key of the object holding the computed aggregates.
pub const STATISTICS_KEY: &str = "statistics";

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn json_error(path: &Path) -> impl FnOnce(serde_json::Error) -> StorageError + '_ {
    move |source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a file as an untyped JSON value.
pub fn read_json(path: &Path) -> Result<Value, StorageError> {
    let file = File::open(path).map_err(io_error(path))?;
    let value = serde_json::from_reader(BufReader::new(file)).map_err(json_error(path))?;
    debug!("Read {:?}", path);
    Ok(value)
}

/// Write any serializable value, replacing the file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(io_error(path))?;

    debug!("Wrote {:?}", path);
    Ok(())
}

/// Parse a competition document from an already-loaded value.
pub fn parse_document(path: &Path, value: Value) -> Result<CompetitionDocument, StorageError> {
    serde_json::from_value(value).map_err(json_error(path))
}

/// Read and parse the competition catalogue.
pub fn read_document(path: &Path) -> Result<CompetitionDocument, StorageError> {
    let document = parse_document(path, read_json(path)?)?;
    info!(
        "Loaded {} tracked and {} untracked competitions from {:?}",
        document.competitions.len(),
        document.competitions_no_statistics.len(),
        path
    );
    Ok(document)
}

/// Write one event table per year. Returns the number of files written.
pub fn write_yearly_events(
    config: &StorageConfig,
    events: &YearlyEvents,
) -> Result<usize, StorageError> {
    let mut written = 0;
    for (year, list) in events.iter() {
        let path = config.events_path(year);
        write_json(&path, list)?;
        info!("Created {:?} with {} events", path, list.len());
        written += 1;
    }
    Ok(written)
}

/// Errors merging a report into an existing statistics document.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("document root is not a JSON object")]
    RootNotObject,

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Replace the aggregate keys under `statistics`, leaving every other key
/// of the document untouched.
///
/// A missing or non-object `statistics` value is replaced by a new object.
pub fn merge_statistics(document: &mut Value, report: &StatisticsReport) -> Result<(), MergeError> {
    let aggregates = match serde_json::to_value(report)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let root = document.as_object_mut().ok_or(MergeError::RootNotObject)?;

    let statistics = root
        .entry(STATISTICS_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    if !statistics.is_object() {
        *statistics = Value::Object(Map::new());
    }

    if let Value::Object(target) = statistics {
        for (key, value) in aggregates {
            target.insert(key, value);
        }
    }

    Ok(())
}

/// Merge `report` into the statistics document at `path` and write it back.
///
/// A missing file is treated as an empty document.
pub fn write_statistics(path: &Path, report: &StatisticsReport) -> Result<(), StorageError> {
    let mut document = if path.exists() {
        read_json(path)?
    } else {
        info!("{:?} does not exist, creating it", path);
        Value::Object(Map::new())
    };

    merge_statistics(&mut document, report).map_err(|e| StorageError::InvalidDocument {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    write_json(path, &document)?;
    info!("Saved statistics to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::compute_statistics;
    use crate::calendar::materialize;
    use crate::models::{Competition, Edition};
    use serde_json::json;
    use tempfile::TempDir;

    fn document() -> CompetitionDocument {
        CompetitionDocument::new(
            vec![Competition::new(1, "Semimaratonul Iașului")
                .with_location("Iași")
                .with_county("IS")
                .with_kind("road")
                .with_distances(&["21km"])
                .with_link("https://example.com")
                .with_edition(Edition::new(2025, 4, 6))],
            vec![Competition::new(0, "Virtual Run").with_edition(Edition::new(2025, 4, 6))],
        )
    }

    fn test_config(temp_dir: &TempDir) -> StorageConfig {
        StorageConfig::new(temp_dir.path().to_path_buf())
    }

    #[test]
    fn test_read_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("input.json");
        write_json(&path, &document()).unwrap();

        let read = read_document(&path).unwrap();
        assert_eq!(read, document());
    }

    #[test]
    fn test_read_document_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_read_document_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{\"competitions\": [").unwrap();

        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, StorageError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_write_json_keeps_non_ascii() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");

        write_json(&path, &json!({"town": "Brașov"})).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"town\": \"Brașov\"\n}");
    }

    #[test]
    fn test_write_yearly_events() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let events = materialize(&document(), &[2025, 2024]);

        let written = write_yearly_events(&config, &events).unwrap();
        assert_eq!(written, 2);

        let table = read_json(&config.events_path(2025)).unwrap();
        let list = table.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["name"], "Semimaratonul Iașului");
        assert_eq!(list[0]["display_date"], "Sun 6-Apr-2025");
        assert_eq!(list[1]["id"], 0);

        let empty = fs::read_to_string(config.events_path(2024)).unwrap();
        assert_eq!(empty, "[]");
    }

    #[test]
    fn test_merge_preserves_unrelated_keys() {
        let mut doc = json!({
            "last_updated": "2025-01-01",
            "statistics": {
                "total_competitions": {"1999": 1},
                "runners_per_year": {"2024": 12000}
            }
        });

        let report = compute_statistics(&document());
        merge_statistics(&mut doc, &report).unwrap();

        assert_eq!(doc["last_updated"], "2025-01-01");
        assert_eq!(doc["statistics"]["runners_per_year"]["2024"], 12000);
        assert_eq!(doc["statistics"]["total_competitions"], json!({"2025": 1}));
        for key in StatisticsReport::KEYS {
            assert!(doc["statistics"].get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_merge_creates_statistics_object() {
        let mut doc = json!({"statistics": 5});

        merge_statistics(&mut doc, &StatisticsReport::default()).unwrap();

        assert!(doc["statistics"].is_object());
        assert_eq!(doc["statistics"]["total_competitions"], json!({}));
    }

    #[test]
    fn test_merge_rejects_non_object_root() {
        let mut doc = json!([1, 2, 3]);
        assert!(merge_statistics(&mut doc, &StatisticsReport::default()).is_err());
    }

    #[test]
    fn test_write_statistics_merges_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stats.json");
        write_json(&path, &json!({"notes": ["keep me"], "statistics": {}})).unwrap();

        write_statistics(&path, &compute_statistics(&document())).unwrap();

        let doc = read_json(&path).unwrap();
        assert_eq!(doc["notes"], json!(["keep me"]));
        assert_eq!(doc["statistics"]["competitions_by_type"]["2025"]["road"], 1);

        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["notes", "statistics"]);
    }

    #[test]
    fn test_write_statistics_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fresh.json");

        write_statistics(&path, &compute_statistics(&document())).unwrap();

        let doc = read_json(&path).unwrap();
        assert_eq!(doc["statistics"]["total_competitions"]["2025"], 1);
    }

    #[test]
    fn test_write_statistics_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stats.json");
        let report = compute_statistics(&document());

        write_statistics(&path, &report).unwrap();
        let first = fs::read(&path).unwrap();
        write_statistics(&path, &report).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }
}
