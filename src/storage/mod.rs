//! Flat JSON document storage.
//!
//! Every file lives in one data directory:
//! - `input-all-competitions.json`: the competition catalogue (source of truth)
//! - `output-events-<year>.json`: one event table per target year
//! - `output-all-statistics.json`: statistics document, merged in place
//! - `output-all-competitions-list.json`: alphabetical directory

mod json;

pub use json::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid document {path}: {reason}")]
    InvalidDocument { path: PathBuf, reason: String },
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn input_path(&self) -> PathBuf {
        self.data_dir.join("input-all-competitions.json")
    }

    pub fn events_path(&self, year: i32) -> PathBuf {
        self.data_dir.join(format!("output-events-{}.json", year))
    }

    pub fn statistics_path(&self) -> PathBuf {
        self.data_dir.join("output-all-statistics.json")
    }

    pub fn directory_path(&self) -> PathBuf {
        self.data_dir.join("output-all-competitions-list.json")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./json-files"))
    }
}
