//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::storage::StorageConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the catalogue and every generated file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Years that get an `output-events-<year>.json` table
    #[serde(default = "default_years")]
    pub event_years: Vec<i32>,

    /// Year columns of the alphabetical directory
    #[serde(default = "default_years")]
    pub directory_years: Vec<i32>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./json-files")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_years() -> Vec<i32> {
    vec![2026, 2025, 2024, 2023]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            event_years: default_years(),
            directory_years: default_years(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }

    pub fn storage(&self) -> StorageConfig {
        StorageConfig::new(self.data_dir.clone())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_years("event_years", &self.event_years)?;
        validate_years("directory_years", &self.directory_years)?;
        Ok(())
    }
}

fn validate_years(field: &str, years: &[i32]) -> Result<(), ConfigError> {
    if years.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{} must not be empty",
            field
        )));
    }

    let mut seen = HashSet::new();
    if let Some(year) = years.iter().find(|year| !seen.insert(**year)) {
        return Err(ConfigError::ValidationError(format!(
            "{} lists {} more than once",
            field, year
        )));
    }

    Ok(())
}
