//! # Running Calendar
//!
//! Batch generator for a running-competition catalogue: per-year event
//! tables, yearly statistics and an alphabetical directory, all derived
//! from one JSON catalogue.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (competitions, editions, events, statistics)
//! - **calendar**: Edition resolution and per-year event tables
//! - **calculate**: Yearly aggregates and the town ranking
//! - **storage**: JSON document reading, writing and statistics merging
//! - **validate**: Pre-flight checks of the catalogue
//! - **directory**: Romanian-alphabet competition directory
//! - **diacritics**: Whole-word diacritic corrections
//! - **pipeline**: Update steps and the full update run
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod calendar;
pub mod config;
pub mod diacritics;
pub mod directory;
pub mod models;
pub mod pipeline;
pub mod storage;
pub mod validate;

pub use models::*;
