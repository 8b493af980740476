//! Yearly event tables.
//!
//! - **resolver**: finds a competition's edition for a year and resolves
//!   its display date, distances and link
//! - **materializer**: expands both competition lists into sorted per-year
//!   event lists

pub mod materializer;
pub mod resolver;

pub use materializer::{materialize, sort_events, YearlyEvents};
pub use resolver::{display_date, find_edition, resolve_edition, resolve_event, DateStyle};
