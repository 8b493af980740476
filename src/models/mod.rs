//! Core data models for the running calendar.

mod competition;
mod event;
mod stats;

pub use competition::*;
pub use event::*;
pub use stats::*;
