#![forbid(unsafe_code)]

//! Core domain model and business logic for the Lift strength log.
//!
//! This crate provides:
//! - Domain types (training sets, daily bests, progression decisions)
//! - One-rep-max estimation and UTC calendar helpers
//! - Persistence (locked JSON document store, CSV export)
//! - Progress aggregation and next-target progression logic

pub mod types;
pub mod error;
pub mod e1rm;
pub mod calendar;
pub mod config;
pub mod logging;
pub mod store;
pub mod export;
pub mod progress;
pub mod progression;
pub mod journal;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use calendar::CalendarDate;
pub use config::Config;
pub use e1rm::estimate_e1rm;
pub use store::SetStore;
pub use progress::aggregate_daily_best;
pub use progression::{next_target, round_to_step};
