//! # Habit Core Library
//!
//! This library provides the core logic for the `habit` streak tracker.
//! The CLI binary is a thin layer over the same types.
//!
//! ## Architecture
//!
//! - **Store**: a mutex-guarded map of habits persisted to a single JSON
//!   file on demand
//! - **Tracker**: the streak state machine; records occurrences against the
//!   store and reports what happened through an injected writer
//! - **Clock**: the injectable source of "now"
//! - **Storage**: data directory and TOML configuration
//!
//! ## Key Components
//!
//! - [`HabitStore`]: persistent habit store
//! - [`Tracker`]: streak transitions and summaries
//! - [`StreakEvent`]: which transition fired, rendered via `Display`
//! - [`Config`]: application configuration

pub mod clock;
pub mod error;
pub mod habit;
pub mod storage;
pub mod store;
pub mod tracker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, HabitError, PersistenceError, Result, ValidationError};
pub use habit::Habit;
pub use storage::Config;
pub use store::HabitStore;
pub use tracker::{StreakEvent, Tracker, TrackerBuilder};
