//! Core error types for habit-core.
//!
//! This module defines the error hierarchy using thiserror so the CLI
//! (or any other caller) can tell persistence, validation and ordering
//! failures apart.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use thiserror::Error;

/// Core error type for habit-core.
#[derive(Error, Debug)]
pub enum HabitError {
    /// Store file errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Construction or input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An occurrence was recorded before the habit's last recorded time
    #[error(
        "current time {} cannot precede last time habit '{}' was updated on {}",
        rfc3339(.now),
        .name,
        rfc3339(.last)
    )]
    OutOfOrder {
        name: String,
        now: DateTime<FixedOffset>,
        last: DateTime<FixedOffset>,
    },

    /// Writing to the output sink failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Store file errors. Every variant carries the store path.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to open an existing store file
    #[error("error opening store {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read an opened store file
    #[error("error reading store {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store contents are not a habit mapping
    #[error("error decoding store data from {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to create the store file (or its temporary sibling)
    #[error("error creating store {path:?}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write or replace the store file
    #[error("error writing store {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the habit mapping
    #[error("error encoding habit data to store {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A required tracker collaborator was not supplied
    #[error("{0} must be provided")]
    MissingCollaborator(&'static str),

    /// Habit names are used as keys and cannot be empty
    #[error("habit name must not be empty")]
    EmptyName,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to load configuration from {path:?}: {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(#[from] toml::de::Error),
}

fn rfc3339(ts: &DateTime<FixedOffset>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Result type alias for HabitError
pub type Result<T, E = HabitError> = std::result::Result<T, E>;
