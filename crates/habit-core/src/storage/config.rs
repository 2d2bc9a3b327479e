//! TOML-based configuration.
//!
//! Configuration is stored at `~/.config/habit/config.toml`:
//!
//! ```toml
//! store_path = "habit.store"
//! ```
//!
//! A relative `store_path` is resolved against the working directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// File the habit store is saved to.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("habit.store")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

impl Config {
    /// Location of the config file.
    pub fn path() -> PathBuf {
        data_dir().join("config.toml")
    }

    /// Load from the default location, or return the default if no config
    /// file exists.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    /// Load from `path`, or return the default if nothing exists there.
    ///
    /// A path that cannot be reached at all (for example because a parent is
    /// a regular file) counts as missing.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(_) if !path.exists() => Ok(Self::default()),
            Err(source) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
