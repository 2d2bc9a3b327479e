pub mod config;

pub use config::Config;

use std::path::PathBuf;

/// Returns `~/.config/habit[-dev]/` based on HABIT_ENV.
///
/// Set HABIT_ENV=dev to use development data directory. The directory is
/// not created; callers only read from it.
pub fn data_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABIT_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("habit-dev")
    } else {
        base_dir.join("habit")
    }
}
