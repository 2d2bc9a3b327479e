//! The habit record kept in the store.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A habit that can be tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Name of the habit; also its key in the store.
    pub name: String,
    /// Number of consecutive days this habit has been performed.
    pub current_streak: u32,
    /// When the habit was last done.
    pub last_done: DateTime<FixedOffset>,
}

impl Habit {
    /// A habit performed for the first time at `at`.
    pub fn started(name: impl Into<String>, at: DateTime<FixedOffset>) -> Self {
        Self {
            name: name.into(),
            current_streak: 1,
            last_done: at,
        }
    }

    /// Whole days elapsed between `last_done` and `now`.
    ///
    /// Sub-day differences count as zero; a `now` earlier than `last_done`
    /// yields a non-positive value.
    pub fn days_since(&self, now: DateTime<FixedOffset>) -> i64 {
        (now - self.last_done).num_days()
    }

    /// Whether `now` falls on the same calendar date as `last_done`, viewed
    /// in `now`'s offset.
    pub fn done_on_same_day(&self, now: DateTime<FixedOffset>) -> bool {
        self.last_done.with_timezone(now.offset()).date_naive() == now.date_naive()
    }
}
