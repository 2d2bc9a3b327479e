//! Streak tracking over a [`HabitStore`].
//!
//! The tracker decides which transition an occurrence triggers, applies it
//! to the store, persists the store and writes one line per event to its
//! output.

mod event;

pub use event::StreakEvent;

use std::io::Write;
use std::sync::Arc;

use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{HabitError, Result, ValidationError};
use crate::habit::Habit;
use crate::store::HabitStore;

/// Habit tracking and summarization.
pub struct Tracker<W> {
    store: Arc<HabitStore>,
    output: W,
    clock: Box<dyn Clock>,
}

/// Builder for [`Tracker`].
///
/// `store` and `output` are required; the clock defaults to [`SystemClock`].
pub struct TrackerBuilder<W> {
    store: Option<Arc<HabitStore>>,
    output: Option<W>,
    clock: Option<Box<dyn Clock>>,
}

impl<W> Default for TrackerBuilder<W> {
    fn default() -> Self {
        Self {
            store: None,
            output: None,
            clock: None,
        }
    }
}

impl<W: Write> TrackerBuilder<W> {
    pub fn store(mut self, store: Arc<HabitStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn output(mut self, output: W) -> Self {
        self.output = Some(output);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Build the tracker.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingCollaborator`] if the store or the
    /// output was not set.
    pub fn build(self) -> Result<Tracker<W>, ValidationError> {
        Ok(Tracker {
            store: self
                .store
                .ok_or(ValidationError::MissingCollaborator("habit store"))?,
            output: self
                .output
                .ok_or(ValidationError::MissingCollaborator("output writer"))?,
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
        })
    }
}

impl<W: Write> Tracker<W> {
    pub fn builder() -> TrackerBuilder<W> {
        TrackerBuilder::default()
    }

    /// Consume the tracker and hand back its output.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Record an occurrence of `name` now.
    ///
    /// Starts the habit if unseen, otherwise extends, resets or keeps its
    /// streak depending on how many calendar days passed. The store is saved
    /// after the change; if saving fails the change is undone.
    ///
    /// # Errors
    /// Returns [`HabitError::OutOfOrder`] if now precedes the habit's last
    /// occurrence, or a persistence/output error.
    pub fn record(&mut self, name: &str) -> Result<StreakEvent> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let now = self.clock.now();
        let event = self.store.update(name, |existing| {
            let Some(existing) = existing else {
                let event = StreakEvent::Started {
                    name: name.to_string(),
                };
                return Ok((Habit::started(name, now), event));
            };

            let last = existing.last_done;
            if now < last {
                warn!(habit = name, %now, %last, "rejected out-of-order occurrence");
                return Err(HabitError::OutOfOrder {
                    name: name.to_string(),
                    now,
                    last,
                });
            }

            let mut habit = existing.clone();
            let days_since = existing.days_since(now);
            let event = if existing.done_on_same_day(now) {
                StreakEvent::RepeatedToday { name: name.to_string() }
            } else if days_since > 0 {
                habit.current_streak = 1;
                StreakEvent::StreakReset {
                    name: name.to_string(),
                    days_since,
                }
            } else {
                habit.current_streak = habit.current_streak.saturating_add(1);
                StreakEvent::StreakExtended {
                    name: name.to_string(),
                    streak: habit.current_streak,
                }
            };
            habit.last_done = now;
            Ok((habit, event))
        })?;

        info!(habit = name, ?event, "recorded habit");
        writeln!(self.output, "{event}")?;
        Ok(event)
    }

    /// Write a one-line status for every tracked habit, sorted by name.
    ///
    /// # Errors
    /// Returns an error if the output cannot be written.
    pub fn summarize(&mut self) -> Result<Vec<StreakEvent>> {
        let habits = self.store.habits();
        if habits.is_empty() {
            writeln!(self.output, "{}", StreakEvent::NothingTracked)?;
            return Ok(vec![StreakEvent::NothingTracked]);
        }

        let now = self.clock.now();
        let mut events = Vec::with_capacity(habits.len());
        for habit in habits {
            let days = habit.days_since(now);
            let event = if days > 0 {
                StreakEvent::Inactive {
                    name: habit.name,
                    days,
                }
            } else {
                StreakEvent::OnStreak {
                    name: habit.name,
                    streak: habit.current_streak,
                }
            };
            writeln!(self.output, "{event}")?;
            events.push(event);
        }
        Ok(events)
    }
}
