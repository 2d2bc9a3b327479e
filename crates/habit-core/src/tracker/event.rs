//! Events emitted by the tracker and their English rendering.

use std::fmt;

/// Which transition fired, with the numbers needed to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreakEvent {
    /// First occurrence of a habit.
    Started { name: String },
    /// Recorded again on the same calendar day; streak unchanged.
    RepeatedToday { name: String },
    /// One or more full days passed; streak restarted at 1.
    StreakReset { name: String, days_since: i64 },
    /// Recorded on the following day; streak grew.
    StreakExtended { name: String, streak: u32 },
    /// Summary line for a habit not done in `days` days.
    Inactive { name: String, days: i64 },
    /// Summary line for a habit with a live streak.
    OnStreak { name: String, streak: u32 },
    /// Summary of an empty store.
    NothingTracked,
}

fn days(n: i64) -> &'static str {
    if n == 1 {
        "day"
    } else {
        "days"
    }
}

impl fmt::Display for StreakEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreakEvent::Started { name } => write!(
                f,
                "Congratulations on starting your new habit '{name}'! Don't forget to do it again."
            ),
            StreakEvent::RepeatedToday { name } => write!(
                f,
                "Way to go practicing your habit '{name}' more than once today!"
            ),
            StreakEvent::StreakReset { name, days_since } => write!(
                f,
                "You last did the habit '{name}' {days_since} {} ago, so you're starting a new streak today. Good luck!",
                days(*days_since)
            ),
            StreakEvent::StreakExtended { name, streak } => write!(
                f,
                "Nice work: you've done the habit '{name}' for {streak} {} in a row now.",
                days(i64::from(*streak))
            ),
            StreakEvent::Inactive { name, days: n } => write!(
                f,
                "It's been {n} {} since you did '{name}'. Stay positive and get back on it!",
                days(*n)
            ),
            StreakEvent::OnStreak { name, streak } => write!(
                f,
                "You are currently on a {streak}-day streak for '{name}'. Keep it going!"
            ),
            StreakEvent::NothingTracked => write!(f, "You're not currently tracking any habits."),
        }
    }
}
