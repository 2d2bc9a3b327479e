//! Source of "now" for the tracker.
//!
//! Production code uses [`SystemClock`]; tests pin time with [`FixedClock`]
//! or any closure returning a timestamp.

use chrono::{DateTime, FixedOffset, Local};

/// Provides the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock stopped at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// Parse an RFC 3339 timestamp such as `2024-02-06T13:00:00Z`.
    pub fn parse(ts: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(ts).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<FixedOffset> + Send + Sync,
{
    fn now(&self) -> DateTime<FixedOffset> {
        self()
    }
}
