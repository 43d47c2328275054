//! Shared test doubles.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// A clock pinned to one instant, for deterministic store behaviour in tests.
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Pin the clock to the given instant.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
