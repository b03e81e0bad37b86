//! Test utilities shared by unit tests and the integration suites.
//!
//! Compiled for tests or with the `test-support` feature.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// Clock frozen at a start instant that only moves when a test advances it.
#[derive(Debug)]
pub struct MutableClock {
    start: DateTime<Utc>,
    elapsed_ms: AtomicI64,
}

impl MutableClock {
    pub const fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            elapsed_ms: AtomicI64::new(0),
        }
    }

    /// Move the clock forward by `delta`, at millisecond precision.
    pub fn advance(&self, delta: Duration) {
        let millis = i64::try_from(delta.as_millis()).unwrap_or(i64::MAX);
        self.elapsed_ms.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.start + TimeDelta::milliseconds(self.elapsed_ms.load(Ordering::SeqCst))
    }
}
