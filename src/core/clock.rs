//! Injected time source. The engine never reads the system clock itself.

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Used by tests and the simulator.
#[derive(Debug, Clone)]
pub struct FixedClock {
    current: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Cell::new(start),
        }
    }

    /// Starts at the given unix timestamp (seconds).
    pub fn at_timestamp(seconds: i64) -> Self {
        Self::new(DateTime::from_timestamp(seconds, 0).unwrap_or_default())
    }

    pub fn set(&self, time: DateTime<Utc>) {
        self.current.set(time);
    }

    pub fn advance_secs(&self, seconds: f64) {
        let millis = (seconds * 1000.0).round() as i64;
        self.current
            .set(self.current.get() + Duration::milliseconds(millis));
    }

    pub fn advance_days(&self, days: i64) {
        self.current.set(self.current.get() + Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.current.get()
    }
}

/// Seconds between two instants, never negative.
pub fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let millis = (end - start).num_milliseconds().max(0);
    millis as f64 / 1000.0
}
