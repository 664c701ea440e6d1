//! Time source for the achievement engine.
//!
//! Every evaluation reads "now" through a [`Clock`] so tests and replays can
//! drive day boundaries deterministically.

use std::sync::Mutex;

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveTime, TimeZone};

/// Supplies the current instant in the user's local offset.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;

    /// Local midnight that starts the day containing `at`.
    fn start_of_day(&self, at: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        let midnight = at.date_naive().and_time(NaiveTime::MIN);
        at.offset()
            .from_local_datetime(&midnight)
            .single()
            .unwrap_or(at)
    }

    /// Local midnight that ends the day containing `at`.
    fn end_of_day(&self, at: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        self.start_of_day(at) + Duration::days(1)
    }
}

/// Wall clock in the machine's local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl ManualClock {
    pub fn new(start: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, at: DateTime<FixedOffset>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn start_of_day_keeps_offset() {
        let clock = ManualClock::new(at("2024-03-10T15:42:00+09:00"));
        let start = clock.start_of_day(clock.now());
        assert_eq!(start, at("2024-03-10T00:00:00+09:00"));
        assert_eq!(start.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn end_of_day_is_next_midnight() {
        let clock = ManualClock::new(at("2024-03-10T23:59:59-05:00"));
        assert_eq!(clock.end_of_day(clock.now()), at("2024-03-11T00:00:00-05:00"));
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(at("2024-03-10T22:00:00Z"));
        clock.advance(Duration::hours(3));
        assert_eq!(clock.now(), at("2024-03-11T01:00:00Z"));
        clock.set(at("2024-01-01T00:00:00Z"));
        assert_eq!(clock.now(), at("2024-01-01T00:00:00Z"));
    }
}
