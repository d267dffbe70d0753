//! Clock and entry-id generation.
//!
//! Entry ids are creation-time clock readings in milliseconds. Readings
//! taken within the same millisecond are bumped so ids stay strictly
//! increasing for the lifetime of a generator.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current date and time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date used for form defaults and recency windows.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock (for testing and replay).
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Strictly increasing id source seeded from clock readings.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator whose ids will all be greater than `floor`.
    pub fn starting_after(floor: i64) -> Self {
        Self {
            last: AtomicI64::new(floor),
        }
    }

    /// Next id for an entry created at `now`.
    pub fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(candidate.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        candidate.max(previous.saturating_add(1))
    }

    /// Id and creation timestamp for an entry created now.
    pub fn stamp(&self, clock: &dyn Clock) -> (i64, DateTime<Utc>) {
        let now = clock.now();
        (self.next_id(now), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, h, m, 0).unwrap()
    }

    #[test]
    fn fixed_clock_today_is_date_of_now() {
        let clock = FixedClock::new(at(23, 59));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::new(at(23, 59));
        clock.advance(chrono::Duration::minutes(2));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    }

    #[test]
    fn id_is_clock_millis() {
        let ids = IdGenerator::new();
        let now = at(8, 0);
        assert_eq!(ids.next_id(now), now.timestamp_millis());
    }

    #[test]
    fn ids_within_same_tick_are_distinct() {
        let ids = IdGenerator::new();
        let now = at(8, 0);
        let a = ids.next_id(now);
        let b = ids.next_id(now);
        let c = ids.next_id(now);
        assert!(a < b && b < c);
    }

    #[test]
    fn ids_never_go_backwards_when_clock_does() {
        let ids = IdGenerator::new();
        let later = ids.next_id(at(9, 0));
        let earlier = ids.next_id(at(8, 0));
        assert!(earlier > later);
    }

    #[test]
    fn stamp_pairs_id_with_clock_reading() {
        let clock = FixedClock::new(at(12, 30));
        let ids = IdGenerator::new();
        let (id, ts) = ids.stamp(&clock);
        assert_eq!(ts, at(12, 30));
        assert_eq!(id, ts.timestamp_millis());
    }

    #[test]
    fn starting_after_respects_floor() {
        let floor = at(10, 0).timestamp_millis();
        let ids = IdGenerator::starting_after(floor);
        assert_eq!(ids.next_id(at(9, 0)), floor + 1);
    }

    #[test]
    fn floor_at_max_saturates() {
        let ids = IdGenerator::starting_after(i64::MAX);
        assert_eq!(ids.next_id(at(9, 0)), i64::MAX);
        assert_eq!(ids.next_id(at(9, 0)), i64::MAX);
    }
}
