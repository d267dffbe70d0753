//! Aggregate views over newest-first log collections.
//!
//! Every function assumes index 0 is the most recent entry and never
//! re-sorts. Inputs are small, so views are recomputed on every read.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// An entry carrying the numeric value statistics are computed over.
pub trait Measured {
    fn measurement(&self) -> f64;
}

/// An entry recorded against a calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Measured for f64 {
    fn measurement(&self) -> f64 {
        *self
    }
}

impl<M: Measured + ?Sized> Measured for &M {
    fn measurement(&self) -> f64 {
        (**self).measurement()
    }
}

impl<D: Dated + ?Sized> Dated for &D {
    fn date(&self) -> NaiveDate {
        (**self).date()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub magnitude: f64,
    pub direction: TrendDirection,
}

/// Arithmetic mean, `None` for an empty slice.
pub fn average<M: Measured>(entries: &[M]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let sum: f64 = entries.iter().map(Measured::measurement).sum();
    Some(sum / entries.len() as f64)
}

/// Most recent entry.
pub fn latest<T>(entries: &[T]) -> Option<&T> {
    entries.first()
}

/// Smallest and largest value, `None` for an empty slice.
pub fn range<M: Measured>(entries: &[M]) -> Option<ValueRange> {
    let mut values = entries.iter().map(Measured::measurement);
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some(ValueRange { min, max })
}

/// Change from the second most recent entry to the most recent one.
///
/// `Stable` only on exact equality.
pub fn trend<M: Measured>(entries: &[M]) -> Option<Trend> {
    let [current, previous, ..] = entries else {
        return None;
    };
    let difference = current.measurement() - previous.measurement();
    let direction = if difference > 0.0 {
        TrendDirection::Up
    } else if difference < 0.0 {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };
    Some(Trend {
        magnitude: difference.abs(),
        direction,
    })
}

/// Entries dated on or after `today - days`, in log order.
pub fn within_days<T: Dated>(entries: &[T], today: NaiveDate, days: i64) -> Vec<&T> {
    let cutoff = today - Duration::days(days);
    entries.iter().filter(|e| e.date() >= cutoff).collect()
}

/// Signed change of each entry against the next older one.
///
/// The oldest entry has no predecessor and yields `None`.
pub fn deltas<M: Measured>(entries: &[M]) -> Vec<Option<f64>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entries
                .get(i + 1)
                .map(|older| entry.measurement() - older.measurement())
        })
        .collect()
}

/// The first `limit` entries (display window).
pub fn recent<T>(entries: &[T], limit: usize) -> &[T] {
    &entries[..entries.len().min(limit)]
}
