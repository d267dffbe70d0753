//! Weight log: entry, trend and range view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, IdGenerator};
use crate::config::RECENT_WEIGHT_LIMIT;
use crate::field::PersistentField;
use crate::models::{WeightEntry, WeightUnit};
use crate::stats::{average, deltas, latest, range, recent, trend, Trend, ValueRange};
use crate::validation::{parse_weight, ValidationError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeightInput {
    pub date: Option<NaiveDate>,
    pub weight: String,
    pub unit: WeightUnit,
    pub notes: String,
}

/// History row with the change since the previous (older) entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightRow {
    pub entry: WeightEntry,
    pub change: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightSummary {
    pub total_entries: usize,
    pub latest: Option<WeightEntry>,
    pub average: Option<f64>,
    pub range: Option<ValueRange>,
    pub trend: Option<Trend>,
    pub recent: Vec<WeightRow>,
}

pub fn record_weight(
    field: &mut PersistentField<Vec<WeightEntry>>,
    input: &WeightInput,
    clock: &dyn Clock,
    ids: &IdGenerator,
) -> Result<WeightEntry, ValidationError> {
    let weight = parse_weight(&input.weight)?;
    let (id, timestamp) = ids.stamp(clock);

    let entry = WeightEntry {
        date: input.date.unwrap_or_else(|| clock.today()),
        weight,
        unit: input.unit,
        notes: input.notes.trim().to_string(),
        id,
        timestamp,
    };

    tracing::info!(id, unit = %entry.unit, "Recorded weight entry");
    field.prepend(entry.clone());
    Ok(entry)
}

/// Statistics run over raw values; entries logged in mixed units are
/// not converted.
pub fn summarize_weight(entries: &[WeightEntry]) -> WeightSummary {
    let window = recent(entries, RECENT_WEIGHT_LIMIT);
    // Deltas are taken over the full log so the last visible row still
    // compares against its real predecessor.
    let changes = deltas(entries);

    WeightSummary {
        total_entries: entries.len(),
        latest: latest(entries).cloned(),
        average: average(entries),
        range: range(entries),
        trend: trend(entries),
        recent: window
            .iter()
            .zip(changes)
            .map(|(entry, change)| WeightRow {
                entry: entry.clone(),
                change,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use crate::clock::FixedClock;
    use crate::stats::TrendDirection;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn setup() -> (FixedClock, IdGenerator, PersistentField<Vec<WeightEntry>>) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        (
            FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 14, 7, 0, 0).unwrap()),
            IdGenerator::new(),
            PersistentField::create(store, "weightEntries", Vec::new()),
        )
    }

    fn input(weight: &str) -> WeightInput {
        WeightInput {
            weight: weight.into(),
            ..Default::default()
        }
    }

    #[test]
    fn record_stores_parsed_weight_and_unit() {
        let (clock, ids, mut field) = setup();
        let mut form = input("82.5");
        form.unit = WeightUnit::Kg;
        form.notes = "  after run ".into();

        let entry = record_weight(&mut field, &form, &clock, &ids).unwrap();
        assert_eq!(entry.weight, 82.5);
        assert_eq!(entry.unit, WeightUnit::Kg);
        assert_eq!(entry.notes, "after run");
        assert_eq!(field.read().len(), 1);
    }

    #[test]
    fn invalid_weight_rejected() {
        let (clock, ids, mut field) = setup();
        for raw in ["0", "2000", "-1", "lots"] {
            assert!(record_weight(&mut field, &input(raw), &clock, &ids).is_err());
        }
        assert!(field.read().is_empty());
    }

    #[test]
    fn summary_trend_range_and_average() {
        let (clock, ids, mut field) = setup();
        for w in ["180", "178", "181"] {
            record_weight(&mut field, &input(w), &clock, &ids).unwrap();
        }

        let summary = summarize_weight(field.read());
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.latest.as_ref().unwrap().weight, 181.0);
        assert!((summary.average.unwrap() - 539.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.range, Some(ValueRange { min: 178.0, max: 181.0 }));
        assert_eq!(
            summary.trend,
            Some(Trend { magnitude: 3.0, direction: TrendDirection::Up })
        );
    }

    #[test]
    fn recent_rows_carry_change() {
        let (clock, ids, mut field) = setup();
        for w in ["180", "178"] {
            record_weight(&mut field, &input(w), &clock, &ids).unwrap();
        }
        let summary = summarize_weight(field.read());
        assert_eq!(summary.recent[0].change, Some(-2.0));
        assert_eq!(summary.recent[1].change, None);
    }

    #[test]
    fn recent_window_keeps_predecessor_delta() {
        let (clock, ids, mut field) = setup();
        for i in 0..12 {
            record_weight(&mut field, &input(&format!("{}", 170 + i)), &clock, &ids).unwrap();
        }
        let summary = summarize_weight(field.read());
        assert_eq!(summary.recent.len(), RECENT_WEIGHT_LIMIT);
        assert_eq!(summary.recent.last().unwrap().change, Some(1.0));
    }

    #[test]
    fn empty_summary() {
        let summary = summarize_weight(&[]);
        assert!(summary.latest.is_none());
        assert!(summary.average.is_none());
        assert!(summary.range.is_none());
        assert!(summary.trend.is_none());
    }
}
