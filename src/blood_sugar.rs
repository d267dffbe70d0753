//! Blood-sugar log: reading entry, banding and the summary view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classify::Band;
use crate::clock::{Clock, IdGenerator};
use crate::config::{BLOOD_SUGAR_AVERAGE_DAYS, RECENT_BLOOD_SUGAR_LIMIT};
use crate::field::PersistentField;
use crate::models::{BloodSugarEntry, ReadingTime};
use crate::stats::{average, latest, recent, within_days};
use crate::validation::{parse_blood_sugar, ValidationError};

// ═══════════════════════════════════════════
// Input / view types
// ═══════════════════════════════════════════

/// Raw form input for a new reading.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BloodSugarInput {
    /// Reading date; today when unset.
    pub date: Option<NaiveDate>,
    pub time: ReadingTime,
    /// Value as typed, mg/dL.
    pub value: String,
}

/// A history row: the reading plus its band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedReading {
    pub entry: BloodSugarEntry,
    pub band: Band,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloodSugarSummary {
    pub total_readings: usize,
    /// Mean over readings dated within the last week.
    pub weekly_average: Option<f64>,
    pub latest: Option<BloodSugarEntry>,
    pub recent: Vec<ClassifiedReading>,
}

// ═══════════════════════════════════════════
// Operations
// ═══════════════════════════════════════════

/// Validate and prepend a reading. Nothing is written on validation failure.
pub fn record_blood_sugar(
    field: &mut PersistentField<Vec<BloodSugarEntry>>,
    input: &BloodSugarInput,
    clock: &dyn Clock,
    ids: &IdGenerator,
) -> Result<BloodSugarEntry, ValidationError> {
    let value = parse_blood_sugar(&input.value)?;
    let (id, timestamp) = ids.stamp(clock);

    let entry = BloodSugarEntry {
        date: input.date.unwrap_or_else(|| clock.today()),
        time: input.time,
        value,
        id,
        timestamp,
    };

    tracing::info!(id, time = %entry.time, band = entry.band().as_str(), "Recorded blood sugar reading");
    field.prepend(entry.clone());
    Ok(entry)
}

pub fn summarize_blood_sugar(entries: &[BloodSugarEntry], today: NaiveDate) -> BloodSugarSummary {
    let last_week = within_days(entries, today, BLOOD_SUGAR_AVERAGE_DAYS);

    BloodSugarSummary {
        total_readings: entries.len(),
        weekly_average: average(&last_week),
        latest: latest(entries).cloned(),
        recent: recent(entries, RECENT_BLOOD_SUGAR_LIMIT)
            .iter()
            .map(|entry| ClassifiedReading {
                band: entry.band(),
                entry: entry.clone(),
            })
            .collect(),
    }
}
