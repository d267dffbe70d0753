use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::ReadingTime;
use crate::classify::{classify_blood_sugar, Band};
use crate::stats::{Dated, Measured};

/// One blood-sugar reading in mg/dL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodSugarEntry {
    pub date: NaiveDate,
    pub time: ReadingTime,
    pub value: f64,
    pub id: i64,
    pub timestamp: DateTime<Utc>,
}

impl BloodSugarEntry {
    pub fn band(&self) -> Band {
        classify_blood_sugar(self.value, self.time.into())
    }
}

impl Measured for BloodSugarEntry {
    fn measurement(&self) -> f64 {
        self.value
    }
}

impl Dated for BloodSugarEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}
