use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::WeightUnit;
use crate::stats::{Dated, Measured};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    pub date: NaiveDate,
    pub weight: f64,
    pub unit: WeightUnit,
    #[serde(default)]
    pub notes: String,
    pub id: i64,
    pub timestamp: DateTime<Utc>,
}

impl Measured for WeightEntry {
    fn measurement(&self) -> f64 {
        self.weight
    }
}

impl Dated for WeightEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_default_to_empty() {
        let entry: WeightEntry = serde_json::from_str(
            r#"{"date":"2025-03-01","weight":182.4,"unit":"lbs",
                "id":7,"timestamp":"2025-03-01T08:00:00Z"}"#,
        )
        .unwrap();
        assert!(entry.notes.is_empty());
        assert_eq!(entry.measurement(), 182.4);
    }
}
