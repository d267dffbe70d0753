use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::Dated;

/// One day's meals. Every slot is free text; blank means skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDiaryEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub breakfast: String,
    #[serde(default)]
    pub mid_morning_snack: String,
    #[serde(default)]
    pub lunch: String,
    #[serde(default)]
    pub dinner: String,
    #[serde(default)]
    pub evening_snack: String,
    pub id: i64,
    pub timestamp: DateTime<Utc>,
}

impl FoodDiaryEntry {
    /// Meal slots in day order, labelled.
    pub fn meals(&self) -> [(&'static str, &str); 5] {
        [
            ("Breakfast", self.breakfast.as_str()),
            ("Mid-Morning Snack", self.mid_morning_snack.as_str()),
            ("Lunch", self.lunch.as_str()),
            ("Dinner", self.dinner.as_str()),
            ("Evening Snack", self.evening_snack.as_str()),
        ]
    }

    /// Slots with something written in them.
    pub fn filled_meals(&self) -> Vec<(&'static str, &str)> {
        self.meals()
            .into_iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .collect()
    }
}

impl Dated for FoodDiaryEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}
