//! Food diary: one entry per submitted day of meals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, IdGenerator};
use crate::config::RECENT_FOOD_DIARY_LIMIT;
use crate::field::PersistentField;
use crate::models::FoodDiaryEntry;
use crate::stats::recent;
use crate::validation::ValidationError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FoodDiaryInput {
    pub date: Option<NaiveDate>,
    pub breakfast: String,
    pub mid_morning_snack: String,
    pub lunch: String,
    pub dinner: String,
    pub evening_snack: String,
}

impl FoodDiaryInput {
    fn has_content(&self) -> bool {
        [
            &self.breakfast,
            &self.mid_morning_snack,
            &self.lunch,
            &self.dinner,
            &self.evening_snack,
        ]
        .iter()
        .any(|meal| !meal.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodDiarySummary {
    pub total_entries: usize,
    pub recent: Vec<FoodDiaryEntry>,
}

/// Prepend a day of meals; at least one slot must have content.
pub fn record_food_diary(
    field: &mut PersistentField<Vec<FoodDiaryEntry>>,
    input: &FoodDiaryInput,
    clock: &dyn Clock,
    ids: &IdGenerator,
) -> Result<FoodDiaryEntry, ValidationError> {
    if !input.has_content() {
        return Err(ValidationError::NoMealEntered);
    }
    let (id, timestamp) = ids.stamp(clock);

    let entry = FoodDiaryEntry {
        date: input.date.unwrap_or_else(|| clock.today()),
        breakfast: input.breakfast.trim().to_string(),
        mid_morning_snack: input.mid_morning_snack.trim().to_string(),
        lunch: input.lunch.trim().to_string(),
        dinner: input.dinner.trim().to_string(),
        evening_snack: input.evening_snack.trim().to_string(),
        id,
        timestamp,
    };

    tracing::info!(id, date = %entry.date, "Saved food diary entry");
    field.prepend(entry.clone());
    Ok(entry)
}

pub fn summarize_food_diary(entries: &[FoodDiaryEntry]) -> FoodDiarySummary {
    FoodDiarySummary {
        total_entries: entries.len(),
        recent: recent(entries, RECENT_FOOD_DIARY_LIMIT).to_vec(),
    }
}
