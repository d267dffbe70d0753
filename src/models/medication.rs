use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::blank_as_none;
use super::enums::MedicationFrequency;

/// A current medication. Optional text fields are stored as `""` when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationEntry {
    pub name: String,
    #[serde(default)]
    pub strength: String,
    #[serde(default, with = "blank_as_none")]
    pub frequency: Option<MedicationFrequency>,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub prescribed_by: String,
    pub id: i64,
    pub date_added: DateTime<Utc>,
}
