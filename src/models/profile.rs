use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::blank_as_none;
use super::enums::Gender;

/// The single patient profile stored under `patientInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientProfile {
    pub name: String,
    #[serde(with = "blank_as_none")]
    pub age: Option<u8>,
    #[serde(with = "blank_as_none")]
    pub gender: Option<Gender>,
    pub phone: String,
    pub email: String,
    pub emergency_contact: String,
    #[serde(with = "blank_as_none")]
    pub diagnosis_date: Option<NaiveDate>,
}

impl PatientProfile {
    /// Whether anything has been saved yet (drives the summary card).
    pub fn is_filled_in(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
