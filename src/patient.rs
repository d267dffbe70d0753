//! Patient profile form.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::field::PersistentField;
use crate::models::{Gender, PatientProfile};
use crate::validation::{parse_age, require_text, ValidationError};

/// Profile form input. Age arrives as typed text and is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileInput {
    pub name: String,
    pub age: String,
    #[serde(with = "crate::models::blank_as_none")]
    pub gender: Option<Gender>,
    pub phone: String,
    pub email: String,
    pub emergency_contact: String,
    #[serde(with = "crate::models::blank_as_none")]
    pub diagnosis_date: Option<NaiveDate>,
}

/// Validate and replace the stored profile.
///
/// Returns the saved profile. Persistence failures are logged by the field
/// and do not surface here.
pub fn save_profile(
    field: &mut PersistentField<PatientProfile>,
    input: &ProfileInput,
) -> Result<PatientProfile, ValidationError> {
    let name = require_text("Name", &input.name)?;
    let age = match input.age.trim() {
        "" => None,
        raw => Some(parse_age(raw)?),
    };

    let profile = PatientProfile {
        name,
        age,
        gender: input.gender,
        phone: input.phone.trim().to_string(),
        email: input.email.trim().to_string(),
        emergency_contact: input.emergency_contact.trim().to_string(),
        diagnosis_date: input.diagnosis_date,
    };

    tracing::info!(has_age = age.is_some(), "Saved patient profile");
    field.write(profile.clone());
    Ok(profile)
}
