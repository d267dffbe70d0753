//! Medication list: add, remove and list current medications.
//!
//! The only log whose entries can be removed after creation.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, IdGenerator};
use crate::field::PersistentField;
use crate::models::{MedicationEntry, MedicationFrequency};
use crate::validation::{require_text, ValidationError};

// ═══════════════════════════════════════════
// Input / view types
// ═══════════════════════════════════════════

/// Medication form input. Only `name` is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MedicationInput {
    pub name: String,
    pub strength: String,
    #[serde(with = "crate::models::blank_as_none")]
    pub frequency: Option<MedicationFrequency>,
    pub dosage: String,
    pub prescribed_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicationListData {
    pub medications: Vec<MedicationEntry>,
    pub total: usize,
}

// ═══════════════════════════════════════════
// Operations
// ═══════════════════════════════════════════

/// Validate and prepend a medication. Unset optional fields are stored as `""`.
pub fn add_medication(
    field: &mut PersistentField<Vec<MedicationEntry>>,
    input: &MedicationInput,
    clock: &dyn Clock,
    ids: &IdGenerator,
) -> Result<MedicationEntry, ValidationError> {
    let name = require_text("Medication name", &input.name)?;
    let (id, date_added) = ids.stamp(clock);

    let entry = MedicationEntry {
        name,
        strength: input.strength.trim().to_string(),
        frequency: input.frequency,
        dosage: input.dosage.trim().to_string(),
        prescribed_by: input.prescribed_by.trim().to_string(),
        id,
        date_added,
    };

    tracing::info!(id, "Added medication");
    field.prepend(entry.clone());
    Ok(entry)
}

/// Remove the medication with `id`. Returns false if no entry had that id.
pub fn remove_medication(field: &mut PersistentField<Vec<MedicationEntry>>, id: i64) -> bool {
    if !field.read().iter().any(|m| m.id == id) {
        tracing::warn!(id, "Medication not found for removal");
        return false;
    }
    let removed = field.remove_where(move |m| m.id == id);
    tracing::info!(id, removed, "Removed medication");
    removed > 0
}

pub fn list_medications(entries: &[MedicationEntry]) -> MedicationListData {
    MedicationListData {
        medications: entries.to_vec(),
        total: entries.len(),
    }
}
