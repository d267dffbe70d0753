//! Application state shared by every screen.
//!
//! `CoreState` owns the store handle, the clock, the id generator and the
//! six persistent fields. It is constructed once at process start; every
//! mutator takes `&mut self` and completes its write before returning.

use std::sync::Arc;

use crate::blood_sugar::{record_blood_sugar, summarize_blood_sugar, BloodSugarInput, BloodSugarSummary};
use crate::clock::{Clock, IdGenerator, SystemClock};
use crate::config;
use crate::field::PersistentField;
use crate::food_diary::{record_food_diary, summarize_food_diary, FoodDiaryInput, FoodDiarySummary};
use crate::medications::{
    add_medication, list_medications, remove_medication, MedicationInput, MedicationListData,
};
use crate::messages::{send_message, summarize_messages, MessageInput, MessageSummary};
use crate::models::{
    BloodSugarEntry, FoodDiaryEntry, MedicationEntry, Message, PatientProfile, WeightEntry,
};
use crate::patient::{save_profile, ProfileInput};
use crate::storage::{KeyValueStore, SqliteStore, StorageError};
use crate::validation::ValidationError;
use crate::weight::{record_weight, summarize_weight, WeightInput, WeightSummary};

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
    profile: PersistentField<PatientProfile>,
    blood_sugar: PersistentField<Vec<BloodSugarEntry>>,
    medications: PersistentField<Vec<MedicationEntry>>,
    weight: PersistentField<Vec<WeightEntry>>,
    food_diary: PersistentField<Vec<FoodDiaryEntry>>,
    messages: PersistentField<Vec<Message>>,
}

impl CoreState {
    /// Load every field from `store`. Missing or unreadable keys start
    /// from their defaults.
    pub fn open(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let profile: PersistentField<PatientProfile> =
            PersistentField::create(store.clone(), config::KEY_PATIENT_INFO, PatientProfile::default());
        let blood_sugar: PersistentField<Vec<BloodSugarEntry>> =
            PersistentField::create(store.clone(), config::KEY_BLOOD_SUGAR, Vec::new());
        let medications: PersistentField<Vec<MedicationEntry>> =
            PersistentField::create(store.clone(), config::KEY_MEDICATIONS, Vec::new());
        let weight: PersistentField<Vec<WeightEntry>> =
            PersistentField::create(store.clone(), config::KEY_WEIGHT, Vec::new());
        let food_diary: PersistentField<Vec<FoodDiaryEntry>> =
            PersistentField::create(store.clone(), config::KEY_FOOD_DIARY, Vec::new());
        let messages: PersistentField<Vec<Message>> =
            PersistentField::create(store.clone(), config::KEY_MESSAGES, Vec::new());

        let floor = [
            max_id(blood_sugar.read().iter().map(|e| e.id)),
            max_id(medications.read().iter().map(|e| e.id)),
            max_id(weight.read().iter().map(|e| e.id)),
            max_id(food_diary.read().iter().map(|e| e.id)),
            max_id(messages.read().iter().map(|e| e.id)),
        ]
        .into_iter()
        .max()
        .unwrap_or(0);

        tracing::info!(
            blood_sugar = blood_sugar.read().len(),
            medications = medications.read().len(),
            weight = weight.read().len(),
            food_diary = food_diary.read().len(),
            messages = messages.read().len(),
            "Loaded health logs"
        );

        Self {
            store,
            clock,
            ids: IdGenerator::starting_after(floor),
            profile,
            blood_sugar,
            medications,
            weight,
            food_diary,
            messages,
        }
    }

    /// Open the on-disk store at `config::store_path()` with the wall clock.
    pub fn open_default() -> Result<Self, CoreError> {
        let path = config::store_path();
        let store = SqliteStore::open(&path)?;
        Ok(Self::open(Arc::new(store), Arc::new(SystemClock)))
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    // ── Current values (read path) ──────────────────────────

    pub fn profile(&self) -> &PatientProfile {
        self.profile.read()
    }

    pub fn blood_sugar_entries(&self) -> &[BloodSugarEntry] {
        self.blood_sugar.read()
    }

    pub fn medications(&self) -> &[MedicationEntry] {
        self.medications.read()
    }

    pub fn weight_entries(&self) -> &[WeightEntry] {
        self.weight.read()
    }

    pub fn food_diary(&self) -> &[FoodDiaryEntry] {
        self.food_diary.read()
    }

    pub fn messages(&self) -> &[Message] {
        self.messages.read()
    }

    // ── Form submissions (write path) ───────────────────────

    pub fn save_profile(&mut self, input: &ProfileInput) -> Result<PatientProfile, ValidationError> {
        save_profile(&mut self.profile, input)
    }

    pub fn record_blood_sugar(
        &mut self,
        input: &BloodSugarInput,
    ) -> Result<BloodSugarEntry, ValidationError> {
        record_blood_sugar(&mut self.blood_sugar, input, self.clock.as_ref(), &self.ids)
    }

    pub fn add_medication(
        &mut self,
        input: &MedicationInput,
    ) -> Result<MedicationEntry, ValidationError> {
        add_medication(&mut self.medications, input, self.clock.as_ref(), &self.ids)
    }

    pub fn remove_medication(&mut self, id: i64) -> bool {
        remove_medication(&mut self.medications, id)
    }

    pub fn record_weight(&mut self, input: &WeightInput) -> Result<WeightEntry, ValidationError> {
        record_weight(&mut self.weight, input, self.clock.as_ref(), &self.ids)
    }

    pub fn record_food_diary(
        &mut self,
        input: &FoodDiaryInput,
    ) -> Result<FoodDiaryEntry, ValidationError> {
        record_food_diary(&mut self.food_diary, input, self.clock.as_ref(), &self.ids)
    }

    pub fn send_message(&mut self, input: &MessageInput) -> Result<Message, ValidationError> {
        send_message(&mut self.messages, input, self.clock.as_ref(), &self.ids)
    }

    // ── Summary views ───────────────────────────────────────

    pub fn blood_sugar_summary(&self) -> BloodSugarSummary {
        summarize_blood_sugar(self.blood_sugar.read(), self.clock.today())
    }

    pub fn weight_summary(&self) -> WeightSummary {
        summarize_weight(self.weight.read())
    }

    pub fn medication_list(&self) -> MedicationListData {
        list_medications(self.medications.read())
    }

    pub fn food_diary_summary(&self) -> FoodDiarySummary {
        summarize_food_diary(self.food_diary.read())
    }

    pub fn message_summary(&self) -> MessageSummary {
        summarize_messages(self.messages.read())
    }

    // ── Reset ───────────────────────────────────────────────

    /// Delete every persisted key and reset all fields to their defaults.
    /// Returns false if any key could not be removed from the store.
    pub fn clear_all(&mut self) -> bool {
        let results = [
            self.profile.clear(),
            self.blood_sugar.clear(),
            self.medications.clear(),
            self.weight.clear(),
            self.food_diary.clear(),
            self.messages.clear(),
        ];
        let ok = results.iter().all(|&r| r);
        tracing::info!(ok, "Cleared all health data");
        ok
    }
}

impl std::fmt::Debug for CoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreState")
            .field("profile", &self.profile.read().is_filled_in())
            .field("blood_sugar", &self.blood_sugar.read().len())
            .field("medications", &self.medications.read().len())
            .field("weight", &self.weight.read().len())
            .field("food_diary", &self.food_diary.read().len())
            .field("messages", &self.messages.read().len())
            .finish()
    }
}

fn max_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0)
}

// ═══════════════════════════════════════════════════════════
// Error types
// ═══════════════════════════════════════════════════════════

/// Errors from CoreState construction.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
