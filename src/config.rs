use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Sugarwise";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SUGARWISE_DATA_DIR";

/// File name of the SQLite key/value store inside the data directory.
pub const STORE_FILE_NAME: &str = "store.db";

// ═══════════════════════════════════════════
// Storage keys: one per top-level entity
// ═══════════════════════════════════════════

pub const KEY_PATIENT_INFO: &str = "patientInfo";
pub const KEY_BLOOD_SUGAR: &str = "bloodSugarEntries";
pub const KEY_MEDICATIONS: &str = "medications";
pub const KEY_WEIGHT: &str = "weightEntries";
pub const KEY_FOOD_DIARY: &str = "foodDiary";
pub const KEY_MESSAGES: &str = "messages";

pub const ALL_KEYS: &[&str] = &[
    KEY_PATIENT_INFO,
    KEY_BLOOD_SUGAR,
    KEY_MEDICATIONS,
    KEY_WEIGHT,
    KEY_FOOD_DIARY,
    KEY_MESSAGES,
];

// ═══════════════════════════════════════════
// View limits
// ═══════════════════════════════════════════

/// Maximum message body length, in characters.
pub const MESSAGE_MAX_CHARS: usize = 1000;

/// Days covered by the blood-sugar rolling average.
pub const BLOOD_SUGAR_AVERAGE_DAYS: i64 = 7;

pub const RECENT_BLOOD_SUGAR_LIMIT: usize = 15;
pub const RECENT_WEIGHT_LIMIT: usize = 10;
pub const RECENT_FOOD_DIARY_LIMIT: usize = 7;

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "sugarwise_lib=info,warn"
}

/// Get the application data directory.
/// `$SUGARWISE_DATA_DIR` if set, otherwise ~/Sugarwise/.
pub fn app_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the persistent store file.
pub fn store_path() -> PathBuf {
    app_data_dir().join(STORE_FILE_NAME)
}
