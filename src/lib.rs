pub mod config;
pub mod clock;
pub mod storage;
pub mod field; // Storage-backed typed state
pub mod models;
pub mod validation;
pub mod stats;
pub mod classify; // Blood-sugar bands
pub mod blood_sugar;
pub mod weight;
pub mod medications;
pub mod food_diary;
pub mod messages; // Care-team messages (local only)
pub mod patient;
pub mod core_state;

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber. `RUST_LOG` overrides the default
/// filter. Calling it again once a subscriber is set is a no-op.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

/// Process start: logging, then the on-disk store and every field.
pub fn start() -> Result<core_state::CoreState, core_state::CoreError> {
    init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    core_state::CoreState::open_default()
}
