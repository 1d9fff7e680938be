//! `tracing` subscriber setup shared by both binaries.
//!
//! Logs go to stderr; stdout carries command output and the RPC protocol.

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. `RUST_LOG` wins over `default_level`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Peeks at the configured level before the settings engine is constructed,
/// so settings loading itself can be logged.
pub fn level_from_settings(path: Option<&str>) -> String {
    use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

    let mut engine = SettingsEngine::new(path.map(str::to_string));
    engine
        .load()
        .map(|s| s.logging.level)
        .unwrap_or_else(|_| "warn".to_string())
}
