//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, value persistence, validation and reset behavior.

use planner::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use planner::types::errors::SettingsError;
use planner::types::settings::{PlannerSettings, TimelineOrder};
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

/// Without a config file on disk, `load()` returns the built-in defaults.
#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, PlannerSettings::default());
    assert_eq!(settings.display.fade_delay_ms, 300);
    assert_eq!(settings.display.date_format, "%-m/%-d/%Y");
    assert_eq!(settings.display.timeline_order, TimelineOrder::Chronological);
    assert_eq!(settings.logging.level, "warn");
    assert_eq!(settings.shortcuts.get("save").map(String::as_str), Some("Ctrl+S"));
    assert!(settings.storage.database_path.is_none());
}

/// A change made through `set_value` is on disk for the next engine instance.
#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("display.fade_delay_ms", serde_json::json!(0))
            .unwrap();
        engine
            .set_value("display.timeline_order", serde_json::json!("first-seen"))
            .unwrap();
    }

    {
        let mut engine2 = engine_in_temp(&dir);
        let loaded = engine2.load().unwrap();
        assert_eq!(loaded.display.fade_delay_ms, 0);
        assert_eq!(loaded.display.timeline_order, TimelineOrder::FirstSeen);
    }
}

#[test]
fn test_set_value_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let result = engine.set_value("display.colour", serde_json::json!("red"));
    assert!(matches!(result, Err(SettingsError::InvalidKey(_))));

    let result = engine.set_value("", serde_json::json!(1));
    assert!(matches!(result, Err(SettingsError::InvalidKey(_))));
}

#[test]
fn test_set_value_rejects_wrong_type() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let result = engine.set_value("display.fade_delay_ms", serde_json::json!("slow"));
    assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
    assert_eq!(engine.get_settings().display.fade_delay_ms, 300);
}

/// A file with an unusable date format is refused instead of silently loaded.
#[test]
fn test_load_rejects_invalid_date_format() {
    let dir = TempDir::new().unwrap();
    let mut settings = PlannerSettings::default();
    settings.display.date_format = "%Q".to_string();
    std::fs::write(
        dir.path().join("settings.json"),
        serde_json::to_string(&settings).unwrap(),
    )
    .unwrap();

    let mut engine = engine_in_temp(&dir);
    assert!(matches!(engine.load(), Err(SettingsError::InvalidValue(_))));
}

#[test]
fn test_load_malformed_file_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ nope").unwrap();

    let mut engine = engine_in_temp(&dir);
    assert!(matches!(
        engine.load(),
        Err(SettingsError::SerializationError(_))
    ));
}

/// `reset()` restores the defaults in memory and on disk.
#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();

        engine
            .set_value("logging.level", serde_json::json!("debug"))
            .unwrap();
        engine
            .set_value("shortcuts.save", serde_json::json!("Ctrl+Enter"))
            .unwrap();
        assert_eq!(engine.get_settings().logging.level, "debug");

        engine.reset().unwrap();
        assert_eq!(*engine.get_settings(), PlannerSettings::default());
    }

    {
        let mut engine2 = engine_in_temp(&dir);
        let loaded = engine2.load().unwrap();
        assert_eq!(loaded, PlannerSettings::default());
    }
}

/// A format that needs a time of day cannot label a calendar day; it must be
/// refused and must not reach the settings file.
#[test]
fn test_set_value_rejects_format_without_date_rendering() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        for format in ["%H:%M", "%Y-%m-%d %z", "%Z"] {
            let result = engine.set_value("display.date_format", serde_json::json!(format));
            assert!(
                matches!(result, Err(SettingsError::InvalidValue(_))),
                "{} should be rejected",
                format
            );
        }
        engine
            .set_value("display.date_format", serde_json::json!("%d %b %Y"))
            .unwrap();
    }

    let mut engine2 = engine_in_temp(&dir);
    assert_eq!(engine2.load().unwrap().display.date_format, "%d %b %Y");
}

#[test]
fn test_set_value_rejects_unparseable_log_level() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let result = engine.set_value("logging.level", serde_json::json!("planner=loud"));
    assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
    assert_eq!(engine.get_settings().logging.level, "warn");

    engine
        .set_value("logging.level", serde_json::json!("planner=debug"))
        .unwrap();
}
