use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level planner settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannerSettings {
    pub storage: StorageSettings,
    pub display: DisplaySettings,
    pub logging: LoggingSettings,
    pub shortcuts: HashMap<String, String>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            storage: StorageSettings::default(),
            display: DisplaySettings::default(),
            logging: LoggingSettings::default(),
            shortcuts: Self::default_shortcuts(),
        }
    }
}

impl PlannerSettings {
    /// Returns the default keyboard shortcuts.
    pub fn default_shortcuts() -> HashMap<String, String> {
        let mut shortcuts = HashMap::new();
        shortcuts.insert("save".to_string(), "Ctrl+S".to_string());
        shortcuts
    }
}

/// Where records and exports live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StorageSettings {
    /// Database file; `None` uses the platform data directory.
    pub database_path: Option<String>,
    /// Export directory; `None` uses the current working directory.
    pub export_dir: Option<String>,
}

/// Presentation values handed to whatever draws the views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplaySettings {
    /// How long an item fades out after a toggle or delete before the view reloads.
    pub fade_delay_ms: u64,
    /// `chrono` format string for timeline labels and item dates.
    pub date_format: String,
    pub timeline_order: TimelineOrder,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            fade_delay_ms: 300,
            date_format: "%-m/%-d/%Y".to_string(),
            timeline_order: TimelineOrder::Chronological,
        }
    }
}

/// Ordering of the timeline chart buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineOrder {
    /// Oldest day first.
    Chronological,
    /// Order in which each day first appears in the record set.
    FirstSeen,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
