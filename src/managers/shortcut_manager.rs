//! Shortcut Manager for Planner.
//!
//! Binds key chords to app actions with conflict detection
//! and platform-specific modifier key adaptation.

use std::collections::HashMap;

use crate::types::errors::ShortcutError;

/// Action triggered by the save chord.
pub const SAVE_ACTION: &str = "save";

/// Trait defining shortcut management operations.
pub trait ShortcutManagerTrait {
    fn register_shortcut(&mut self, action: &str, keys: &str) -> Result<(), ShortcutError>;
    /// Returns the action bound to a pressed key chord.
    fn resolve(&self, keys: &str) -> Option<&str>;
    fn list_shortcuts(&self) -> &HashMap<String, String>;
    fn reset_to_defaults(&mut self);
    fn has_conflict(&self, keys: &str, exclude_action: Option<&str>) -> Option<String>;
}

/// Shortcut manager with in-memory storage and platform adaptation.
pub struct ShortcutManager {
    shortcuts: HashMap<String, String>,
}

impl ShortcutManager {
    pub fn new() -> Self {
        Self {
            shortcuts: Self::default_shortcuts(),
        }
    }

    /// Starts from the defaults and applies user overrides; invalid or
    /// conflicting overrides are skipped with a warning.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut mgr = Self::new();
        for (action, keys) in overrides {
            if let Err(err) = mgr.register_shortcut(action, keys) {
                tracing::warn!(%action, %keys, %err, "ignoring shortcut override");
            }
        }
        mgr
    }

    pub fn default_shortcuts() -> HashMap<String, String> {
        [(SAVE_ACTION, "Ctrl+S")]
            .into_iter()
            .map(|(a, k)| (a.to_string(), Self::adapt_for_platform(k)))
            .collect()
    }

    /// Adapts modifier keys for the current platform.
    fn adapt_for_platform(keys: &str) -> String {
        if cfg!(target_os = "macos") {
            keys.replace("Ctrl+", "Cmd+")
        } else {
            keys.to_string()
        }
    }

    /// Normalizes a chord so `ctrl+s` and `Ctrl+S` compare equal.
    fn normalize(keys: &str) -> String {
        keys.split('+')
            .map(|part| part.trim().to_lowercase())
            .collect::<Vec<_>>()
            .join("+")
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn register_shortcut(&mut self, action: &str, keys: &str) -> Result<(), ShortcutError> {
        if keys.trim().is_empty() || keys.split('+').any(|p| p.trim().is_empty()) {
            return Err(ShortcutError::InvalidKeys(keys.to_string()));
        }

        if let Some(conflicting_action) = self.has_conflict(keys, Some(action)) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound to '{}'",
                keys, conflicting_action
            )));
        }

        let adapted = Self::adapt_for_platform(keys);
        self.shortcuts.insert(action.to_string(), adapted);
        Ok(())
    }

    fn resolve(&self, keys: &str) -> Option<&str> {
        let pressed = Self::normalize(&Self::adapt_for_platform(keys));
        self.shortcuts
            .iter()
            .find(|(_, bound)| Self::normalize(bound) == pressed)
            .map(|(action, _)| action.as_str())
    }

    fn list_shortcuts(&self) -> &HashMap<String, String> {
        &self.shortcuts
    }

    fn reset_to_defaults(&mut self) {
        self.shortcuts = Self::default_shortcuts();
    }

    fn has_conflict(&self, keys: &str, exclude_action: Option<&str>) -> Option<String> {
        let adapted = Self::normalize(&Self::adapt_for_platform(keys));
        self.shortcuts
            .iter()
            .filter(|(action, _)| Some(action.as_str()) != exclude_action)
            .find(|(_, bound)| Self::normalize(bound) == adapted)
            .map(|(action, _)| action.clone())
    }
}
