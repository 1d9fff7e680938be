//! App Core for Planner.
//!
//! [`App`] is the explicit context every operation runs against: the open
//! store, navigation and form state, shortcuts, settings, and the currently
//! rendered section view.

use chrono::Local;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::database::connection::Database;
use crate::managers::item_lifecycle::{Confirm, ItemLifecycle, MutationOutcome};
use crate::managers::navigation::{NavigationTrait, SectionController};
use crate::managers::record_store::{RecordStore, RecordStoreTrait};
use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::services::aggregation;
use crate::services::export;
use crate::services::rendering;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::{
    ExportError, LifecycleError, NavigationError, SettingsError, StoreError,
};
use crate::types::settings::PlannerSettings;
use crate::types::summary::ChartData;
use crate::types::view::{Layout, ListKind, SectionView};

/// Central application struct holding the store and all session state.
pub struct App {
    pub db: Database,
    pub navigation: SectionController,
    pub shortcuts: ShortcutManager,
    pub settings_engine: SettingsEngine,
    rendered: SectionView,
}

impl App {
    /// Opens the database at `db_path` with settings from the platform config file.
    ///
    /// A missing or unreadable settings file falls back to defaults.
    pub fn new(db_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_settings(db_path, SettingsEngine::new(None))
    }

    /// Opens the database at `db_path` using an explicit settings engine.
    pub fn with_settings(
        db_path: &str,
        mut settings_engine: SettingsEngine,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if let Err(err) = settings_engine.load() {
            tracing::warn!(%err, path = settings_engine.get_config_path(), "using default settings");
        }

        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Database::open(db_path)?;

        let shortcuts = ShortcutManager::with_overrides(&settings_engine.get_settings().shortcuts);

        let mut app = Self {
            db,
            navigation: SectionController::new(),
            shortcuts,
            settings_engine,
            rendered: SectionView::default(),
        };
        app.reload()?;
        Ok(app)
    }

    fn lifecycle(&self) -> ItemLifecycle<'_> {
        let fade = Duration::from_millis(self.settings_engine.get_settings().display.fade_delay_ms);
        ItemLifecycle::new(self.db.connection(), fade)
    }

    fn date_format(&self) -> &str {
        &self.settings_engine.get_settings().display.date_format
    }

    /// Switches the active view and loads its data fresh.
    ///
    /// When loading fails the view is switched but left empty, and the store
    /// error is returned.
    pub fn select(&mut self, id: &str) -> Result<Layout, NavigationError> {
        let layout = self.navigation.select(id)?;
        if let Err(err) = self.reload() {
            tracing::error!(%err, section = id, "failed to load section");
            return Err(err.into());
        }
        Ok(layout)
    }

    /// Rebuilds the rendered view of the active section from the store.
    ///
    /// Search filtering and drag order are discarded. The charts view has no
    /// lists. On failure the rendered view stays empty.
    pub fn reload(&mut self) -> Result<&SectionView, StoreError> {
        self.rendered = SectionView::default();
        self.rendered = match self.navigation.active().section() {
            Some(section) => {
                let records = RecordStore::new(self.db.connection()).get_all_by_section(section)?;
                rendering::render_section(&records, &Local, self.date_format())
            }
            None => SectionView::default(),
        };
        Ok(&self.rendered)
    }

    /// The view as last rendered, including search and drag changes.
    pub fn rendered(&self) -> &SectionView {
        &self.rendered
    }

    /// Aggregates over every stored record.
    pub fn chart_data(&self) -> Result<ChartData, StoreError> {
        let records = RecordStore::new(self.db.connection()).get_all()?;
        let display = &self.settings_engine.get_settings().display;
        Ok(aggregation::chart_data(
            &records,
            &Local,
            &display.date_format,
            display.timeline_order,
        ))
    }

    /// Saves a batch of URLs under the active section, then reloads.
    pub fn save(&mut self, urls: &str, tag: &str) -> Result<MutationOutcome, LifecycleError> {
        let active = self.navigation.active();
        let outcome = self.lifecycle().create_batch(urls, tag, active)?;
        self.reload()?;
        Ok(outcome)
    }

    /// Saves what is in the form; the form is cleared only on success.
    pub fn submit_form(&mut self) -> Result<MutationOutcome, LifecycleError> {
        let form = self.navigation.form().clone();
        let outcome = self.save(&form.urls, &form.tag)?;
        self.navigation.clear_form();
        Ok(outcome)
    }

    pub fn toggle(&mut self, id: i64) -> Result<MutationOutcome, LifecycleError> {
        let outcome = self.lifecycle().toggle_complete(id)?;
        self.reload()?;
        Ok(outcome)
    }

    pub fn delete(&mut self, id: i64, confirmer: &dyn Confirm) -> Result<MutationOutcome, LifecycleError> {
        let outcome = self.lifecycle().delete(id, confirmer)?;
        if outcome.needs_reload() {
            self.reload()?;
        }
        Ok(outcome)
    }

    /// Filters the rendered items by url or tag.
    pub fn search(&mut self, query: &str) -> &SectionView {
        self.rendered.apply_search(query);
        &self.rendered
    }

    /// Reorders the rendered list. Not persisted.
    pub fn reorder(&mut self, kind: ListKind, id: i64, before: Option<i64>) -> bool {
        self.rendered.move_item(kind, id, before)
    }

    /// Handles a key chord; `Ctrl+S` submits the form.
    ///
    /// Returns the triggered action and its outcome, or `None` for unbound chords.
    pub fn press(&mut self, keys: &str) -> Option<(String, Result<MutationOutcome, LifecycleError>)> {
        let action = self.shortcuts.resolve(keys)?.to_string();
        match action.as_str() {
            crate::managers::shortcut_manager::SAVE_ACTION => {
                let result = self.submit_form();
                Some((action, result))
            }
            _ => {
                tracing::debug!(%action, "shortcut has no handler");
                None
            }
        }
    }

    /// Restores the default key bindings and writes them to the settings file.
    pub fn reset_shortcuts(&mut self) -> Result<(), SettingsError> {
        let defaults = serde_json::to_value(PlannerSettings::default_shortcuts())
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        self.settings_engine.set_value("shortcuts", defaults)?;
        self.shortcuts.reset_to_defaults();
        Ok(())
    }

    /// Directory exports go to when the caller names none.
    pub fn export_dir(&self) -> PathBuf {
        self.settings_engine
            .get_settings()
            .storage
            .export_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Writes every record to `planner-export-<today>.json`.
    pub fn export(&self, dir: Option<&Path>) -> Result<PathBuf, ExportError> {
        let dir = dir.map(Path::to_path_buf).unwrap_or_else(|| self.export_dir());
        export::export_to_dir(self.db.connection(), &dir, Local::now().date_naive())
    }
}
