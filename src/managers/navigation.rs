//! Section navigation for Planner.
//!
//! Tracks the active view (one of the record sections or the charts
//! pseudo-section), what is visible for it, and the contents of the save form.

use serde::Serialize;

use crate::types::errors::NavigationError;
use crate::types::section::{ActiveView, Section};
use crate::types::view::{FormState, Layout};

/// One entry of the navigation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub id: &'static str,
    pub label: &'static str,
}

/// The navigation list: every section followed by the charts view.
pub fn nav_entries() -> Vec<NavEntry> {
    Section::ALL
        .iter()
        .map(|s| ActiveView::Section(*s))
        .chain(std::iter::once(ActiveView::Charts))
        .map(|view| NavEntry {
            id: view.id(),
            label: view.label(),
        })
        .collect()
}

/// Trait defining navigation operations.
pub trait NavigationTrait {
    fn select(&mut self, id: &str) -> Result<Layout, NavigationError>;
    fn active(&self) -> ActiveView;
    fn layout(&self) -> Layout;
    fn form(&self) -> &FormState;
    fn update_form(&mut self, urls: Option<&str>, tag: Option<&str>);
    fn clear_form(&mut self);
}

/// Navigation state for one session of the app.
pub struct SectionController {
    active: ActiveView,
    form: FormState,
}

impl SectionController {
    /// Starts on the first navigation entry.
    pub fn new() -> Self {
        let first = nav_entries()
            .first()
            .and_then(|entry| entry.id.parse().ok())
            .unwrap_or(ActiveView::Section(Section::Writeups));
        Self {
            active: first,
            form: FormState::default(),
        }
    }
}

impl Default for SectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationTrait for SectionController {
    fn select(&mut self, id: &str) -> Result<Layout, NavigationError> {
        let view: ActiveView = id.parse()?;
        tracing::debug!(from = self.active.id(), to = view.id(), "section selected");
        self.active = view;
        Ok(self.layout())
    }

    fn active(&self) -> ActiveView {
        self.active
    }

    fn layout(&self) -> Layout {
        let in_section = self.active.section().is_some();
        Layout {
            active: self.active,
            title: self.active.label().to_string(),
            form_visible: in_section,
            lists_visible: in_section,
            charts_visible: !in_section,
        }
    }

    fn form(&self) -> &FormState {
        &self.form
    }

    fn update_form(&mut self, urls: Option<&str>, tag: Option<&str>) {
        if let Some(urls) = urls {
            self.form.urls = urls.to_string();
        }
        if let Some(tag) = tag {
            self.form.tag = tag.to_string();
        }
    }

    fn clear_form(&mut self) {
        self.form = FormState::default();
    }
}
