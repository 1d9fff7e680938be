use serde::{Deserialize, Serialize};

use super::section::ActiveView;

/// One rendered record in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: i64,
    pub url: String,
    pub tag: String,
    pub date_label: String,
    pub completed: bool,
    /// Label of the toggle action, which depends on the current state.
    pub toggle_label: String,
    /// Hidden by the current search filter.
    pub hidden: bool,
}

/// Which of the two lists an item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Pending,
    Completed,
}

/// The rendered record lists of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SectionView {
    pub pending: Vec<ItemView>,
    pub completed: Vec<ItemView>,
}

/// Which parts of the screen are visible for the active view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub active: ActiveView,
    pub title: String,
    pub form_visible: bool,
    pub lists_visible: bool,
    pub charts_visible: bool,
}

/// Text the user has typed into the save form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FormState {
    pub urls: String,
    pub tag: String,
}
