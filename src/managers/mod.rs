// Planner state managers
// Managers handle stateful operations: record storage, record lifecycle, navigation, shortcuts.

pub mod item_lifecycle;
pub mod navigation;
pub mod record_store;
pub mod shortcut_manager;
