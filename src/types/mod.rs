// Planner shared type definitions
// Each submodule defines types used across the application.

pub mod errors;
pub mod record;
pub mod section;
pub mod settings;
pub mod summary;
pub mod view;
