// Planner services
// Stateless or file-backed services: aggregation, rendering, charts, export, settings.

pub mod aggregation;
pub mod chart_renderer;
pub mod export;
pub mod rendering;
pub mod settings_engine;
