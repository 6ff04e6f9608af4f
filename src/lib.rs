//! Library exports for reuse in benchmarks and tests.
/// Backend wire types and the HTTP client behind the panels.
pub mod api;
/// Application directory helpers.
pub mod app_dirs;
/// TOML settings.
pub mod config;
/// Dashboard panels: controller, rendering and egui front end.
pub mod dashboard;
/// Shared HTTP agent helpers.
pub mod http_client;
/// Tracing setup.
pub mod logging;
