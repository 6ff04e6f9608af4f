//! The CTR and UD trace panels: state, pure rendering and egui drawing.

pub mod controller;
pub mod render;
pub mod ui;

pub use controller::DashboardController;
pub use ui::DashboardApp;
