//! egui front end for the dashboard panels.

mod ctr_panel;
mod form_chrome;
pub mod style;
mod table;
mod ud_panel;

use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{self, RichText};

use crate::api::HttpBackend;
use crate::config;
use crate::dashboard::controller::DashboardController;

/// Smallest window size that still fits the metrics table header.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(960.0, 540.0);

const REPAINT_WHILE_LOADING: Duration = Duration::from_millis(100);

/// Top-level tabs. Each one is a container a panel can mount into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Ctr,
    UdTrace,
}

impl Tab {
    const ALL: [Tab; 2] = [Tab::Ctr, Tab::UdTrace];

    fn container(self) -> &'static str {
        match self {
            Self::Ctr => "ctr",
            Self::UdTrace => "ud",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Ctr => "CTR",
            Self::UdTrace => "UD Trace",
        }
    }
}

/// Renders the dashboard using the shared controller state.
pub struct DashboardApp {
    controller: DashboardController,
    active_tab: Tab,
    visuals_set: bool,
}

impl DashboardApp {
    pub fn new(controller: DashboardController) -> Self {
        Self {
            controller,
            active_tab: Tab::Ctr,
            visuals_set: false,
        }
    }

    /// Load settings, connect the HTTP backend and mount the panels.
    pub fn from_config() -> Result<Self, String> {
        let settings = config::load_or_default()
            .map_err(|err| format!("Failed to load config: {err}"))?
            .with_env_overrides();
        let backend = HttpBackend::from_settings(&settings.server)
            .map_err(|err| format!("Failed to configure server: {err}"))?;
        tracing::info!(base_url = %backend.base_url(), "Dashboard backend ready");
        let controller = DashboardController::new(Arc::new(backend), &settings);
        Ok(Self::new(controller))
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_tab_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("recdash").strong());
                ui.separator();
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.active_tab, tab, tab.label());
                }
            });
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        let pending = self.controller.pending_requests();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let text = match pending {
                0 => "Idle".to_string(),
                1 => "1 request in flight".to_string(),
                n => format!("{n} requests in flight"),
            };
            ui.label(RichText::new(text).color(style::muted_text()));
        });
    }

    fn render_active_tab(&mut self, ctx: &egui::Context) {
        let container = self.active_tab.container();
        egui::CentralPanel::default().show(ctx, |ui| {
            let holds_ctr = self
                .controller
                .ctr_panel()
                .is_some_and(|panel| panel.skeleton().container == container);
            let holds_ud = self
                .controller
                .ud_panel()
                .is_some_and(|panel| panel.skeleton().container == container);
            if holds_ctr {
                ctr_panel::render_ctr_panel(ui, &mut self.controller);
            } else if holds_ud {
                ud_panel::render_ud_panel(ui, &mut self.controller);
            } else {
                ui.label(RichText::new("No panel is mounted here.").color(style::muted_text()));
            }
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.render_tab_bar(ctx);
        self.render_status_bar(ctx);
        self.render_active_tab(ctx);
        if self.controller.has_pending_requests() {
            ctx.request_repaint_after(REPAINT_WHILE_LOADING);
        }
    }
}
