#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the recdash analytics dashboard.
use eframe::egui;
use recdash::dashboard::DashboardApp;
use recdash::dashboard::ui::MIN_VIEWPORT_SIZE;
use recdash::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title("recdash")
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::vec2(1280.0, 800.0));

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "recdash",
        native_options,
        Box::new(|_cc| match DashboardApp::from_config() {
            Ok(app) => Ok(Box::new(app)),
            Err(err) => {
                tracing::error!(error = %err, "Dashboard failed to start");
                Ok(Box::new(LaunchError { message: err }))
            }
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start dashboard");
                ui.label(&self.message);
            });
        });
    }
}
