use eframe::egui::{self, RichText, Ui};

use super::{form_chrome, style, table};
use crate::dashboard::controller::DashboardController;

pub(crate) fn render_ud_panel(ui: &mut Ui, controller: &mut DashboardController) {
    let Some(panel) = controller.ud_panel_mut() else {
        return;
    };
    let skeleton = panel.skeleton().clone();
    let ids = skeleton.ids;
    let mut selected: Option<String> = None;
    let mut submit = false;

    egui::SidePanel::left(ids.result.with("samples"))
        .resizable(true)
        .default_width(200.0)
        .show_inside(ui, |ui| {
            ui.heading("Samples");
            let samples = panel.sample_form();
            form_chrome::status_slot(ui, ids.status.with("samples"), samples);
            let Some(list) = samples.view() else {
                return;
            };
            ui.horizontal(|ui| {
                ui.label(RichText::new(&list.header).strong());
                form_chrome::copy_html_button(ui, list);
            });
            egui::ScrollArea::vertical()
                .id_salt(ids.result.with("sample_list"))
                .show(ui, |ui| {
                    for label in &list.labels {
                        if ui.link(label.as_str()).clicked() {
                            selected = Some(label.clone());
                        }
                    }
                });
        });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        ui.heading(skeleton.title);
        let enabled = panel.trace_form().fieldset_enabled();
        ui.push_id(ids.form, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                ui.horizontal(|ui| {
                    for field in &skeleton.fields {
                        let Some(value) = panel.input.field_mut(field.name) else {
                            continue;
                        };
                        submit |= form_chrome::text_field(
                            ui,
                            ids.fieldset.with(field.name),
                            field,
                            value,
                        );
                    }
                    submit |= ui
                        .push_id(ids.submit, |ui| ui.button(skeleton.submit_label))
                        .inner
                        .clicked();
                });
            });
        });
        form_chrome::field_errors(ui, panel.field_errors());
        form_chrome::status_slot(ui, ids.status, panel.trace_form());
        ui.separator();

        let Some(trace) = panel.trace_form().view() else {
            ui.label(RichText::new("Pick a sample or enter a ud.").color(style::muted_text()));
            return;
        };
        form_chrome::copy_html_button(ui, trace);
        egui::ScrollArea::vertical()
            .id_salt(ids.result)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (index, block) in trace.tables.iter().enumerate() {
                    ui.label(RichText::new(&block.summary).strong());
                    table::render_table(ui, ids.result.with(index), &block.table);
                    ui.add_space(8.0);
                }
            });
    });

    if let Some(label) = selected {
        controller.select_sample(&label);
    } else if submit {
        controller.submit_trace();
    }
}
