use eframe::egui::{self, Ui};

use super::{form_chrome, table};
use crate::dashboard::controller::DashboardController;

pub(crate) fn render_ctr_panel(ui: &mut Ui, controller: &mut DashboardController) {
    let Some(panel) = controller.ctr_panel_mut() else {
        return;
    };
    let skeleton = panel.skeleton().clone();
    let ids = skeleton.ids;
    let enabled = panel.form().fieldset_enabled();
    let mut submit = false;

    ui.heading(skeleton.title);
    ui.push_id(ids.form, |ui| {
        ui.add_enabled_ui(enabled, |ui| {
            ui.push_id(ids.fieldset, |ui| {
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
    });
    form_chrome::field_errors(ui, panel.field_errors());
    form_chrome::status_slot(ui, ids.status, panel.form());
    ui.separator();

    if let Some(view) = panel.form().view() {
        form_chrome::copy_html_button(ui, view);
        egui::ScrollArea::both()
            .id_salt(ids.result)
            .auto_shrink([false, false])
            .show(ui, |ui| table::render_table(ui, ids.result, view));
    }

    if submit {
        controller.submit_ctr();
    }
}
