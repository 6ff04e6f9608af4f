//! Widgets shared by every panel form: status slot, field errors, copy button.

use eframe::egui::{self, Id, RichText, Ui};

use super::style;
use crate::dashboard::controller::{FieldError, FieldSpec, FormController};
use crate::dashboard::render::markup::ToMarkup;

/// Spinner while loading, error text after a failure, nothing otherwise.
pub(crate) fn status_slot<V>(ui: &mut Ui, id: Id, form: &FormController<V>) {
    ui.push_id(id, |ui| {
        if form.is_loading() {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label(RichText::new("Loading...").color(style::muted_text()));
            });
        } else if let Some(message) = form.status_text() {
            ui.label(RichText::new(message).color(style::error_text()));
        }
    });
}

pub(crate) fn field_errors(ui: &mut Ui, errors: &[FieldError]) {
    for error in errors {
        ui.label(RichText::new(error.to_string()).color(style::error_text()));
    }
}

/// Copy a rendered view to the clipboard as escaped HTML.
pub(crate) fn copy_html_button(ui: &mut Ui, view: &impl ToMarkup) {
    if ui
        .small_button("Copy HTML")
        .on_hover_text("Copy this result as an HTML fragment")
        .clicked()
    {
        ui.ctx().copy_text(view.to_markup());
    }
}

/// A labelled single-line input. Returns `true` when Enter was pressed in it.
pub(crate) fn text_field(ui: &mut Ui, id: Id, field: &FieldSpec, value: &mut String) -> bool {
    ui.label(field.display_label());
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .id(id)
            .hint_text(field.hint)
            .desired_width(140.0),
    );
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}
