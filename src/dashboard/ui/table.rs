use eframe::egui::{self, Id, RichText, Ui};

use super::style;
use crate::dashboard::render::{CellView, TableView};

/// Place each row's cells into grid columns, leaving `None` where a cell
/// from an earlier row still spans down.
pub(crate) fn grid_slots(table: &TableView) -> Vec<Vec<Option<&CellView>>> {
    let columns = table.column_count();
    let mut covered = vec![0u32; columns];
    table
        .rows
        .iter()
        .map(|row| {
            let mut cells = row.cells.iter();
            covered
                .iter_mut()
                .map(|remaining| {
                    if *remaining > 0 {
                        *remaining -= 1;
                        return None;
                    }
                    let cell = cells.next()?;
                    *remaining = cell.row_span.saturating_sub(1);
                    Some(cell)
                })
                .collect()
        })
        .collect()
}

pub(crate) fn render_table(ui: &mut Ui, id: Id, table: &TableView) {
    egui::Grid::new(id)
        .striped(true)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for header in &table.header {
                let response = ui.label(RichText::new(&header.text).strong());
                if let Some(hint) = &header.hint {
                    response.on_hover_text(hint.as_str());
                }
            }
            ui.end_row();
            for row in grid_slots(table) {
                for slot in row {
                    match slot {
                        Some(cell) => {
                            let mut text = RichText::new(&cell.text);
                            if let Some(color) = style::tone_color(cell.tone) {
                                text = text.color(color);
                            }
                            ui.label(text);
                        }
                        None => {
                            ui.label("");
                        }
                    }
                }
                ui.end_row();
            }
        });
}
