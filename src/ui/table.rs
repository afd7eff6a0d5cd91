use eframe::egui::{self, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::EXPORT_FILE_NAME;
use crate::data::filter::FilteredView;
use crate::state::AppState;

/// The filtered rows with every source column, as text.
pub fn filtered_table(ui: &mut Ui, columns: &[String], view: &FilteredView<'_>) {
    if columns.is_empty() {
        return;
    }
    if view.is_empty() {
        ui.weak("No rows match the selected schemes.");
    }

    ScrollArea::horizontal()
        .id_salt("filtered_table_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(Column::auto().at_least(60.0), columns.len())
                .min_scrolled_height(0.0)
                .max_scroll_height(320.0)
                .header(20.0, |mut header| {
                    for name in columns {
                        header.col(|ui| {
                            ui.strong(name.as_str());
                        });
                    }
                })
                .body(|body| {
                    let rows = view.rows();
                    body.rows(18.0, rows.len(), |mut row| {
                        let record = rows[row.index()];
                        for cell in &record.cells {
                            row.col(|ui| {
                                ui.label(cell.as_str());
                            });
                        }
                    });
                });
        });
}

/// "Download Filtered Data": ask where to save, then export.
pub fn download_button(ui: &mut Ui, state: &mut AppState) {
    if ui.button("Download Filtered Data").clicked() {
        let target = rfd::FileDialog::new()
            .set_title("Save filtered data")
            .set_file_name(EXPORT_FILE_NAME)
            .add_filter("CSV", &["csv"])
            .save_file();

        if let Some(path) = target {
            state.export_filtered(&path);
        }
    }
}
