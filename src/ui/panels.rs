use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Parameter;
use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left panel: scheme and parameter multi-selects.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // The dataset is immutable; hold our own handle so the selection can be
    // mutated while iterating its schemes.
    let dataset = Arc::clone(&state.dataset);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Schemes ----
            let header = format!(
                "Water supply schemes  ({}/{})",
                state.selection.schemes.len(),
                dataset.schemes().len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("schemes")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.label("Select the water supply schemes to view:");
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.selection.select_all_schemes(&dataset);
                        }
                        if ui.small_button("None").clicked() {
                            state.selection.clear_schemes();
                        }
                    });
                    for scheme in dataset.schemes() {
                        let mut checked = state.selection.contains_scheme(scheme);
                        if ui.checkbox(&mut checked, scheme.as_str()).changed() {
                            state.selection.toggle_scheme(scheme);
                        }
                    }
                });

            ui.separator();

            // ---- Parameters ----
            let header = format!(
                "Parameters  ({}/{})",
                state.selection.parameters.len(),
                Parameter::COUNT
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("parameters")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.label("Select parameters to visualize:");
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.selection.select_all_parameters();
                        }
                        if ui.small_button("None").clicked() {
                            state.selection.clear_parameters();
                        }
                    });
                    for p in Parameter::ALL {
                        let mut checked = state.selection.contains_parameter(p);
                        let text = RichText::new(p.column()).color(state.colors.color_for(p));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.selection.toggle_parameter(p);
                        }
                    }
                });

            ui.separator();

            // Display order follows the order things were ticked.
            ui.weak(format!("Scheme order: {}", state.selection.schemes.join(", ")));
            let params: Vec<&str> = state.selection.parameters.iter().map(|p| p.column()).collect();
            ui.weak(format!("Chart order: {}", params.join(", ")));

            if ui.button("Reset to defaults").clicked() {
                state.reset_selection();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
            if ui.button("Force reload").clicked() {
                state.force_reload();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        let source = state
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        ui.label(format!(
            "{} samples in {source}, {} schemes",
            state.dataset.len(),
            state.dataset.schemes().len()
        ));

        match &state.status {
            Some(Status::Error(msg)) => {
                ui.separator();
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            Some(Status::Info(msg)) => {
                ui.separator();
                ui.label(msg.as_str());
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open water quality data")
        .add_filter("Delimited files", &["csv", "tsv", "txt"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
