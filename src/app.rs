use std::sync::Arc;

use eframe::egui::{self, ScrollArea, Ui};

use crate::data::aggregate::render;
use crate::state::AppState;
use crate::ui::{metrics, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selections ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table, charts, metrics ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &mut self.state));
        });
    }
}

/// Everything below the menu bar, recomputed from dataset + selection on
/// every frame.
fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let dataset = Arc::clone(&state.dataset);
    let selection = state.selection.clone();
    let outputs = render(&dataset, &selection);

    ui.heading("🌊 Water Quality Dashboard");
    ui.label(
        "Monitor and analyze water quality parameters collected by the BlueShield USV. \
         Explore the samples by water supply scheme and parameter.",
    );
    ui.add_space(8.0);

    if dataset.is_empty() {
        ui.weak("The data file has a header but no samples.");
        return;
    }

    ui.heading("Filtered Data Overview");
    ui.separator();
    ui.label("Below is the filtered dataset based on your selections:");
    table::filtered_table(ui, dataset.columns(), &outputs.view);
    ui.add_space(4.0);
    table::download_button(ui, state);
    ui.add_space(12.0);

    for series in &outputs.series {
        plot::parameter_chart(
            ui,
            series,
            &state.config.columns.sample,
            state.colors.color_for(series.parameter),
        );
        ui.add_space(8.0);
    }

    ui.heading("Summary Metrics by Location");
    ui.separator();
    metrics::summary_metrics(
        ui,
        &outputs.metrics,
        &selection.schemes,
        state.config.max_metric_columns,
    );
}
