use eframe::egui::{RichText, Ui};

use crate::data::aggregate::{metric_columns, SummaryMetric};

/// Summary metrics grouped by scheme into columns.
pub fn summary_metrics(
    ui: &mut Ui,
    metrics: &[SummaryMetric],
    schemes: &[String],
    max_columns: Option<usize>,
) {
    let columns = metric_columns(metrics, schemes, max_columns);
    if columns.is_empty() {
        ui.weak("No water supply schemes selected.");
        return;
    }

    ui.columns(columns.len(), |cols: &mut [Ui]| {
        for (ui, column) in cols.iter_mut().zip(&columns) {
            for metric in column {
                metric_card(ui, metric);
            }
        }
    });
}

fn metric_card(ui: &mut Ui, metric: &SummaryMetric) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(metric.label()).small().weak());
        ui.label(RichText::new(metric.display_value()).size(22.0).strong());
    });
    ui.add_space(4.0);
}
