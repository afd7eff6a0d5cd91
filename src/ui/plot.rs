use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::data::aggregate::Series;

// ---------------------------------------------------------------------------
// Per-parameter line chart
// ---------------------------------------------------------------------------

/// Draw one parameter over the filtered samples.
///
/// The x axis is the sample's position in the view, labelled with its sample
/// identifier; absent readings break the line.
pub fn parameter_chart(ui: &mut Ui, series: &Series<'_>, sample_axis: &str, color: Color32) {
    ui.heading(format!("{} Over Samples", series.parameter));

    if series.points.is_empty() {
        ui.weak("No samples match the current selection.");
        return;
    }

    let labels: Vec<String> = series.points.iter().map(|p| p.sample_id.to_string()).collect();
    let name = series.parameter.to_string();

    Plot::new(("parameter_chart", series.parameter))
        .height(220.0)
        .legend(Legend::default())
        .x_axis_label(sample_axis)
        .y_axis_label(name.as_str())
        .x_axis_formatter(move |mark, _range| {
            let x = mark.value;
            if x.fract() != 0.0 || x < 0.0 {
                return String::new();
            }
            labels.get(x as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for run in series.segments() {
                plot_ui.points(
                    Points::new(PlotPoints::from(run.clone()))
                        .name(&name)
                        .color(color)
                        .radius(2.5),
                );
                plot_ui.line(
                    Line::new(PlotPoints::from(run))
                        .name(&name)
                        .color(color)
                        .width(1.5),
                );
            }
        });
}
