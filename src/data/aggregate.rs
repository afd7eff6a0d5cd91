use super::filter::{filter_by_scheme, FilteredView, Selection};
use super::model::{Parameter, WaterQualityDataset};

// ---------------------------------------------------------------------------
// Series: one line chart's worth of points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint<'a> {
    pub sample_id: &'a str,
    /// `None` where the sample has no reading; charts show a gap.
    pub value: Option<f64>,
}

/// Values of one parameter across a view, keyed by sample identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<'a> {
    pub parameter: Parameter,
    pub points: Vec<SeriesPoint<'a>>,
}

impl Series<'_> {
    /// Maximal runs of consecutive present values as `[position, value]`
    /// pairs, where position is the point's index in the series.
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut runs = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();
        for (i, point) in self.points.iter().enumerate() {
            match point.value {
                Some(v) => current.push([i as f64, v]),
                None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}

/// One point per row of the view, in view order; absent values pass through.
pub fn build_series<'a>(view: &FilteredView<'a>, parameter: Parameter) -> Series<'a> {
    let points = view
        .iter()
        .map(|r| SeriesPoint {
            sample_id: r.sample_id.as_str(),
            value: r.value(parameter),
        })
        .collect();
    Series { parameter, points }
}

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Mean of `parameter` over the rows of `scheme`, skipping absent values.
///
/// `None` when no row of that scheme has a reading.
pub fn compute_mean(view: &FilteredView<'_>, scheme: &str, parameter: Parameter) -> Option<f64> {
    let (sum, count) = view
        .iter()
        .filter(|r| r.scheme.as_deref() == Some(scheme))
        .filter_map(|r| r.value(parameter))
        .fold((0.0_f64, 0_usize), |(sum, n), v| (sum + v, n + 1));

    (count > 0).then(|| sum / count as f64)
}

/// Average of one parameter within one scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetric {
    pub scheme: String,
    pub parameter: Parameter,
    pub mean: Option<f64>,
}

impl SummaryMetric {
    pub fn label(&self) -> String {
        format!("{} - Avg {}", self.scheme, self.parameter)
    }

    /// Two decimals; an undefined mean shows as `nan`.
    pub fn display_value(&self) -> String {
        match self.mean {
            Some(v) => format!("{v:.2}"),
            None => "nan".to_string(),
        }
    }
}

/// Metrics for every (scheme, parameter) pair: schemes outer, parameters
/// inner, both in selection order.
pub fn summary_metrics(
    view: &FilteredView<'_>,
    schemes: &[String],
    parameters: &[Parameter],
) -> Vec<SummaryMetric> {
    schemes
        .iter()
        .flat_map(|scheme| {
            parameters.iter().map(move |&parameter| SummaryMetric {
                scheme: scheme.clone(),
                parameter,
                mean: compute_mean(view, scheme, parameter),
            })
        })
        .collect()
}

/// Distribute metrics into display columns, one per scheme.
///
/// With a cap of `Some(n)` at most `n` columns are used and scheme `i` lands
/// in column `i % column_count`. No schemes means no columns.
pub fn metric_columns<'m>(
    metrics: &'m [SummaryMetric],
    schemes: &[String],
    max_columns: Option<usize>,
) -> Vec<Vec<&'m SummaryMetric>> {
    let column_count = match max_columns {
        Some(cap) => schemes.len().min(cap.max(1)),
        None => schemes.len(),
    };
    if column_count == 0 {
        return Vec::new();
    }

    let mut columns: Vec<Vec<&SummaryMetric>> = vec![Vec::new(); column_count];
    for (i, scheme) in schemes.iter().enumerate() {
        columns[i % column_count].extend(metrics.iter().filter(|m| &m.scheme == scheme));
    }
    columns
}

// ---------------------------------------------------------------------------
// One full pass of the pipeline
// ---------------------------------------------------------------------------

/// Everything a frame needs to draw, derived from dataset + selection.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOutputs<'a> {
    pub view: FilteredView<'a>,
    pub series: Vec<Series<'a>>,
    pub metrics: Vec<SummaryMetric>,
}

/// Filter, then build one series per selected parameter and the summary
/// metrics. Pure; the dataset is only read.
pub fn render<'a>(dataset: &'a WaterQualityDataset, selection: &Selection) -> RenderedOutputs<'a> {
    let view = filter_by_scheme(dataset.records(), &selection.schemes);
    let series = selection
        .parameters
        .iter()
        .map(|&p| build_series(&view, p))
        .collect();
    let metrics = summary_metrics(&view, &selection.schemes, &selection.parameters);

    RenderedOutputs {
        view,
        series,
        metrics,
    }
}
