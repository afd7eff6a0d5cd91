use std::collections::HashSet;

use super::model::{Parameter, Record, WaterQualityDataset};

// ---------------------------------------------------------------------------
// Selection: which schemes and parameters the user picked
// ---------------------------------------------------------------------------

/// User-chosen schemes and parameters, both in selection order.
///
/// Ticking an entry appends it, unticking removes it without disturbing the
/// rest, so downstream charts and metrics follow the order the user built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub schemes: Vec<String>,
    pub parameters: Vec<Parameter>,
}

impl Selection {
    /// First `scheme_count` distinct schemes (fewer if the dataset has fewer)
    /// and the given default parameters.
    pub fn defaults(
        dataset: &WaterQualityDataset,
        scheme_count: usize,
        parameters: &[Parameter],
    ) -> Self {
        let mut selection = Self {
            schemes: dataset.schemes().iter().take(scheme_count).cloned().collect(),
            parameters: Vec::with_capacity(parameters.len()),
        };
        for &p in parameters {
            if !selection.parameters.contains(&p) {
                selection.parameters.push(p);
            }
        }
        selection
    }

    pub fn contains_scheme(&self, scheme: &str) -> bool {
        self.schemes.iter().any(|s| s == scheme)
    }

    pub fn contains_parameter(&self, parameter: Parameter) -> bool {
        self.parameters.contains(&parameter)
    }

    /// Add the scheme at the end of the selection, or remove it if present.
    pub fn toggle_scheme(&mut self, scheme: &str) {
        if let Some(pos) = self.schemes.iter().position(|s| s == scheme) {
            self.schemes.remove(pos);
        } else {
            self.schemes.push(scheme.to_string());
        }
    }

    /// Add the parameter at the end of the selection, or remove it if present.
    pub fn toggle_parameter(&mut self, parameter: Parameter) {
        if let Some(pos) = self.parameters.iter().position(|&p| p == parameter) {
            self.parameters.remove(pos);
        } else {
            self.parameters.push(parameter);
        }
    }

    /// Append every scheme of the dataset not already selected.
    pub fn select_all_schemes(&mut self, dataset: &WaterQualityDataset) {
        for scheme in dataset.schemes() {
            if !self.contains_scheme(scheme) {
                self.schemes.push(scheme.clone());
            }
        }
    }

    pub fn clear_schemes(&mut self) {
        self.schemes.clear();
    }

    /// Append every parameter not already selected.
    pub fn select_all_parameters(&mut self) {
        for p in Parameter::ALL {
            if !self.contains_parameter(p) {
                self.parameters.push(p);
            }
        }
    }

    pub fn clear_parameters(&mut self) {
        self.parameters.clear();
    }

    /// Drop schemes the dataset no longer contains, keeping the order of the rest.
    pub fn retain_known(&mut self, dataset: &WaterQualityDataset) {
        let known: HashSet<&str> = dataset.schemes().iter().map(String::as_str).collect();
        self.schemes.retain(|s| known.contains(s.as_str()));
    }
}

// ---------------------------------------------------------------------------
// FilteredView: the rows matching the scheme selection
// ---------------------------------------------------------------------------

/// Records of a dataset whose scheme is selected, in source order.
///
/// Borrows rows from the dataset; it is rebuilt for every render and never
/// outlives the dataset it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Non-null distinct schemes in first-occurrence order.
pub fn distinct_schemes<'a, I>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ordered = Vec::new();
    for scheme in rows.into_iter().filter_map(|r| r.scheme.as_deref()) {
        if seen.insert(scheme) {
            ordered.push(scheme.to_string());
        }
    }
    ordered
}

/// Keep the rows whose scheme is in `selected`, preserving order.
///
/// Works on a dataset's records or on an existing view. An empty selection
/// gives an empty view; rows without a scheme never match.
pub fn filter_by_scheme<'a, I>(rows: I, selected: &[String]) -> FilteredView<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    if selected.is_empty() {
        return FilteredView::default();
    }
    let wanted: HashSet<&str> = selected.iter().map(String::as_str).collect();
    let rows = rows
        .into_iter()
        .filter(|r| r.scheme.as_deref().is_some_and(|s| wanted.contains(s)))
        .collect();
    FilteredView { rows }
}
