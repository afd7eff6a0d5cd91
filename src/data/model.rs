use std::fmt;

use serde::{Deserialize, Serialize};

use super::filter::distinct_schemes;

// ---------------------------------------------------------------------------
// Parameter – the fixed set of measured quantities
// ---------------------------------------------------------------------------

/// A measured water-quality parameter.
///
/// The set is closed: every dataset must carry a numeric column for each of
/// these, named exactly as [`Parameter::column`] returns (case-sensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Parameter {
    #[serde(rename = "EC")]
    Ec,
    #[serde(rename = "pH")]
    Ph,
    Turbidity,
    #[serde(rename = "TDS")]
    Tds,
    Fe,
    As,
    Na,
    K,
}

impl Parameter {
    pub const COUNT: usize = 8;

    /// All parameters in their canonical option order.
    pub const ALL: [Parameter; Parameter::COUNT] = [
        Parameter::Ec,
        Parameter::Ph,
        Parameter::Turbidity,
        Parameter::Tds,
        Parameter::Fe,
        Parameter::As,
        Parameter::Na,
        Parameter::K,
    ];

    /// Parameters charted before the user changes anything.
    pub const DEFAULTS: [Parameter; 3] = [Parameter::Ec, Parameter::Ph, Parameter::Turbidity];

    /// Source column name.
    pub fn column(self) -> &'static str {
        match self {
            Parameter::Ec => "EC",
            Parameter::Ph => "pH",
            Parameter::Turbidity => "Turbidity",
            Parameter::Tds => "TDS",
            Parameter::Fe => "Fe",
            Parameter::As => "As",
            Parameter::Na => "Na",
            Parameter::K => "K",
        }
    }

    /// Position in [`Parameter::ALL`], used to index [`Record::values`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// ColumnNames – where the two key columns live in the source
// ---------------------------------------------------------------------------

/// Header names of the scheme and sample-identifier columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub scheme: String,
    pub sample: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            scheme: "Water_Supply_Scheme".to_string(),
            sample: "Sample_Code".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single water sample (one row of the source file).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Water supply scheme; `None` when the cell was empty or a null token.
    pub scheme: Option<String>,
    /// Sample identifier, used as the chart x-axis key.
    pub sample_id: String,
    /// Parameter values indexed by [`Parameter::index`].
    pub values: [Option<f64>; Parameter::COUNT],
    /// Original cell text in source column order, kept for export.
    pub cells: Vec<String>,
}

impl Record {
    pub fn value(&self, parameter: Parameter) -> Option<f64> {
        self.values[parameter.index()]
    }
}

// ---------------------------------------------------------------------------
// WaterQualityDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built; share it through an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterQualityDataset {
    columns: Vec<String>,
    records: Vec<Record>,
    schemes: Vec<String>,
}

impl WaterQualityDataset {
    /// Build the dataset and index its distinct schemes.
    pub fn from_records(columns: Vec<String>, records: Vec<Record>) -> Self {
        let schemes = distinct_schemes(&records);
        Self {
            columns,
            records,
            schemes,
        }
    }

    /// Source header, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Non-null distinct schemes in first-occurrence order.
    pub fn schemes(&self) -> &[String] {
        &self.schemes
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
