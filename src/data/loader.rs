use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::DataError;
use super::model::{ColumnNames, Parameter, Record, WaterQualityDataset};

/// Cell contents treated as a missing value (the usual dataframe defaults).
const NULL_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "-NaN", "null", "NULL", "None", "<NA>",
    "#N/A", "#NA", "#N/A N/A", "-1.#IND", "1.#IND", "-1.#QNAN", "1.#QNAN",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a water-quality dataset from a delimited file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` / no extension – comma separated
/// * `.tsv`                         – tab separated
pub fn load_file(path: &Path, columns: &ColumnNames) -> Result<WaterQualityDataset, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let delimiter = match ext.as_str() {
        "csv" | "txt" | "" => b',',
        "tsv" => b'\t',
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };

    let file = File::open(path).map_err(|e| DataError::io(path, e))?;
    let dataset = read_delimited(file, delimiter, columns)?;

    log::info!(
        "Loaded {} samples across {} schemes from {}",
        dataset.len(),
        dataset.schemes().len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse delimited text with a header row into a dataset.
///
/// The scheme column, the sample column and all eight parameter columns must
/// be present; any other columns are carried through untouched.
pub fn read_delimited<R: Read>(
    reader: R,
    delimiter: u8,
    columns: &ColumnNames,
) -> Result<WaterQualityDataset, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let layout = ColumnLayout::resolve(&headers, columns)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();

        let scheme = non_null(&cells[layout.scheme]).map(str::to_string);
        let sample_id = cells[layout.sample].clone();

        // Header is line 1; quoted cells may span lines.
        let line = row.position().map_or(row_no + 2, |pos| pos.line() as usize);
        let mut values = [None; Parameter::COUNT];
        for p in Parameter::ALL {
            values[p.index()] = parse_measurement(&cells[layout.parameters[p.index()]], line, p)?;
        }

        records.push(Record {
            scheme,
            sample_id,
            values,
            cells,
        });
    }

    log::debug!("Parsed {} rows with header {:?}", records.len(), headers);
    Ok(WaterQualityDataset::from_records(headers, records))
}

/// Column positions of everything the pipeline reads, checked once per file.
struct ColumnLayout {
    scheme: usize,
    sample: usize,
    parameters: [usize; Parameter::COUNT],
}

impl ColumnLayout {
    fn resolve(headers: &[String], columns: &ColumnNames) -> Result<Self, DataError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };

        let scheme = find(&columns.scheme)?;
        let sample = find(&columns.sample)?;
        let mut parameters = [0; Parameter::COUNT];
        for p in Parameter::ALL {
            parameters[p.index()] = find(p.column())?;
        }

        Ok(Self {
            scheme,
            sample,
            parameters,
        })
    }
}

fn non_null(cell: &str) -> Option<&str> {
    let trimmed = cell.trim();
    if NULL_TOKENS.contains(&trimmed) {
        None
    } else {
        Some(trimmed)
    }
}

/// Any NaN spelling `f64::from_str` accepts counts as absent, not as a reading.
fn parse_measurement(cell: &str, line: usize, parameter: Parameter) -> Result<Option<f64>, DataError> {
    let Some(text) = non_null(cell) else {
        return Ok(None);
    };
    match text.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(DataError::InvalidNumber {
            line,
            column: parameter.column().to_string(),
            value: text.to_string(),
        }),
    }
}
