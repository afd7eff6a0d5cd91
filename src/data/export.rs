use std::io::Write;
use std::path::Path;

use super::error::DataError;
use super::filter::FilteredView;

/// Suggested name for the filtered-data download.
pub const EXPORT_FILE_NAME: &str = "filtered_water_quality_data.csv";

/// Media type of the exported file.
pub const EXPORT_MIME: &str = "text/csv";

/// Write the view as comma-separated text: the source header, then each
/// row's original cells in view order. No index column.
pub fn write_csv<W: Write>(
    writer: W,
    columns: &[String],
    view: &FilteredView<'_>,
) -> Result<(), DataError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(columns)?;
    for record in view.iter() {
        out.write_record(&record.cells)?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn to_csv_bytes(columns: &[String], view: &FilteredView<'_>) -> Result<Vec<u8>, DataError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, columns, view)?;
    Ok(buf)
}

pub fn write_csv_file(
    path: &Path,
    columns: &[String],
    view: &FilteredView<'_>,
) -> Result<(), DataError> {
    let bytes = to_csv_bytes(columns, view)?;
    std::fs::write(path, bytes).map_err(|e| DataError::io(path, e))?;
    log::info!(
        "Exported {} rows as {EXPORT_MIME} to {}",
        view.len(),
        path.display()
    );
    Ok(())
}
