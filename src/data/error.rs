use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, validating or exporting water-quality data.
///
/// All of these are structural: the pipeline itself never fails once a
/// dataset has been loaded.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited data: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// `line` is the 1-based line in the source file, header included.
    #[error("line {line}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}
