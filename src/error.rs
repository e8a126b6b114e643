use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while loading or interpreting the input tables.
///
/// Empty filter results and undefined ratios are not errors: the first is
/// logged and still rendered, the second is carried as `None`.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid Games identifier: {0}")]
    InvalidGames(String),

    #[error("Invalid medal: {0}")]
    InvalidMedal(String),

    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
