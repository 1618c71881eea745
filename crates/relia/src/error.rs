//! Error types for the relia library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for relia operations.
#[derive(Debug, Error)]
pub enum ReliaError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workbook could not be opened or a sheet could not be read.
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// A requested sheet does not exist in the workbook.
    #[error("Sheet not found: '{0}'")]
    SheetNotFound(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty workbook, sheet, or column structure.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for relia operations.
pub type Result<T> = std::result::Result<T, ReliaError>;
