//! Event tables and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the analyzed workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (xlsx, xls, csv, memory).
    pub format: String,
    /// The sheet the reliability analysis ran on.
    pub sheet: String,
    /// Number of sheets in the workbook.
    pub sheet_count: usize,
    /// Number of data rows in the analyzed sheet (excluding header).
    pub row_count: usize,
    /// Number of columns in the analyzed sheet.
    pub column_count: usize,
    /// When the analysis was performed.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file-backed workbook.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        sheet: String,
        sheet_count: usize,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            sheet,
            sheet_count,
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }

    /// Create metadata for an in-memory sheet source.
    pub fn in_memory(sheet: &str, sheet_count: usize, row_count: usize, column_count: usize) -> Self {
        Self {
            file: String::new(),
            path: PathBuf::new(),
            hash: String::new(),
            size_bytes: 0,
            format: "memory".to_string(),
            sheet: sheet.to_string(),
            sheet_count,
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }
}

/// One sheet of failure/repair events.
///
/// Records stay in their original row order; the row index doubles as the
/// time axis for rolling windows and failure intervals. The engine never
/// merges or reorders records.
#[derive(Debug, Clone, PartialEq)]
pub struct EventTable {
    /// Column headers, whitespace-trimmed.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl EventTable {
    /// Create a new event table. Header whitespace is trimmed.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers.into_iter().map(|h| h.trim().to_string()).collect();
        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find the position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Coerce a column to numbers; every cell that fails coercion is 0.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| Self::coerce_numeric(row.get(index).map(|s| s.as_str()).unwrap_or("")))
                .collect(),
        )
    }

    /// Coerce one cell to a number. Non-numeric and non-finite values
    /// become 0 rather than an error.
    pub fn coerce_numeric(cell: &str) -> f64 {
        let parsed = cell.trim().parse::<f64>().unwrap_or(0.0);
        if parsed.is_finite() { parsed } else { 0.0 }
    }
}
