//! Workbook access: sheet inventory and per-sheet reads.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use calamine::{open_workbook_auto, Reader, Sheets};

use super::source::EventTable;
use crate::error::{ReliaError, Result};

/// Delimiters tried when sniffing a delimited text file.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Sheet-level access to a tabular source.
///
/// Sheets are read one at a time so that an unreadable sheet fails in
/// isolation instead of taking the whole workbook down with it.
pub trait SheetReader {
    /// The sheet names, in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Read one sheet into an event table.
    fn read_sheet(&mut self, name: &str) -> Result<EventTable>;
}

/// Excel workbook (.xlsx/.xls) backed by calamine.
pub struct ExcelWorkbook {
    workbook: Sheets<BufReader<File>>,
    skip_rows: usize,
}

impl ExcelWorkbook {
    /// Open a workbook file. `skip_rows` title rows are discarded before
    /// the header row of every sheet.
    pub fn open(path: impl AsRef<Path>, skip_rows: usize) -> Result<Self> {
        let workbook = open_workbook_auto(path.as_ref())
            .map_err(|e| ReliaError::Workbook(e.to_string()))?;
        Ok(Self { workbook, skip_rows })
    }
}

impl SheetReader for ExcelWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    fn read_sheet(&mut self, name: &str) -> Result<EventTable> {
        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| ReliaError::Workbook(e.to_string()))?;

        let mut rows = range.rows().skip(self.skip_rows);
        let header_row = rows
            .next()
            .ok_or_else(|| ReliaError::EmptyData(format!("sheet '{name}' has no header row")))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let width = headers.len();
        let data: Vec<Vec<String>> = rows
            .map(|row| {
                let mut cells: Vec<String> = row
                    .iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect();
                cells.resize(width, String::new());
                cells
            })
            .collect();

        Ok(EventTable::new(headers, data))
    }
}

/// A delimited text file presented as a single-sheet workbook.
///
/// The sheet is named after the file stem. The delimiter is sniffed from
/// the first lines when it is not a plain comma.
pub struct CsvWorkbook {
    name: String,
    table: EventTable,
}

impl CsvWorkbook {
    /// Open and parse a delimited file. `skip_rows` title lines are
    /// discarded before the header line.
    pub fn open(path: impl AsRef<Path>, skip_rows: usize) -> Result<Self> {
        let path = path.as_ref();
        let mut contents = String::new();
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut contents))
            .map_err(|e| ReliaError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut remainder = contents.as_str();
        for _ in 0..skip_rows {
            match remainder.split_once('\n') {
                Some((_, rest)) => remainder = rest,
                None => {
                    remainder = "";
                    break;
                }
            }
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(detect_delimiter(remainder))
            .has_headers(true)
            .flexible(true)
            .from_reader(remainder.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        if headers.is_empty() {
            return Err(ReliaError::EmptyData("no columns found".to_string()));
        }

        let width = headers.len();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut cells: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();
            cells.resize(width, String::new());
            rows.push(cells);
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Sheet1".to_string());

        Ok(Self {
            name,
            table: EventTable::new(headers, rows),
        })
    }
}

impl SheetReader for CsvWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn read_sheet(&mut self, name: &str) -> Result<EventTable> {
        if name == self.name {
            Ok(self.table.clone())
        } else {
            Err(ReliaError::SheetNotFound(name.to_string()))
        }
    }
}

/// In-memory sheet collection, for embedding and tests.
///
/// A sheet registered with [`MemorySheets::with_failing_sheet`] fails on
/// read, which is how per-sheet error isolation is exercised without a
/// corrupt file on disk.
#[derive(Debug, Clone, Default)]
pub struct MemorySheets {
    sheets: Vec<(String, std::result::Result<EventTable, String>)>,
}

impl MemorySheets {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a readable sheet.
    pub fn with_sheet(mut self, name: impl Into<String>, table: EventTable) -> Self {
        self.sheets.push((name.into(), Ok(table)));
        self
    }

    /// Add a sheet whose read fails with the given message.
    pub fn with_failing_sheet(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.sheets.push((name.into(), Err(message.into())));
        self
    }
}

impl SheetReader for MemorySheets {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<EventTable> {
        match self.sheets.iter().find(|(n, _)| n == name) {
            Some((_, Ok(table))) => Ok(table.clone()),
            Some((_, Err(message))) => Err(ReliaError::Workbook(message.clone())),
            None => Err(ReliaError::SheetNotFound(name.to_string())),
        }
    }
}

/// Open a workbook file, choosing the backend by extension.
pub fn open_workbook(path: impl AsRef<Path>, skip_rows: usize) -> Result<Box<dyn SheetReader>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReliaError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" => Ok(Box::new(ExcelWorkbook::open(path, skip_rows)?)),
        "csv" | "tsv" | "txt" => Ok(Box::new(CsvWorkbook::open(path, skip_rows)?)),
        other => Err(ReliaError::UnsupportedFormat(other.to_string())),
    }
}

/// Pick the delimiter whose per-line count is consistent across the first
/// non-empty lines. Tab gets a slight bonus over comma on a tie.
fn detect_delimiter(text: &str) -> u8 {
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(10)
        .collect();

    let mut best = b',';
    let mut best_score = 0usize;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| line.matches(delim as char).count())
            .collect();

        let Some(&first) = counts.first() else { continue };
        if first == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first);
        let score = if consistent {
            first * 1000 + usize::from(delim == b'\t') * 100
        } else {
            first
        };

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}
