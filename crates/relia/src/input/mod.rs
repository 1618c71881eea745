//! Workbook input: parsing and sheet access.

mod source;
mod workbook;

pub use source::{EventTable, SourceMetadata};
pub use workbook::{CsvWorkbook, ExcelWorkbook, MemorySheets, SheetReader, open_workbook};
