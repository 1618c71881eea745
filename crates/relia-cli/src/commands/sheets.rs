//! Sheets command - workbook inventory.

use std::path::PathBuf;

use colored::Colorize;
use relia::SheetReader;

pub fn run(file: PathBuf, skip_rows: usize, _verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut reader = relia::open_workbook(&file, skip_rows)?;
    let names = reader.sheet_names();

    println!(
        "{} sheets in {}",
        names.len().to_string().white().bold(),
        file.display().to_string().white()
    );

    for name in names {
        match reader.read_sheet(&name) {
            Ok(table) => println!(
                "  {:24} {} rows x {} columns",
                name.white().bold(),
                table.row_count(),
                table.column_count()
            ),
            Err(e) => println!("  {:24} {}", name.white().bold(), format!("unreadable: {e}").red()),
        }
    }

    Ok(())
}
