//! Cost command - multi-sheet cost reconciliation.

use colored::Colorize;
use relia::{CostSummary, Relia, SheetStatus};

use crate::cli::AnalysisArgs;

pub fn run(args: AnalysisArgs, json: bool, _verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let relia = Relia::with_config(args.to_config());
    let report = relia.analyze(&args.file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.costs)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Cost summary for".cyan().bold(),
        args.file.display().to_string().white()
    );
    println!();
    print_summary(&report.costs);

    Ok(())
}

/// Print the sheet-wise breakdown and grand totals.
pub(crate) fn print_summary(costs: &CostSummary) {
    println!("{}", "Multi-Sheet Cost Summary".cyan().bold());
    println!(
        "  {:20} {:>14} {:>16}  {}",
        "Sheet", "All Cost", "Excl. MAINT.", "Status"
    );

    for row in &costs.rows {
        let status = match &row.status {
            SheetStatus::Success => row.status.label().green().to_string(),
            SheetStatus::MissingCostColumn => row.status.label().yellow().to_string(),
            SheetStatus::ReadError { message } => format!("{}: {}", "Error".red(), message),
        };
        println!(
            "  {:20} {:>14.2} {:>16.2}  {}",
            row.sheet, row.all_cost, row.exclude_maintenance, status
        );
    }

    println!(
        "  {:20} {:>14.2} {:>16.2}",
        "GRAND TOTAL".white().bold(),
        costs.grand_total.all_cost,
        costs.grand_total.exclude_maintenance
    );
}
