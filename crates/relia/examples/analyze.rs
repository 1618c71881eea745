//! Example: Analyze a failure-data workbook with Relia.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>
//!
//! Example:
//!   cargo run --example analyze -- failure_data_new.xlsx

use std::env;
use std::path::Path;

use relia::{Relia, Severity};

fn main() -> relia::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    if !Path::new(file_path).exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(72);
    println!("{}", separator);
    println!("Relia Analysis: {}", file_path);
    println!("{}", separator);
    println!();

    let relia = Relia::new();
    let report = relia.analyze(file_path)?;
    let unit = report.reliability.unit.label();

    println!("## Source");
    println!("  File: {}", report.source.file);
    println!("  Sheet: {} ({} sheets in workbook)", report.source.sheet, report.source.sheet_count);
    println!("  Rows: {}", report.source.row_count);
    println!();

    println!("## Failure Analysis");
    println!("  Total Failures: {}", report.reliability.num_failures);
    println!("  Total Op. Time ({unit}): {:.2}", report.reliability.total_operating_time);
    println!("  MTTF ({unit}): {:.2}", report.reliability.mttf);
    println!("  Failure Rate: {:.6}", report.reliability.failure_rate);
    println!();

    println!("## Repair Analysis");
    println!("  Total Repairs: {}", report.reliability.num_repairs);
    println!("  MTTR ({unit}): {:.2}", report.reliability.mttr);
    println!("  Repair Rate: {:.6}", report.reliability.repair_rate);
    println!();

    println!("## Cost Summary ({} sheets)", report.costs.rows.len());
    for row in &report.costs.rows {
        println!(
            "  {:20} {:>12.2} {:>12.2}  {}",
            row.sheet,
            row.all_cost,
            row.exclude_maintenance,
            row.status.label()
        );
    }
    println!(
        "  {:20} {:>12.2} {:>12.2}",
        "GRAND TOTAL", report.costs.grand_total.all_cost, report.costs.grand_total.exclude_maintenance
    );
    println!();

    if let Some(risk) = &report.risk {
        println!("## Risk");
        println!("  Current: {:.1} ({})", risk.current_risk, risk.health.label());
        println!("  Average: {:.1}", risk.avg_risk);
        if let Some(forecast) = &risk.forecast {
            println!(
                "  Next failure in ~{:.0} records ({:.0}% confidence)",
                forecast.estimated_records_until_next_failure, forecast.confidence
            );
        }
        println!();
    }

    let warnings: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.severity >= Severity::Warning)
        .collect();
    if !warnings.is_empty() {
        println!("## Warnings ({})", warnings.len());
        for diag in warnings {
            println!("  [{}] {}", diag.severity.label(), diag.message);
        }
        println!();
    }

    println!("Recommendation: {}", report.summary.recommendation);
    println!("{}", separator);

    Ok(())
}
