//! Analyze command - full dashboard for one workbook.

use std::path::PathBuf;

use colored::Colorize;
use relia::Relia;

use crate::cli::AnalysisArgs;
use crate::commands::print_diagnostics;

pub fn run(
    args: AnalysisArgs,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        args.file.display().to_string().white()
    );

    let relia = Relia::with_config(args.to_config());
    let report = relia.analyze(&args.file)?;
    let unit = report.reliability.unit.label();

    println!(
        "Sheet {} ({} records, {} sheets in workbook)",
        report.source.sheet.white().bold(),
        report.source.row_count,
        report.source.sheet_count
    );

    if verbose {
        println!();
        println!("{}", "Column bindings:".yellow().bold());
        println!("  {:12} {}", "downtime", report.bindings.downtime);
        println!("  {:12} {}", "repair", report.bindings.repair_time);
        println!(
            "  {:12} {}",
            "department",
            report.bindings.department.as_deref().unwrap_or("(none)")
        );
        println!(
            "  {:12} {}",
            "cost",
            report.bindings.cost.as_deref().unwrap_or("(none)")
        );
    }

    println!();
    println!("{}", "Failure Rate Analysis".cyan().bold());
    println!(
        "  Total Failures          {}",
        report.reliability.num_failures.to_string().white().bold()
    );
    println!(
        "  Total Op. Time ({:7}) {:.2}",
        unit, report.reliability.total_operating_time
    );
    println!("  MTTF ({:7})           {:.2}", unit, report.reliability.mttf);
    println!("  Failure Rate            {:.6}", report.reliability.failure_rate);

    println!();
    println!("{}", "Repair Rate Analysis".cyan().bold());
    println!(
        "  Total Repairs           {}",
        report.reliability.num_repairs.to_string().white().bold()
    );
    println!(
        "  Total Repair Time ({:4}) {:.2}",
        unit, report.reliability.total_repair_time
    );
    println!("  MTTR ({:7})           {:.2}", unit, report.reliability.mttr);
    println!("  Repair Rate             {:.6}", report.reliability.repair_rate);

    if let Some(reasons) = &report.reasons {
        println!();
        println!("{}", "Failure Reasons".cyan().bold());
        for (reason, count) in &reasons.counts {
            println!("  {:40} {}", reason, count);
        }
    }

    println!();
    crate::commands::cost::print_summary(&report.costs);

    if let Some(risk) = &report.risk {
        println!();
        crate::commands::risk::print_profile(risk, verbose);
    }

    if !report.diagnostics.is_empty() {
        println!();
        println!("{}", "Diagnostics".cyan().bold());
        print_diagnostics(&report.diagnostics);
    }

    println!();
    println!("Recommendation: {}", report.summary.recommendation.white().bold());

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)?;
        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}
