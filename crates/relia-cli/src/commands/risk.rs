//! Risk command - risk scoring and next-failure forecast.

use colored::Colorize;
use relia::{HealthStatus, Relia, RiskProfile};

use crate::cli::AnalysisArgs;

pub fn run(args: AnalysisArgs, json: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let relia = Relia::with_config(args.to_config());
    let report = relia.analyze(&args.file)?;

    let Some(risk) = &report.risk else {
        return Err(format!(
            "Not enough records for risk scoring ({} found, 10 required)",
            report.source.row_count
        )
        .into());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(risk)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Risk profile for".cyan().bold(),
        args.file.display().to_string().white()
    );
    println!();
    print_profile(risk, verbose);

    Ok(())
}

/// Print the risk summary, forecast, and optionally every record.
pub(crate) fn print_profile(risk: &RiskProfile, verbose: bool) {
    println!("{}", "Risk Analysis".cyan().bold());

    let health = match risk.health {
        HealthStatus::Good => risk.health.label().green(),
        HealthStatus::Warning => risk.health.label().yellow(),
        HealthStatus::Critical => risk.health.label().red(),
    };
    println!("  Current Risk      {:.1} ({})", risk.current_risk, health);
    println!("  Average Risk      {:.1}", risk.avg_risk);
    println!("  Recent Failures   {} (last 10 records)", risk.recent_failures);

    if let Some(forecast) = &risk.forecast {
        println!(
            "  Next Failure      ~{:.0} records (avg interval {:.1}, confidence {:.0}%)",
            forecast.estimated_records_until_next_failure,
            forecast.avg_interval,
            forecast.confidence
        );
    } else {
        println!("  Next Failure      not enough failure history to forecast");
    }

    if risk.alert {
        println!(
            "  {}",
            "ALERT: failure expected within 5 records while risk exceeds 60"
                .red()
                .bold()
        );
    }

    if verbose {
        println!();
        println!("  {:>6} {:>10} {:>10} {:>6} {:>7}", "record", "downtime", "avg", "freq", "score");
        for point in &risk.points {
            println!(
                "  {:>6} {:>10.1} {:>10.1} {:>6} {:>7.1}",
                point.index, point.downtime, point.avg_downtime, point.failure_frequency, point.score
            );
        }
    }
}
