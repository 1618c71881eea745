//! Subcommand implementations.

pub mod analyze;
pub mod cost;
pub mod risk;
pub mod sheets;

use colored::Colorize;
use relia::{Diagnostic, Severity};

/// Print diagnostics colored by severity.
pub(crate) fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        let label = match diag.severity {
            Severity::Info => diag.severity.label().blue(),
            Severity::Warning => diag.severity.label().yellow(),
            Severity::Error => diag.severity.label().red(),
        };
        println!("  [{}] {}", label, diag.message);
    }
}
