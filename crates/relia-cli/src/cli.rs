//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use relia::{AnalysisSettings, BindingOverrides, ReliaConfig, TimeUnit};

/// Relia: reliability and failure analytics for spreadsheet data
#[derive(Parser)]
#[command(name = "relia")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by the analysis subcommands.
#[derive(Args, Clone)]
pub struct AnalysisArgs {
    /// Path to the workbook (.xlsx/.xls/.csv)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Sheet to analyze (default: first sheet)
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Title rows to discard before the header row
    #[arg(long, default_value = "0")]
    pub skip_rows: usize,

    /// Observation period in minutes per record
    #[arg(short, long, default_value = "1440")]
    pub period: f64,

    /// Display unit for durations (minutes or hours)
    #[arg(short, long, default_value = "hours")]
    pub unit: TimeUnit,

    /// Downtime column name (default: fuzzy match)
    #[arg(long, value_name = "COLUMN")]
    pub downtime_col: Option<String>,

    /// Repair-time column name (default: the downtime column)
    #[arg(long, value_name = "COLUMN")]
    pub repair_col: Option<String>,

    /// Department column name (default: fuzzy match)
    #[arg(long, value_name = "COLUMN")]
    pub department_col: Option<String>,

    /// Cost column name (default: fuzzy match)
    #[arg(long, value_name = "COLUMN")]
    pub cost_col: Option<String>,
}

impl AnalysisArgs {
    /// Build the engine configuration from the common options.
    pub fn to_config(&self) -> ReliaConfig {
        ReliaConfig {
            sheet: self.sheet.clone(),
            skip_rows: self.skip_rows,
            settings: AnalysisSettings {
                observation_period: self.period,
                unit: self.unit,
            },
            overrides: BindingOverrides {
                downtime: self.downtime_col.clone(),
                repair_time: self.repair_col.clone(),
                department: self.department_col.clone(),
                cost: self.cost_col.clone(),
            },
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a workbook and print the full dashboard
    Analyze {
        #[command(flatten)]
        args: AnalysisArgs,

        /// Write the JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Reconcile repair costs across every sheet
    Cost {
        #[command(flatten)]
        args: AnalysisArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score equipment risk and forecast the next failure
    Risk {
        #[command(flatten)]
        args: AnalysisArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the sheets in a workbook
    Sheets {
        /// Path to the workbook (.xlsx/.xls/.csv)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Title rows to discard before the header row
        #[arg(long, default_value = "0")]
        skip_rows: usize,
    },
}
