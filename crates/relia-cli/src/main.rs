//! Relia CLI - reliability and failure analytics for spreadsheet data.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze { args, output } => commands::analyze::run(args, output, cli.verbose),

        Commands::Cost { args, json } => commands::cost::run(args, json, cli.verbose),

        Commands::Risk { args, json } => commands::risk::run(args, json, cli.verbose),

        Commands::Sheets { file, skip_rows } => commands::sheets::run(file, skip_rows, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
