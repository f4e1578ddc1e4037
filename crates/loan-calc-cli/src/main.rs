mod commands;
mod input;
mod logger;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{CalculateArgs, ValidateArgs};
use commands::session::SessionArgs;

/// UGX loan calculator
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "UGX loan calculator",
    long_about = "Computes the level monthly payment and total interest of an amortized \
                  loan from a loan amount, an annual interest rate (percent) and a term \
                  in years, with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug events to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate monthly payment and total interest
    Calculate(CalculateArgs),
    /// Check inputs without pricing the loan
    Validate(ValidateArgs),
    /// Drive an interactive calculator session
    Session(SessionArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::loan::run_calculate(args),
        Commands::Validate(args) => commands::loan::run_validate(args),
        Commands::Session(args) => commands::session::run_session(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
