mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortize::AmortizeArgs;
use commands::compound::CompoundArgs;

/// Mortgage and investment calculators
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Mortgage amortization and compound-growth calculators",
    long_about = "A CLI for mortgage amortization schedules and compound-interest growth \
                  projections with decimal precision. Computes fixed periodic payments, \
                  principal/interest splits, remaining balances, and year-by-year \
                  investment growth with regular contributions."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a mortgage amortization schedule
    Amortize(AmortizeArgs),
    /// Project compound-interest growth of an investment
    Compound(CompoundArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortize(args) => commands::amortize::run_amortize(args),
        Commands::Compound(args) => commands::compound::run_compound(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
