mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::closing_costs::ClosingCostsArgs;
use commands::dti::DtiArgs;
use commands::payment::{PaymentArgs, ScheduleArgs};
use commands::refinance::RefinanceArgs;
use commands::rent_vs_buy::RentVsBuyArgs;

/// Mortgage calculations for loanmatch
#[derive(Parser)]
#[command(
    name = "mmc",
    version,
    about = "Mortgage calculations with decimal precision",
    long_about = "The calculation engine behind loanmatch's calculator pages: \
                  fixed-rate payments and amortization schedules, itemized \
                  closing cost estimates, DTI program qualification, refinance \
                  break-even analysis, and rent-vs-buy projections."
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
    /// Fixed-rate monthly payment and lifetime interest
    Payment(PaymentArgs),
    /// Month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Itemized closing cost estimate
    ClosingCosts(ClosingCostsArgs),
    /// Debt-to-income analysis and program qualification
    Dti(DtiArgs),
    /// Refinance comparison with break-even on closing costs
    Refinance(RefinanceArgs),
    /// Rent-vs-buy projection over an analysis horizon
    RentVsBuy(RentVsBuyArgs),
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
        Commands::Payment(args) => commands::payment::run_payment(args),
        Commands::Schedule(args) => commands::payment::run_schedule(args),
        Commands::ClosingCosts(args) => commands::closing_costs::run_closing_costs(args),
        Commands::Dti(args) => commands::dti::run_dti(args),
        Commands::Refinance(args) => commands::refinance::run_refinance(args),
        Commands::RentVsBuy(args) => commands::rent_vs_buy::run_rent_vs_buy(args),
        Commands::Version => {
            println!("mmc {}", env!("CARGO_PKG_VERSION"));
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
