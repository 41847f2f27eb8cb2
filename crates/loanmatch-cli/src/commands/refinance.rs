use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loanmatch_core::refinance::{analyze_refinance, RefinanceInput};

use crate::input;

/// Arguments for the refinance comparison
#[derive(Args)]
pub struct RefinanceArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Outstanding balance on the current loan
    #[arg(long)]
    pub current_balance: Option<Decimal>,

    /// Current rate as a percentage (7.0 = 7.0%)
    #[arg(long, alias = "current-rate")]
    pub current_rate_percent: Option<Decimal>,

    /// Months remaining on the current loan
    #[arg(long)]
    pub current_term_remaining_months: Option<u32>,

    /// Proposed rate as a percentage
    #[arg(long, alias = "new-rate")]
    pub new_rate_percent: Option<Decimal>,

    /// Term of the proposed loan in months
    #[arg(long)]
    pub new_term_months: Option<u32>,

    /// Estimated closing costs, paid at closing
    #[arg(long)]
    pub closing_costs: Option<Decimal>,

    /// Cash-out amount added to the new balance
    #[arg(long)]
    pub cash_out_amount: Option<Decimal>,
}

pub fn run_refinance(args: RefinanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let refi_input: RefinanceInput = if let Some(ref path) = args.input {
        input::read_file(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RefinanceInput {
            current_balance: args
                .current_balance
                .ok_or("--current-balance is required (or provide --input)")?,
            current_rate_percent: args
                .current_rate_percent
                .ok_or("--current-rate-percent is required (or provide --input)")?,
            current_term_remaining_months: args
                .current_term_remaining_months
                .ok_or("--current-term-remaining-months is required (or provide --input)")?,
            new_rate_percent: args
                .new_rate_percent
                .ok_or("--new-rate-percent is required (or provide --input)")?,
            new_term_months: args
                .new_term_months
                .ok_or("--new-term-months is required (or provide --input)")?,
            closing_costs: args
                .closing_costs
                .ok_or("--closing-costs is required (or provide --input)")?,
            cash_out_amount: args.cash_out_amount,
        }
    };

    let output = analyze_refinance(&refi_input)?;
    Ok(serde_json::to_value(output)?)
}
