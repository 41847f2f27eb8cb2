use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loanmatch_core::closing_costs::{estimate_closing_costs, ClosingCostInput};
use loanmatch_core::{LoanProgram, UsState};

use crate::input;

/// Arguments for the closing cost estimate
#[derive(Args)]
pub struct ClosingCostsArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price of the home
    #[arg(long)]
    pub home_price: Option<Decimal>,

    /// Loan amount (must not exceed the home price)
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Loan program: conventional, fha, va, usda
    #[arg(long)]
    pub loan_type: Option<String>,

    /// Closing state: california, texas, florida, new-york, other
    #[arg(long)]
    pub state: Option<String>,

    /// Note rate as a percentage (7.0 = 7.0%)
    #[arg(long, alias = "rate")]
    pub interest_rate_percent: Option<Decimal>,
}

pub fn run_closing_costs(args: ClosingCostsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cost_input: ClosingCostInput = if let Some(ref path) = args.input {
        input::read_file(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ClosingCostInput {
            home_price: args
                .home_price
                .ok_or("--home-price is required (or provide --input)")?,
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            loan_type: parse_loan_type(
                &args
                    .loan_type
                    .ok_or("--loan-type is required (or provide --input)")?,
            )?,
            state: parse_state(
                &args
                    .state
                    .ok_or("--state is required (or provide --input)")?,
            )?,
            interest_rate_percent: args
                .interest_rate_percent
                .ok_or("--interest-rate-percent is required (or provide --input)")?,
        }
    };

    let output = estimate_closing_costs(&cost_input)?;
    Ok(serde_json::to_value(output)?)
}

fn parse_loan_type(raw: &str) -> Result<LoanProgram, String> {
    match raw.to_ascii_lowercase().as_str() {
        "conventional" => Ok(LoanProgram::Conventional),
        "fha" => Ok(LoanProgram::Fha),
        "va" => Ok(LoanProgram::Va),
        "usda" => Ok(LoanProgram::Usda),
        other => Err(format!(
            "Unknown loan type '{other}' (expected conventional, fha, va, or usda)"
        )),
    }
}

fn parse_state(raw: &str) -> Result<UsState, String> {
    match raw.to_ascii_lowercase().as_str() {
        "california" | "ca" => Ok(UsState::California),
        "texas" | "tx" => Ok(UsState::Texas),
        "florida" | "fl" => Ok(UsState::Florida),
        "new-york" | "ny" => Ok(UsState::NewYork),
        "other" => Ok(UsState::Other),
        other => Err(format!(
            "Unknown state '{other}' (expected california, texas, florida, new-york, or other)"
        )),
    }
}
