use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loanmatch_core::amortization::{analyze_payment, payment_schedule, LoanTerms};

use crate::input;

/// Arguments for the monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate as a percentage (6.5 = 6.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Loan term in months
    #[arg(long, alias = "term")]
    pub term_months: Option<u32>,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate as a percentage (6.5 = 6.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Loan term in months
    #[arg(long, alias = "term")]
    pub term_months: Option<u32>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(
        &args.input,
        args.principal,
        args.annual_rate_percent,
        args.term_months,
    )?;
    let output = analyze_payment(&terms)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(
        &args.input,
        args.principal,
        args.annual_rate_percent,
        args.term_months,
    )?;
    let schedule = payment_schedule(&terms)?;
    Ok(serde_json::to_value(schedule)?)
}

fn resolve_terms(
    input: &Option<String>,
    principal: Option<Decimal>,
    annual_rate_percent: Option<Decimal>,
    term_months: Option<u32>,
) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    if let Some(path) = input {
        return input::read_file(path);
    }
    if let Some(data) = input::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(LoanTerms {
        principal: principal.ok_or("--principal is required (or provide --input)")?,
        annual_rate_percent: annual_rate_percent
            .ok_or("--annual-rate-percent is required (or provide --input)")?,
        term_months: term_months.ok_or("--term-months is required (or provide --input)")?,
    })
}
