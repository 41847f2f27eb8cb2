use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loanmatch_core::dti::{analyze_dti, DtiInput};

use crate::input;

/// Arguments for the DTI analysis
#[derive(Args)]
pub struct DtiArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly gross income
    #[arg(long, alias = "income")]
    pub monthly_gross_income: Option<Decimal>,

    /// Other monthly income
    #[arg(long)]
    pub other_monthly_income: Option<Decimal>,

    /// Proposed principal and interest payment
    #[arg(long, alias = "pi")]
    pub principal_and_interest: Option<Decimal>,

    /// Monthly property tax
    #[arg(long)]
    pub property_tax: Option<Decimal>,

    /// Monthly homeowners insurance
    #[arg(long)]
    pub homeowners_insurance: Option<Decimal>,

    /// Monthly HOA dues
    #[arg(long, alias = "hoa")]
    pub hoa_dues: Option<Decimal>,

    /// Monthly mortgage insurance
    #[arg(long, alias = "pmi")]
    pub mortgage_insurance: Option<Decimal>,

    /// Monthly auto loan payments
    #[arg(long)]
    pub auto_loans: Option<Decimal>,

    /// Monthly credit card minimums
    #[arg(long)]
    pub credit_card_minimums: Option<Decimal>,

    /// Monthly student loan payments
    #[arg(long)]
    pub student_loans: Option<Decimal>,

    /// Other monthly loan payments
    #[arg(long)]
    pub other_loans: Option<Decimal>,
}

pub fn run_dti(args: DtiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dti_input: DtiInput = if let Some(ref path) = args.input {
        input::read_file(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DtiInput {
            monthly_gross_income: args
                .monthly_gross_income
                .ok_or("--monthly-gross-income is required (or provide --input)")?,
            other_monthly_income: args.other_monthly_income,
            principal_and_interest: args.principal_and_interest,
            property_tax: args.property_tax,
            homeowners_insurance: args.homeowners_insurance,
            hoa_dues: args.hoa_dues,
            mortgage_insurance: args.mortgage_insurance,
            auto_loans: args.auto_loans,
            credit_card_minimums: args.credit_card_minimums,
            student_loans: args.student_loans,
            other_loans: args.other_loans,
        }
    };

    let output = analyze_dti(&dti_input)?;
    Ok(serde_json::to_value(output)?)
}
