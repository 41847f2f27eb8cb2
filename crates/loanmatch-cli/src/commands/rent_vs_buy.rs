use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loanmatch_core::rent_vs_buy::{project_rent_vs_buy, RentVsBuyInput};

use crate::input;

/// Arguments for the rent-vs-buy projection
#[derive(Args)]
pub struct RentVsBuyArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price of the home
    #[arg(long)]
    pub home_price: Option<Decimal>,

    /// Down payment as a percentage of the price (20 = 20%)
    #[arg(long, alias = "down")]
    pub down_payment_percent: Option<Decimal>,

    /// Mortgage rate as a percentage
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Starting monthly rent for the comparable property
    #[arg(long, alias = "rent")]
    pub monthly_rent: Option<Decimal>,

    /// Annual rent increase as a percentage
    #[arg(long)]
    pub annual_rent_increase_percent: Option<Decimal>,

    /// Annual home appreciation as a percentage
    #[arg(long, alias = "appreciation")]
    pub annual_appreciation_percent: Option<Decimal>,

    /// Analysis horizon in years (1-30)
    #[arg(long, alias = "years")]
    pub years_to_analyze: Option<u32>,

    /// Annual property tax rate as a percentage of the price
    #[arg(long)]
    pub property_tax_rate_percent: Option<Decimal>,

    /// Annual homeowners insurance
    #[arg(long)]
    pub annual_insurance: Option<Decimal>,

    /// Monthly HOA dues
    #[arg(long, alias = "hoa")]
    pub monthly_hoa: Option<Decimal>,

    /// Annual maintenance as a percentage of the price
    #[arg(long)]
    pub annual_maintenance_percent: Option<Decimal>,

    /// One-time closing costs at purchase
    #[arg(long)]
    pub closing_costs: Option<Decimal>,
}

pub fn run_rent_vs_buy(args: RentVsBuyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let projection_input: RentVsBuyInput = if let Some(ref path) = args.input {
        input::read_file(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RentVsBuyInput {
            home_price: args
                .home_price
                .ok_or("--home-price is required (or provide --input)")?,
            down_payment_percent: args
                .down_payment_percent
                .ok_or("--down-payment-percent is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            monthly_rent: args
                .monthly_rent
                .ok_or("--monthly-rent is required (or provide --input)")?,
            annual_rent_increase_percent: args
                .annual_rent_increase_percent
                .ok_or("--annual-rent-increase-percent is required (or provide --input)")?,
            annual_appreciation_percent: args
                .annual_appreciation_percent
                .ok_or("--annual-appreciation-percent is required (or provide --input)")?,
            years_to_analyze: args
                .years_to_analyze
                .ok_or("--years-to-analyze is required (or provide --input)")?,
            property_tax_rate_percent: args
                .property_tax_rate_percent
                .ok_or("--property-tax-rate-percent is required (or provide --input)")?,
            annual_insurance: args
                .annual_insurance
                .ok_or("--annual-insurance is required (or provide --input)")?,
            monthly_hoa: args
                .monthly_hoa
                .ok_or("--monthly-hoa is required (or provide --input)")?,
            annual_maintenance_percent: args
                .annual_maintenance_percent
                .ok_or("--annual-maintenance-percent is required (or provide --input)")?,
            closing_costs: args
                .closing_costs
                .ok_or("--closing-costs is required (or provide --input)")?,
        }
    };

    let output = project_rent_vs_buy(&projection_input)?;
    Ok(serde_json::to_value(output)?)
}
