use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{monthly_payment, monthly_rate, LoanTerms};
use crate::error::LoanMatchError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LoanMatchResult;

/// All financing is modeled as a 30-year fixed loan.
const LOAN_TERM_MONTHS: u32 = 360;
/// The break-even search runs this far regardless of the analysis horizon.
const MAX_PROJECTION_YEARS: u32 = 30;
/// Net difference beyond this fraction of the home price tips the call.
const DECISION_BAND: Decimal = dec!(0.10);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentVsBuyInput {
    pub home_price: Money,
    /// Down payment as a percentage of the home price (20 = 20%).
    pub down_payment_percent: Percent,
    /// Mortgage rate as a whole-number percentage.
    pub annual_rate_percent: Percent,
    /// Starting monthly rent for the comparable property.
    pub monthly_rent: Money,
    /// Rent growth per year, compounded at year boundaries.
    pub annual_rent_increase_percent: Percent,
    /// Home value growth per year, applied at year end.
    pub annual_appreciation_percent: Percent,
    /// Analysis horizon, 1 to 30 years.
    pub years_to_analyze: u32,
    /// Annual property tax as a percentage of the home price.
    pub property_tax_rate_percent: Percent,
    pub annual_insurance: Money,
    pub monthly_hoa: Money,
    /// Annual upkeep as a percentage of the home price.
    pub annual_maintenance_percent: Percent,
    pub closing_costs: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentVsBuyRecommendation {
    Buy,
    Rent,
    TooCloseToCall,
}

/// One year of the ownership projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipYear {
    pub year: u32,
    pub annual_rent_paid: Money,
    pub cumulative_rent: Money,
    pub home_value: Money,
    pub loan_balance: Money,
    pub home_equity: Money,
    pub cumulative_ownership_cost: Money,
    /// Ownership cost to date less equity built.
    pub net_ownership_cost: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentVsBuyProjection {
    pub total_rent_paid: Money,
    /// Down payment + closing costs + every monthly carrying cost.
    pub total_ownership_cost: Money,
    pub net_buying_cost: Money,
    /// Rent paid minus net buying cost; positive favors buying.
    pub net_difference: Money,
    pub home_equity: Money,
    pub final_home_value: Money,
    /// First year owning pulls ahead of renting, searched through year 30.
    /// `None` when renting stays ahead for all 30 years.
    pub break_even_year: Option<u32>,
    pub recommendation: RentVsBuyRecommendation,
    pub year_by_year: Vec<OwnershipYear>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Month-by-month comparison of renting against owning over the analysis
/// horizon, with a break-even search through year 30.
pub fn project_rent_vs_buy(
    input: &RentVsBuyInput,
) -> LoanMatchResult<ComputationOutput<RentVsBuyProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let down_payment = input.home_price * input.down_payment_percent / dec!(100);
    let loan_amount = input.home_price - down_payment;

    let payment = if loan_amount.is_zero() {
        Decimal::ZERO
    } else {
        monthly_payment(&LoanTerms {
            principal: loan_amount,
            annual_rate_percent: input.annual_rate_percent,
            term_months: LOAN_TERM_MONTHS,
        })?
    };
    let rate = monthly_rate(input.annual_rate_percent);

    // Fixed monthly carrying costs, all anchored to the purchase price.
    let monthly_property_tax = input.home_price * input.property_tax_rate_percent / dec!(100) / dec!(12);
    let monthly_maintenance =
        input.home_price * input.annual_maintenance_percent / dec!(100) / dec!(12);
    let monthly_insurance = input.annual_insurance / dec!(12);
    let monthly_carrying =
        payment + monthly_property_tax + monthly_insurance + input.monthly_hoa + monthly_maintenance;

    let rent_growth = Decimal::ONE + input.annual_rent_increase_percent / dec!(100);
    let appreciation = Decimal::ONE + input.annual_appreciation_percent / dec!(100);

    // --- Single pass to 30 years; the horizon snapshot is taken in flight ---
    let mut rent = input.monthly_rent;
    let mut home_value = input.home_price;
    let mut balance = loan_amount;
    let mut cumulative_rent = Decimal::ZERO;
    let mut cumulative_ownership = down_payment + input.closing_costs;
    let mut break_even_year: Option<u32> = None;
    let mut year_by_year = Vec::with_capacity(input.years_to_analyze as usize);
    let mut horizon = None;

    for year in 1..=MAX_PROJECTION_YEARS {
        let annual_rent_paid = rent * dec!(12);

        for _ in 0..12 {
            cumulative_rent += rent;
            cumulative_ownership += monthly_carrying;

            if balance > Decimal::ZERO {
                let interest = balance * rate;
                let principal_paid = payment - interest;
                balance -= principal_paid;
                if balance < Decimal::ZERO {
                    balance = Decimal::ZERO;
                }
            }
        }

        // Value appreciates at year end; rent steps up for the next year.
        home_value *= appreciation;
        rent *= rent_growth;

        let home_equity = home_value - balance;
        let net_ownership_cost = cumulative_ownership - home_equity;

        if break_even_year.is_none() && cumulative_rent > net_ownership_cost {
            break_even_year = Some(year);
        }

        if year <= input.years_to_analyze {
            year_by_year.push(OwnershipYear {
                year,
                annual_rent_paid,
                cumulative_rent,
                home_value,
                loan_balance: balance,
                home_equity,
                cumulative_ownership_cost: cumulative_ownership,
                net_ownership_cost,
            });
        }

        if year == input.years_to_analyze {
            horizon = Some((cumulative_rent, cumulative_ownership, home_value, balance));
        }
    }

    // Horizon is validated to 1..=30, so the snapshot always exists.
    let (total_rent_paid, total_ownership_cost, final_home_value, final_balance) =
        horizon.ok_or_else(|| LoanMatchError::InvalidInput {
            field: "years_to_analyze".into(),
            reason: "Analysis horizon produced no projection".into(),
        })?;

    let home_equity = final_home_value - final_balance;
    let net_buying_cost = total_ownership_cost - home_equity;
    let net_difference = total_rent_paid - net_buying_cost;

    let recommendation = recommend(net_difference, input.home_price);

    if break_even_year.is_none() {
        warnings.push("Owning never overtakes renting within 30 years".into());
    }

    let projection = RentVsBuyProjection {
        total_rent_paid,
        total_ownership_cost,
        net_buying_cost,
        net_difference,
        home_equity,
        final_home_value,
        break_even_year,
        recommendation,
        year_by_year,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rent vs. Buy Projection (30-year fixed financing)",
        input,
        warnings,
        elapsed,
        projection,
    ))
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// Calls it for buying or renting only when the gap clears 10% of the home
/// price in either direction.
fn recommend(net_difference: Money, home_price: Money) -> RentVsBuyRecommendation {
    let band = home_price * DECISION_BAND;
    if net_difference > band {
        RentVsBuyRecommendation::Buy
    } else if net_difference < -band {
        RentVsBuyRecommendation::Rent
    } else {
        RentVsBuyRecommendation::TooCloseToCall
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &RentVsBuyInput) -> LoanMatchResult<()> {
    if input.home_price <= Decimal::ZERO {
        return Err(LoanMatchError::InvalidInput {
            field: "home_price".into(),
            reason: "Home price must be positive".into(),
        });
    }
    if input.down_payment_percent < Decimal::ZERO || input.down_payment_percent > dec!(100) {
        return Err(LoanMatchError::InvalidInput {
            field: "down_payment_percent".into(),
            reason: "Down payment must be between 0 and 100 percent".into(),
        });
    }
    if input.years_to_analyze == 0 || input.years_to_analyze > MAX_PROJECTION_YEARS {
        return Err(LoanMatchError::InvalidInput {
            field: "years_to_analyze".into(),
            reason: "Analysis horizon must be between 1 and 30 years".into(),
        });
    }
    if input.monthly_rent <= Decimal::ZERO {
        return Err(LoanMatchError::InvalidInput {
            field: "monthly_rent".into(),
            reason: "Monthly rent must be positive".into(),
        });
    }

    let percents = [
        ("annual_rate_percent", input.annual_rate_percent),
        (
            "annual_rent_increase_percent",
            input.annual_rent_increase_percent,
        ),
        (
            "annual_appreciation_percent",
            input.annual_appreciation_percent,
        ),
        ("property_tax_rate_percent", input.property_tax_rate_percent),
        (
            "annual_maintenance_percent",
            input.annual_maintenance_percent,
        ),
    ];
    for (field, value) in percents {
        if value < Decimal::ZERO {
            return Err(LoanMatchError::InvalidInput {
                field: field.into(),
                reason: "Rate cannot be negative".into(),
            });
        }
    }

    let amounts = [
        ("annual_insurance", input.annual_insurance),
        ("monthly_hoa", input.monthly_hoa),
        ("closing_costs", input.closing_costs),
    ];
    for (field, value) in amounts {
        if value < Decimal::ZERO {
            return Err(LoanMatchError::InvalidInput {
                field: field.into(),
                reason: "Amount cannot be negative".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn suburban_comparison() -> RentVsBuyInput {
        RentVsBuyInput {
            home_price: dec!(300000),
            down_payment_percent: dec!(20),
            annual_rate_percent: dec!(6),
            monthly_rent: dec!(3000),
            annual_rent_increase_percent: dec!(5),
            annual_appreciation_percent: dec!(5),
            years_to_analyze: 5,
            property_tax_rate_percent: dec!(1),
            annual_insurance: dec!(1200),
            monthly_hoa: Decimal::ZERO,
            annual_maintenance_percent: dec!(1),
            closing_costs: dec!(6000),
        }
    }

    #[test]
    fn test_output_identities_hold() {
        let result = project_rent_vs_buy(&suburban_comparison()).unwrap();
        let p = &result.result;

        assert_eq!(p.net_buying_cost, p.total_ownership_cost - p.home_equity);
        assert_eq!(p.net_difference, p.total_rent_paid - p.net_buying_cost);
        assert_eq!(p.year_by_year.len(), 5);

        let last = p.year_by_year.last().unwrap();
        assert_eq!(last.cumulative_rent, p.total_rent_paid);
        assert_eq!(last.home_value, p.final_home_value);
        assert_eq!(last.home_equity, p.home_equity);
    }

    #[test]
    fn test_home_value_compounds_annually() {
        let result = project_rent_vs_buy(&suburban_comparison()).unwrap();
        let p = &result.result;

        // 300000 * 1.05^5, compounded the same way the projection does
        let mut expected = dec!(300000);
        for _ in 0..5 {
            expected *= dec!(1.05);
        }
        assert_eq!(p.final_home_value, expected);
    }

    #[test]
    fn test_rent_steps_up_at_year_boundaries() {
        let result = project_rent_vs_buy(&suburban_comparison()).unwrap();
        let p = &result.result;

        // Year 1 rent is flat at the starting rate: 3000 * 12
        assert_eq!(p.year_by_year[0].annual_rent_paid, dec!(36000));
        // Year 2 rent is one 5% step up
        assert_eq!(p.year_by_year[1].annual_rent_paid, dec!(36000) * dec!(1.05));
    }

    #[test]
    fn test_expensive_rent_favors_buying() {
        let result = project_rent_vs_buy(&suburban_comparison()).unwrap();
        let p = &result.result;

        assert!(p.net_difference > dec!(30000));
        assert_eq!(p.recommendation, RentVsBuyRecommendation::Buy);
        assert_eq!(p.break_even_year, Some(1));
    }

    #[test]
    fn test_cheap_rent_flat_market_favors_renting() {
        let mut input = suburban_comparison();
        input.monthly_rent = dec!(500);
        input.annual_rent_increase_percent = Decimal::ZERO;
        input.annual_appreciation_percent = Decimal::ZERO;
        let result = project_rent_vs_buy(&input).unwrap();
        let p = &result.result;

        assert!(p.net_difference < dec!(-30000));
        assert_eq!(p.recommendation, RentVsBuyRecommendation::Rent);
        assert_eq!(p.break_even_year, None);
        assert!(result.warnings.iter().any(|w| w.contains("never overtakes")));
    }

    #[test]
    fn test_appreciation_monotonically_raises_equity() {
        let mut low = suburban_comparison();
        low.annual_appreciation_percent = dec!(2);
        let mut high = suburban_comparison();
        high.annual_appreciation_percent = dec!(6);

        let equity_low = project_rent_vs_buy(&low).unwrap().result.home_equity;
        let equity_high = project_rent_vs_buy(&high).unwrap().result.home_equity;
        assert!(equity_high > equity_low);
    }

    #[test]
    fn test_decision_band_boundaries() {
        // Exactly +/-10% of the price stays inside the too-close band
        let band = dec!(30000);
        assert_eq!(
            recommend(band, dec!(300000)),
            RentVsBuyRecommendation::TooCloseToCall
        );
        assert_eq!(
            recommend(-band, dec!(300000)),
            RentVsBuyRecommendation::TooCloseToCall
        );
        assert_eq!(
            recommend(band + dec!(0.01), dec!(300000)),
            RentVsBuyRecommendation::Buy
        );
        assert_eq!(
            recommend(-band - dec!(0.01), dec!(300000)),
            RentVsBuyRecommendation::Rent
        );
    }

    #[test]
    fn test_all_cash_purchase_has_no_payment() {
        let mut input = suburban_comparison();
        input.down_payment_percent = dec!(100);
        let result = project_rent_vs_buy(&input).unwrap();
        let p = &result.result;

        // No loan: equity is simply the appreciated value
        assert_eq!(p.home_equity, p.final_home_value);
        assert_eq!(p.year_by_year[0].loan_balance, Decimal::ZERO);
    }

    #[test]
    fn test_horizon_out_of_range_rejected() {
        let mut input = suburban_comparison();
        input.years_to_analyze = 31;
        assert!(project_rent_vs_buy(&input).is_err());

        input.years_to_analyze = 0;
        assert!(project_rent_vs_buy(&input).is_err());
    }

    #[test]
    fn test_zero_home_price_rejected() {
        let mut input = suburban_comparison();
        input.home_price = Decimal::ZERO;
        let err = project_rent_vs_buy(&input).unwrap_err();
        match err {
            LoanMatchError::InvalidInput { field, .. } => assert_eq!(field, "home_price"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}
