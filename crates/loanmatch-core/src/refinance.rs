use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{monthly_payment, LoanTerms};
use crate::error::LoanMatchError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LoanMatchResult;

/// Break-even inside this many months is a clear win.
const REFINANCE_THRESHOLD_MONTHS: Decimal = dec!(24);
/// Break-even beyond this many months is a clear pass.
const WAIT_THRESHOLD_MONTHS: Decimal = dec!(60);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceInput {
    pub current_balance: Money,
    /// Current note rate as a whole-number percentage.
    pub current_rate_percent: Percent,
    pub current_term_remaining_months: u32,
    /// Proposed note rate as a whole-number percentage.
    pub new_rate_percent: Percent,
    pub new_term_months: u32,
    /// Paid at closing; never financed into the new principal.
    pub closing_costs: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_out_amount: Option<Money>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefinanceRecommendation {
    Refinance,
    Wait,
    Review,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceAnalysis {
    pub current_monthly_payment: Money,
    pub new_monthly_payment: Money,
    /// Current balance plus any cash-out draw.
    pub new_loan_amount: Money,
    pub monthly_savings: Money,
    /// Months of savings that repay the closing costs. `None` when the new
    /// payment saves nothing — there is no break-even.
    pub break_even_months: Option<Decimal>,
    pub total_interest_current: Money,
    pub total_interest_new: Money,
    pub interest_savings: Money,
    /// Savings over the shorter of the two terms, net of closing costs.
    pub lifetime_savings: Money,
    pub recommendation: RefinanceRecommendation,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare the existing loan against a proposed replacement: payment delta,
/// break-even on closing costs, lifetime and interest savings, and a
/// three-way recommendation.
pub fn analyze_refinance(
    input: &RefinanceInput,
) -> LoanMatchResult<ComputationOutput<RefinanceAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let cash_out = input.cash_out_amount.unwrap_or(Decimal::ZERO);
    let new_loan_amount = input.current_balance + cash_out;

    let current_monthly_payment = monthly_payment(&LoanTerms {
        principal: input.current_balance,
        annual_rate_percent: input.current_rate_percent,
        term_months: input.current_term_remaining_months,
    })?;
    let new_monthly_payment = monthly_payment(&LoanTerms {
        principal: new_loan_amount,
        annual_rate_percent: input.new_rate_percent,
        term_months: input.new_term_months,
    })?;

    let monthly_savings = current_monthly_payment - new_monthly_payment;

    let break_even_months = if monthly_savings > Decimal::ZERO {
        Some(input.closing_costs / monthly_savings)
    } else {
        None
    };

    let current_term = Decimal::from(input.current_term_remaining_months);
    let new_term = Decimal::from(input.new_term_months);

    let total_interest_current = current_monthly_payment * current_term - input.current_balance;
    let total_interest_new = new_monthly_payment * new_term - new_loan_amount;
    let interest_savings = total_interest_current - total_interest_new;

    let comparison_months =
        Decimal::from(input.current_term_remaining_months.min(input.new_term_months));
    let lifetime_savings = monthly_savings * comparison_months - input.closing_costs;

    let recommendation = recommend(break_even_months, monthly_savings);

    if input.new_term_months > input.current_term_remaining_months {
        let extension = input.new_term_months - input.current_term_remaining_months;
        warnings.push(format!(
            "New term pushes the payoff date out by {extension} months"
        ));
    }
    if cash_out > Decimal::ZERO {
        warnings.push(format!(
            "Cash-out of {cash_out} is added to the new loan balance"
        ));
    }

    let analysis = RefinanceAnalysis {
        current_monthly_payment,
        new_monthly_payment,
        new_loan_amount,
        monthly_savings,
        break_even_months,
        total_interest_current,
        total_interest_new,
        interest_savings,
        lifetime_savings,
        recommendation,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Refinance Comparison (break-even on closing costs)",
        input,
        warnings,
        elapsed,
        analysis,
    ))
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// Checked in order: a fast break-even wins, a slow or absent one loses,
/// everything between goes to review.
fn recommend(break_even: Option<Decimal>, monthly_savings: Money) -> RefinanceRecommendation {
    match break_even {
        Some(months) if months <= REFINANCE_THRESHOLD_MONTHS && monthly_savings > Decimal::ZERO => {
            RefinanceRecommendation::Refinance
        }
        Some(months) if months > WAIT_THRESHOLD_MONTHS => RefinanceRecommendation::Wait,
        None => RefinanceRecommendation::Wait,
        Some(_) => RefinanceRecommendation::Review,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &RefinanceInput) -> LoanMatchResult<()> {
    if input.current_balance <= Decimal::ZERO {
        return Err(LoanMatchError::InvalidInput {
            field: "current_balance".into(),
            reason: "Current balance must be positive".into(),
        });
    }
    if input.current_term_remaining_months == 0 {
        return Err(LoanMatchError::InvalidInput {
            field: "current_term_remaining_months".into(),
            reason: "Remaining term must be at least one month".into(),
        });
    }
    if input.new_term_months == 0 {
        return Err(LoanMatchError::InvalidInput {
            field: "new_term_months".into(),
            reason: "New term must be at least one month".into(),
        });
    }
    if input.current_rate_percent < Decimal::ZERO || input.new_rate_percent < Decimal::ZERO {
        return Err(LoanMatchError::InvalidInput {
            field: "rate_percent".into(),
            reason: "Interest rates cannot be negative".into(),
        });
    }
    if input.closing_costs < Decimal::ZERO {
        return Err(LoanMatchError::InvalidInput {
            field: "closing_costs".into(),
            reason: "Closing costs cannot be negative".into(),
        });
    }
    if let Some(cash_out) = input.cash_out_amount {
        if cash_out < Decimal::ZERO {
            return Err(LoanMatchError::InvalidInput {
                field: "cash_out_amount".into(),
                reason: "Cash-out amount cannot be negative".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
