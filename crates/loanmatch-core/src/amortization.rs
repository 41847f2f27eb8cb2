use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanMatchError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::LoanMatchResult;

/// Balance below this is treated as fully paid.
const BALANCE_EPSILON: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A fixed-rate loan: everything needed to derive the monthly payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Annual rate as a whole-number percentage (6.5 = 6.5%).
    pub annual_rate_percent: Percent,
    pub term_months: u32,
}

/// Payment summary for a loan held to maturity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub monthly_payment: Money,
    /// Sum of all scheduled payments (payment * term).
    pub total_of_payments: Money,
    /// Total of payments less the amount borrowed.
    pub total_interest: Money,
}

/// One month in an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    pub month: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fixed monthly payment that fully amortizes the loan over its term.
///
/// Uses P * r(1+r)^n / ((1+r)^n - 1) with monthly compounding. A zero rate
/// short-circuits to straight-line repayment — the annuity denominator is
/// zero there.
pub fn monthly_payment(terms: &LoanTerms) -> LoanMatchResult<Money> {
    validate_terms(terms)?;

    let rate = monthly_rate(terms.annual_rate_percent);
    if rate.is_zero() {
        return Ok(terms.principal / Decimal::from(terms.term_months));
    }

    let compound = compound_factor(rate, terms.term_months);
    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(LoanMatchError::DivisionByZero {
            context: "amortization payment denominator".into(),
        });
    }

    Ok(terms.principal * rate * compound / denominator)
}

/// Monthly payment plus lifetime totals.
pub fn analyze_payment(terms: &LoanTerms) -> LoanMatchResult<ComputationOutput<PaymentSummary>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    let payment = monthly_payment(terms)?;
    let total_of_payments = payment * Decimal::from(terms.term_months);
    let total_interest = total_of_payments - terms.principal;

    let summary = PaymentSummary {
        monthly_payment: payment,
        total_of_payments,
        total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fixed-Rate Amortization (monthly compounding)",
        terms,
        warnings,
        elapsed,
        summary,
    ))
}

/// Outstanding balance after `payments_made` scheduled payments, clamped at
/// zero once the loan is paid off.
pub fn balance_after(terms: &LoanTerms, payments_made: u32) -> LoanMatchResult<Money> {
    let payment = monthly_payment(terms)?;
    let rate = monthly_rate(terms.annual_rate_percent);
    let n = payments_made.min(terms.term_months);

    if rate.is_zero() {
        let paid = payment * Decimal::from(n);
        return Ok((terms.principal - paid).max(Decimal::ZERO));
    }

    let mut balance = terms.principal;
    for _ in 0..n {
        let interest = balance * rate;
        let principal_paid = payment - interest;
        balance -= principal_paid;
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
            break;
        }
    }

    Ok(balance)
}

/// Month-by-month principal/interest split over the full term.
///
/// The final payment absorbs rounding drift so the schedule always ends at a
/// zero balance.
pub fn payment_schedule(terms: &LoanTerms) -> LoanMatchResult<Vec<AmortizationPeriod>> {
    let payment = monthly_payment(terms)?;
    let rate = monthly_rate(terms.annual_rate_percent);

    let mut schedule = Vec::with_capacity(terms.term_months as usize);
    let mut balance = terms.principal;

    for month in 1..=terms.term_months {
        let interest = balance * rate;
        let mut principal_paid = payment - interest;
        let mut paid = payment;

        // Last period, or drift past zero: settle the remaining balance.
        if month == terms.term_months || principal_paid >= balance - BALANCE_EPSILON {
            principal_paid = balance;
            paid = balance + interest;
        }

        balance -= principal_paid;

        schedule.push(AmortizationPeriod {
            month,
            payment: paid,
            interest,
            principal: principal_paid,
            balance,
        });

        if balance.is_zero() {
            break;
        }
    }

    Ok(schedule)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Whole-number annual percentage to monthly fractional rate.
pub(crate) fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / dec!(12)
}

/// (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
fn compound_factor(rate: Rate, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

fn validate_terms(terms: &LoanTerms) -> LoanMatchResult<()> {
    if terms.principal <= Decimal::ZERO {
        return Err(LoanMatchError::InvalidInput {
            field: "principal".into(),
            reason: "Loan principal must be positive".into(),
        });
    }
    if terms.term_months == 0 {
        return Err(LoanMatchError::InvalidInput {
            field: "term_months".into(),
            reason: "Loan term must be at least one month".into(),
        });
    }
    if terms.annual_rate_percent < Decimal::ZERO {
        return Err(LoanMatchError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
