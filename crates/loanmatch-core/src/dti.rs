use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanMatchError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LoanMatchResult;

// ---------------------------------------------------------------------------
// Program thresholds
// ---------------------------------------------------------------------------

const CONVENTIONAL_FRONT_END_MAX: Decimal = dec!(28);
const CONVENTIONAL_BACK_END_MAX: Decimal = dec!(43);
const FHA_FRONT_END_MAX: Decimal = dec!(31);
const FHA_BACK_END_MAX: Decimal = dec!(43);
/// VA underwrites on the back-end ratio alone.
const VA_BACK_END_MAX: Decimal = dec!(41);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Monthly income, housing expenses, and recurring debts. Every line item is
/// optional; absent means zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DtiInput {
    pub monthly_gross_income: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_monthly_income: Option<Money>,

    // Housing expense line items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_and_interest: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_tax: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homeowners_insurance: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoa_dues: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mortgage_insurance: Option<Money>,

    // Recurring debt line items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_loans: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card_minimums: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_loans: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_loans: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DtiAnalysis {
    /// Housing expenses / income, as a percentage.
    pub front_end_dti: Percent,
    /// (Housing + debts) / income, as a percentage.
    pub back_end_dti: Percent,
    pub total_monthly_income: Money,
    pub total_monthly_debts: Money,
    pub housing_expenses: Money,
    /// Largest housing payment that keeps every program ratio in bounds.
    pub max_housing_payment: Money,
    pub qualifies_conventional: bool,
    pub qualifies_fha: bool,
    pub qualifies_va: bool,
    pub recommendation: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute front-end and back-end DTI, test the three program thresholds
/// (boundary values qualify), and solve for the maximum affordable payment.
pub fn analyze_dti(input: &DtiInput) -> LoanMatchResult<ComputationOutput<DtiAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let total_monthly_income =
        input.monthly_gross_income + input.other_monthly_income.unwrap_or(Decimal::ZERO);

    let housing_expenses = input.principal_and_interest.unwrap_or(Decimal::ZERO)
        + input.property_tax.unwrap_or(Decimal::ZERO)
        + input.homeowners_insurance.unwrap_or(Decimal::ZERO)
        + input.hoa_dues.unwrap_or(Decimal::ZERO)
        + input.mortgage_insurance.unwrap_or(Decimal::ZERO);

    let total_monthly_debts = input.auto_loans.unwrap_or(Decimal::ZERO)
        + input.credit_card_minimums.unwrap_or(Decimal::ZERO)
        + input.student_loans.unwrap_or(Decimal::ZERO)
        + input.other_loans.unwrap_or(Decimal::ZERO);

    let front_end_dti = housing_expenses / total_monthly_income * dec!(100);
    let back_end_dti = (housing_expenses + total_monthly_debts) / total_monthly_income * dec!(100);

    let qualifies_conventional =
        front_end_dti <= CONVENTIONAL_FRONT_END_MAX && back_end_dti <= CONVENTIONAL_BACK_END_MAX;
    let qualifies_fha = front_end_dti <= FHA_FRONT_END_MAX && back_end_dti <= FHA_BACK_END_MAX;
    let qualifies_va = back_end_dti <= VA_BACK_END_MAX;

    // Binding constraint across the program caps: the two front-end limits
    // and the back-end limit net of existing debts.
    let conventional_front_cap = total_monthly_income * dec!(0.28);
    let fha_front_cap = total_monthly_income * dec!(0.31);
    let back_end_cap = total_monthly_income * dec!(0.43) - total_monthly_debts;
    let max_housing_payment = conventional_front_cap.min(fha_front_cap).min(back_end_cap);

    if max_housing_payment < Decimal::ZERO {
        warnings.push(
            "Existing debts exhaust the back-end cap — no housing payment fits any program".into(),
        );
    }
    if back_end_dti > dec!(50) {
        warnings.push(format!(
            "Back-end DTI of {back_end_dti:.1}% is severely elevated"
        ));
    }

    let recommendation = recommend(qualifies_conventional, qualifies_fha, qualifies_va);

    let analysis = DtiAnalysis {
        front_end_dti,
        back_end_dti,
        total_monthly_income,
        total_monthly_debts,
        housing_expenses,
        max_housing_payment,
        qualifies_conventional,
        qualifies_fha,
        qualifies_va,
        recommendation,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Debt-to-Income Analysis (conventional / FHA / VA thresholds)",
        input,
        warnings,
        elapsed,
        analysis,
    ))
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// First match wins, strongest program first.
fn recommend(conventional: bool, fha: bool, va: bool) -> String {
    if conventional {
        "Qualifies for conventional financing — the best rates available".into()
    } else if fha {
        "Qualifies for FHA financing".into()
    } else if va {
        "May qualify for VA financing (eligible veterans and service members)".into()
    } else {
        "Debt-to-income is too high — reduce monthly debt or increase income".into()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &DtiInput) -> LoanMatchResult<()> {
    let total_income =
        input.monthly_gross_income + input.other_monthly_income.unwrap_or(Decimal::ZERO);
    if total_income <= Decimal::ZERO {
        return Err(LoanMatchError::InvalidInput {
            field: "monthly_gross_income".into(),
            reason: "Total monthly income must be positive".into(),
        });
    }

    let line_items = [
        ("other_monthly_income", input.other_monthly_income),
        ("principal_and_interest", input.principal_and_interest),
        ("property_tax", input.property_tax),
        ("homeowners_insurance", input.homeowners_insurance),
        ("hoa_dues", input.hoa_dues),
        ("mortgage_insurance", input.mortgage_insurance),
        ("auto_loans", input.auto_loans),
        ("credit_card_minimums", input.credit_card_minimums),
        ("student_loans", input.student_loans),
        ("other_loans", input.other_loans),
    ];
    for (field, value) in line_items {
        if let Some(v) = value {
            if v < Decimal::ZERO {
                return Err(LoanMatchError::InvalidInput {
                    field: field.into(),
                    reason: "Line items cannot be negative".into(),
                });
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
