use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanMatchError;
use crate::types::{with_metadata, ComputationOutput, LoanProgram, Money, Percent, UsState};
use crate::LoanMatchResult;

// ---------------------------------------------------------------------------
// Fee schedule
// ---------------------------------------------------------------------------

const APPLICATION_FEE: Decimal = dec!(300);
const UNDERWRITING_FEE: Decimal = dec!(500);
const PROCESSING_FEE: Decimal = dec!(400);
const CREDIT_REPORT_FEE: Decimal = dec!(50);

const TITLE_SEARCH_FEE: Decimal = dec!(200);
const TITLE_INSURANCE_RATE: Decimal = dec!(0.005);
const ESCROW_FEE: Decimal = dec!(500);

const RECORDING_FEE: Decimal = dec!(125);

const ANNUAL_HOMEOWNERS_INSURANCE: Decimal = dec!(1500);
/// Annual property tax rate; six months are collected at closing.
const PROPERTY_TAX_RATE: Decimal = dec!(0.012);
/// Days of prepaid interest. Fixed assumption: mid-month closing on a
/// 30-day month, not a real calendar computation.
const PREPAID_INTEREST_DAYS: Decimal = dec!(15);

const HOME_INSPECTION_FEE: Decimal = dec!(400);
const SURVEY_FEE: Decimal = dec!(400);
const ATTORNEY_FEE: Decimal = dec!(1500);

/// Origination charge as a fraction of the loan amount.
fn origination_rate(program: LoanProgram) -> Decimal {
    match program {
        LoanProgram::Fha => dec!(0.01),
        LoanProgram::Conventional | LoanProgram::Va | LoanProgram::Usda => dec!(0.005),
    }
}

/// VA borrowers are exempt from the application fee.
fn application_fee(program: LoanProgram) -> Money {
    match program {
        LoanProgram::Va => Decimal::ZERO,
        _ => APPLICATION_FEE,
    }
}

/// FHA appraisals run higher than the standard panel fee.
fn appraisal_fee(program: LoanProgram) -> Money {
    match program {
        LoanProgram::Fha => dec!(500),
        _ => dec!(450),
    }
}

/// Transfer tax as a fraction of the sale price, by closing state.
fn transfer_tax_rate(state: UsState) -> Decimal {
    match state {
        UsState::California => dec!(0.0011),
        UsState::NewYork => dec!(0.004),
        UsState::Florida => dec!(0.007),
        UsState::Texas => Decimal::ZERO,
        UsState::Other => dec!(0.002),
    }
}

/// Survey requirement by state.
fn survey_fee(state: UsState) -> Money {
    match state {
        UsState::Texas | UsState::Florida => SURVEY_FEE,
        _ => Decimal::ZERO,
    }
}

/// New York closings require an attorney.
fn attorney_fee(state: UsState) -> Money {
    match state {
        UsState::NewYork => ATTORNEY_FEE,
        _ => Decimal::ZERO,
    }
}

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosingCostInput {
    pub home_price: Money,
    /// Must not exceed the home price.
    pub loan_amount: Money,
    pub loan_type: LoanProgram,
    pub state: UsState,
    /// Note rate as a whole-number percentage (7.0 = 7.0%).
    pub interest_rate_percent: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderFees {
    pub origination: Money,
    pub application: Money,
    pub underwriting: Money,
    pub processing: Money,
    pub credit_report: Money,
    pub appraisal: Money,
    pub total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleEscrowFees {
    pub title_search: Money,
    pub title_insurance: Money,
    pub escrow: Money,
    pub total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernmentFees {
    pub recording: Money,
    pub transfer_tax: Money,
    pub total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaidCosts {
    pub homeowners_insurance: Money,
    pub property_tax: Money,
    pub prepaid_interest: Money,
    pub total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherCosts {
    pub home_inspection: Money,
    pub survey: Money,
    pub attorney: Money,
    pub total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosingCostBreakdown {
    pub lender_fees: LenderFees,
    pub title_and_escrow: TitleEscrowFees,
    pub government: GovernmentFees,
    pub prepaid: PrepaidCosts,
    pub other: OtherCosts,
    /// Exact sum of the five category totals.
    pub grand_total: Money,
    pub percent_of_home_price: Percent,
    pub down_payment: Money,
    /// Down payment plus all closing costs.
    pub cash_to_close: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Estimate closing costs across the five standard categories and report
/// the cash a buyer needs to bring to the table.
pub fn estimate_closing_costs(
    input: &ClosingCostInput,
) -> LoanMatchResult<ComputationOutput<ClosingCostBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    // --- Lender fees ---
    let origination = input.loan_amount * origination_rate(input.loan_type);
    let application = application_fee(input.loan_type);
    let appraisal = appraisal_fee(input.loan_type);
    let lender_total = origination
        + application
        + UNDERWRITING_FEE
        + PROCESSING_FEE
        + CREDIT_REPORT_FEE
        + appraisal;
    let lender_fees = LenderFees {
        origination,
        application,
        underwriting: UNDERWRITING_FEE,
        processing: PROCESSING_FEE,
        credit_report: CREDIT_REPORT_FEE,
        appraisal,
        total: lender_total,
    };

    // --- Title and escrow ---
    let title_insurance = input.home_price * TITLE_INSURANCE_RATE;
    let title_total = TITLE_SEARCH_FEE + title_insurance + ESCROW_FEE;
    let title_and_escrow = TitleEscrowFees {
        title_search: TITLE_SEARCH_FEE,
        title_insurance,
        escrow: ESCROW_FEE,
        total: title_total,
    };

    // --- Government fees ---
    let transfer_tax = input.home_price * transfer_tax_rate(input.state);
    let government_total = RECORDING_FEE + transfer_tax;
    let government = GovernmentFees {
        recording: RECORDING_FEE,
        transfer_tax,
        total: government_total,
    };

    // --- Prepaid costs ---
    let property_tax = input.home_price * PROPERTY_TAX_RATE / dec!(2);
    let daily_interest = input.loan_amount * (input.interest_rate_percent / dec!(100)) / dec!(365);
    let prepaid_interest = daily_interest * PREPAID_INTEREST_DAYS;
    let prepaid_total = ANNUAL_HOMEOWNERS_INSURANCE + property_tax + prepaid_interest;
    let prepaid = PrepaidCosts {
        homeowners_insurance: ANNUAL_HOMEOWNERS_INSURANCE,
        property_tax,
        prepaid_interest,
        total: prepaid_total,
    };

    // --- Other ---
    let survey = survey_fee(input.state);
    let attorney = attorney_fee(input.state);
    let other_total = HOME_INSPECTION_FEE + survey + attorney;
    let other = OtherCosts {
        home_inspection: HOME_INSPECTION_FEE,
        survey,
        attorney,
        total: other_total,
    };

    // --- Totals ---
    let grand_total = lender_total + title_total + government_total + prepaid_total + other_total;
    let percent_of_home_price = grand_total / input.home_price * dec!(100);
    let down_payment = input.home_price - input.loan_amount;
    let cash_to_close = down_payment + grand_total;

    if percent_of_home_price > dec!(6) {
        warnings.push(format!(
            "Closing costs are {percent_of_home_price:.2}% of the purchase price — above the typical 2-6% range"
        ));
    }

    let breakdown = ClosingCostBreakdown {
        lender_fees,
        title_and_escrow,
        government,
        prepaid,
        other,
        grand_total,
        percent_of_home_price,
        down_payment,
        cash_to_close,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Closing Cost Estimate (itemized fee schedule)",
        input,
        warnings,
        elapsed,
        breakdown,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &ClosingCostInput) -> LoanMatchResult<()> {
    if input.home_price <= Decimal::ZERO {
        return Err(LoanMatchError::InvalidInput {
            field: "home_price".into(),
            reason: "Home price must be positive".into(),
        });
    }
    if input.loan_amount <= Decimal::ZERO {
        return Err(LoanMatchError::InvalidInput {
            field: "loan_amount".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if input.loan_amount > input.home_price {
        return Err(LoanMatchError::InvalidInput {
            field: "loan_amount".into(),
            reason: "Loan amount cannot exceed the home price".into(),
        });
    }
    if input.interest_rate_percent < Decimal::ZERO {
        return Err(LoanMatchError::InvalidInput {
            field: "interest_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
