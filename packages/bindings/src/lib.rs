use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_payment(input_json: String) -> NapiResult<String> {
    let terms: loanmatch_core::amortization::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loanmatch_core::amortization::analyze_payment(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn payment_schedule(input_json: String) -> NapiResult<String> {
    let terms: loanmatch_core::amortization::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule = loanmatch_core::amortization::payment_schedule(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Closing costs
// ---------------------------------------------------------------------------

#[napi]
pub fn estimate_closing_costs(input_json: String) -> NapiResult<String> {
    let input: loanmatch_core::closing_costs::ClosingCostInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loanmatch_core::closing_costs::estimate_closing_costs(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// DTI
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_dti(input_json: String) -> NapiResult<String> {
    let input: loanmatch_core::dti::DtiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loanmatch_core::dti::analyze_dti(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Refinance
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_refinance(input_json: String) -> NapiResult<String> {
    let input: loanmatch_core::refinance::RefinanceInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loanmatch_core::refinance::analyze_refinance(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rent vs. buy
// ---------------------------------------------------------------------------

#[napi]
pub fn project_rent_vs_buy(input_json: String) -> NapiResult<String> {
    let input: loanmatch_core::rent_vs_buy::RentVsBuyInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loanmatch_core::rent_vs_buy::project_rent_vs_buy(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
