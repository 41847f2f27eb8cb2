//! Mortgage calculation engine for the loanmatch brokerage site.
//!
//! Five independent, stateless calculators share one amortization formula:
//! fixed-rate monthly payment, closing cost estimation, debt-to-income
//! analysis, refinance comparison, and a rent-vs-buy projection. All math in
//! `rust_decimal::Decimal`; every engine validates its inputs and returns a
//! `ComputationOutput` envelope or a `LoanMatchError`.

pub mod amortization;
pub mod closing_costs;
pub mod dti;
pub mod error;
pub mod refinance;
pub mod rent_vs_buy;
pub mod types;

pub use error::LoanMatchError;
pub use types::*;

/// Standard result type for all loanmatch operations
pub type LoanMatchResult<T> = Result<T, LoanMatchError>;
