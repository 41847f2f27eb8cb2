use loanmatch_core::amortization::{
    analyze_payment, balance_after, monthly_payment, payment_schedule, LoanTerms,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Amortization formula tests
// ===========================================================================

fn terms(principal: Decimal, rate: Decimal, months: u32) -> LoanTerms {
    LoanTerms {
        principal,
        annual_rate_percent: rate,
        term_months: months,
    }
}

#[test]
fn test_textbook_payment_values() {
    // $300k at 6% / 30yr => $1,798.65
    let p = monthly_payment(&terms(dec!(300000), dec!(6), 360)).unwrap();
    assert!((p - dec!(1798.65)).abs() < dec!(0.01), "got {p}");

    // $200k at 5% / 15yr => $1,581.59
    let p = monthly_payment(&terms(dec!(200000), dec!(5), 180)).unwrap();
    assert!((p - dec!(1581.59)).abs() < dec!(0.01), "got {p}");

    // $450k at 7.25% / 30yr => $3,069.78
    let p = monthly_payment(&terms(dec!(450000), dec!(7.25), 360)).unwrap();
    assert!((p - dec!(3069.78)).abs() < dec!(0.05), "got {p}");
}

#[test]
fn test_zero_rate_payment_is_exact() {
    let p = monthly_payment(&terms(dec!(300000), Decimal::ZERO, 360)).unwrap();
    assert_eq!(p, dec!(300000) / dec!(360));
}

#[test]
fn test_higher_rate_means_higher_payment() {
    let low = monthly_payment(&terms(dec!(300000), dec!(5), 360)).unwrap();
    let high = monthly_payment(&terms(dec!(300000), dec!(7), 360)).unwrap();
    assert!(high > low);
}

#[test]
fn test_schedule_agrees_with_balance_after() {
    let loan = terms(dec!(300000), dec!(6), 360);
    let schedule = payment_schedule(&loan).unwrap();

    for checkpoint in [12u32, 60, 180, 300] {
        let from_schedule = schedule[(checkpoint - 1) as usize].balance;
        let from_formula = balance_after(&loan, checkpoint).unwrap();
        assert!(
            (from_schedule - from_formula).abs() < dec!(0.01),
            "month {checkpoint}: schedule {from_schedule} vs formula {from_formula}"
        );
    }
}

#[test]
fn test_schedule_interest_plus_principal_equals_payment() {
    let schedule = payment_schedule(&terms(dec!(250000), dec!(6.5), 360)).unwrap();
    for period in &schedule {
        assert_eq!(period.payment, period.interest + period.principal);
    }
}

#[test]
fn test_payment_summary_interest_matches_schedule() {
    let loan = terms(dec!(300000), dec!(6), 360);
    let summary = analyze_payment(&loan).unwrap().result;
    let schedule = payment_schedule(&loan).unwrap();

    let schedule_interest: Decimal = schedule.iter().map(|p| p.interest).sum();
    // The summary uses payment * term; the schedule trims the final payment,
    // so the two agree only to within one payment of drift.
    assert!(
        (summary.total_interest - schedule_interest).abs() < summary.monthly_payment,
        "summary {} vs schedule {}",
        summary.total_interest,
        schedule_interest
    );
}

#[test]
fn test_envelope_metadata_present() {
    let output = analyze_payment(&terms(dec!(300000), dec!(6), 360)).unwrap();
    assert_eq!(
        output.methodology,
        "Fixed-Rate Amortization (monthly compounding)"
    );
    assert_eq!(output.metadata.precision, "rust_decimal_128bit");
}
