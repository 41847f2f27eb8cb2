use loanmatch_core::dti::{analyze_dti, DtiInput};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// DTI analyzer tests
// ===========================================================================

/// A borrower with the full set of line items populated.
fn full_profile() -> DtiInput {
    DtiInput {
        monthly_gross_income: dec!(9000),
        other_monthly_income: Some(dec!(1000)),
        principal_and_interest: Some(dec!(2100)),
        property_tax: Some(dec!(350)),
        homeowners_insurance: Some(dec!(120)),
        hoa_dues: Some(dec!(80)),
        mortgage_insurance: Some(dec!(150)),
        auto_loans: Some(dec!(450)),
        credit_card_minimums: Some(dec!(200)),
        student_loans: Some(dec!(350)),
        other_loans: Some(dec!(100)),
    }
}

#[test]
fn test_full_profile_totals() {
    let result = analyze_dti(&full_profile()).unwrap();
    let a = &result.result;

    // Income: 9000 + 1000 = 10000
    assert_eq!(a.total_monthly_income, dec!(10000));
    // Housing: 2100 + 350 + 120 + 80 + 150 = 2800
    assert_eq!(a.housing_expenses, dec!(2800));
    // Debts: 450 + 200 + 350 + 100 = 1100
    assert_eq!(a.total_monthly_debts, dec!(1100));

    // Front-end: 2800 / 10000 = 28.0% exactly
    assert_eq!(a.front_end_dti, dec!(28));
    // Back-end: 3900 / 10000 = 39.0%
    assert_eq!(a.back_end_dti, dec!(39));
}

#[test]
fn test_boundary_values_qualify() {
    let result = analyze_dti(&full_profile()).unwrap();
    let a = &result.result;

    // 28.0 front / 39.0 back sits exactly on the conventional front-end cap
    assert!(a.qualifies_conventional);
    assert!(a.qualifies_fha);
    assert!(a.qualifies_va);
    assert!(a.recommendation.contains("conventional"));
}

#[test]
fn test_max_housing_payment_bounds() {
    let result = analyze_dti(&full_profile()).unwrap();
    let a = &result.result;

    // min(10000*0.28, 10000*0.31, 10000*0.43 - 1100) = min(2800, 3100, 3200)
    assert_eq!(a.max_housing_payment, dec!(2800));
}

#[test]
fn test_recommendation_ladder_is_ordered() {
    // Each rung: loosen until the next program catches the borrower
    let mut input = full_profile();

    // Conventional first
    let conventional = analyze_dti(&input).unwrap().result;
    assert!(conventional.recommendation.contains("conventional"));

    // Push front-end past 28 but under 31: FHA rung
    input.principal_and_interest = Some(dec!(2300)); // housing 3000 => 30%
    let fha = analyze_dti(&input).unwrap().result;
    assert!(!fha.qualifies_conventional);
    assert!(fha.recommendation.contains("FHA"));

    // Push front-end past 31 with back-end still <= 41: VA rung.
    // Debts shrink to 450 so the back-end lands at 37.0.
    input.principal_and_interest = Some(dec!(2550)); // housing 3250 => 32.5%
    input.credit_card_minimums = None;
    input.student_loans = None;
    input.other_loans = None;
    let va = analyze_dti(&input).unwrap().result;
    assert!(!va.qualifies_fha);
    assert!(va.qualifies_va);
    assert!(va.recommendation.contains("VA"));

    // Blow through every cap
    input.principal_and_interest = Some(dec!(4000));
    let none = analyze_dti(&input).unwrap().result;
    assert!(!none.qualifies_va);
    assert!(none.recommendation.contains("too high"));
}

#[test]
fn test_every_input_maps_to_exactly_one_recommendation() {
    // Sweep housing burden from light to crushing; the ladder should never
    // skip or double-match.
    for housing in [500u32, 1500, 2500, 2800, 3000, 3200, 3500, 4500, 6000] {
        let input = DtiInput {
            monthly_gross_income: dec!(10000),
            other_monthly_income: None,
            principal_and_interest: Some(Decimal::from(housing)),
            property_tax: None,
            homeowners_insurance: None,
            hoa_dues: None,
            mortgage_insurance: None,
            auto_loans: Some(dec!(500)),
            credit_card_minimums: None,
            student_loans: None,
            other_loans: None,
        };
        let a = analyze_dti(&input).unwrap().result;

        let matched = [
            a.recommendation.contains("conventional"),
            a.recommendation.contains("FHA"),
            a.recommendation.contains("VA"),
            a.recommendation.contains("too high"),
        ]
        .iter()
        .filter(|&&m| m)
        .count();
        assert_eq!(matched, 1, "housing={housing}: {}", a.recommendation);
    }
}

#[test]
fn test_zero_income_rejected_before_division() {
    let mut input = full_profile();
    input.monthly_gross_income = Decimal::ZERO;
    input.other_monthly_income = None;
    assert!(analyze_dti(&input).is_err());
}
