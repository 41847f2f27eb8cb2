use loanmatch_core::rent_vs_buy::{
    project_rent_vs_buy, RentVsBuyInput, RentVsBuyRecommendation,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Rent vs. buy projector tests
// ===========================================================================

fn first_time_buyer() -> RentVsBuyInput {
    RentVsBuyInput {
        home_price: dec!(400000),
        down_payment_percent: dec!(20),
        annual_rate_percent: dec!(6.5),
        monthly_rent: dec!(2200),
        annual_rent_increase_percent: dec!(3),
        annual_appreciation_percent: dec!(4),
        years_to_analyze: 7,
        property_tax_rate_percent: dec!(1.1),
        annual_insurance: dec!(1400),
        monthly_hoa: Decimal::ZERO,
        annual_maintenance_percent: dec!(1),
        closing_costs: dec!(8000),
    }
}

#[test]
fn test_projection_identities() {
    let result = project_rent_vs_buy(&first_time_buyer()).unwrap();
    let p = &result.result;

    assert_eq!(p.net_buying_cost, p.total_ownership_cost - p.home_equity);
    assert_eq!(p.net_difference, p.total_rent_paid - p.net_buying_cost);
    assert_eq!(p.year_by_year.len(), 7);

    // Within the year-by-year schedule the same identities hold per year
    for year in &p.year_by_year {
        assert_eq!(
            year.net_ownership_cost,
            year.cumulative_ownership_cost - year.home_equity
        );
        assert_eq!(year.home_equity, year.home_value - year.loan_balance);
    }
}

#[test]
fn test_schedule_is_cumulative_and_monotonic() {
    let result = project_rent_vs_buy(&first_time_buyer()).unwrap();
    let years = &result.result.year_by_year;

    for pair in years.windows(2) {
        assert!(pair[1].cumulative_rent > pair[0].cumulative_rent);
        assert!(pair[1].cumulative_ownership_cost > pair[0].cumulative_ownership_cost);
        assert!(pair[1].loan_balance < pair[0].loan_balance);
        assert!(pair[1].home_value > pair[0].home_value);
    }
}

#[test]
fn test_total_rent_with_annual_increases() {
    let result = project_rent_vs_buy(&first_time_buyer()).unwrap();
    let p = &result.result;

    // Rent compounds 3% at each year boundary
    let mut expected = Decimal::ZERO;
    let mut rent = dec!(2200);
    for _ in 0..7 {
        expected += rent * dec!(12);
        rent *= dec!(1.03);
    }
    assert_eq!(p.total_rent_paid, expected);
}

#[test]
fn test_appreciation_monotonicity_over_grid() {
    // Equity at the horizon must never fall as appreciation rises
    let mut previous = None;
    for appreciation in [0u32, 1, 2, 3, 4, 5, 6, 8, 10] {
        let mut input = first_time_buyer();
        input.annual_appreciation_percent = Decimal::from(appreciation);
        let equity = project_rent_vs_buy(&input).unwrap().result.home_equity;

        if let Some(prev) = previous {
            assert!(
                equity > prev,
                "equity fell when appreciation rose to {appreciation}%"
            );
        }
        previous = Some(equity);
    }
}

#[test]
fn test_break_even_found_is_at_most_30() {
    let result = project_rent_vs_buy(&first_time_buyer()).unwrap();
    if let Some(year) = result.result.break_even_year {
        assert!((1..=30).contains(&year));
    }
}

#[test]
fn test_break_even_independent_of_horizon() {
    // The search runs through year 30 no matter how short the analysis is
    let mut short = first_time_buyer();
    short.years_to_analyze = 1;
    let mut long = first_time_buyer();
    long.years_to_analyze = 30;

    let short_year = project_rent_vs_buy(&short).unwrap().result.break_even_year;
    let long_year = project_rent_vs_buy(&long).unwrap().result.break_even_year;
    assert_eq!(short_year, long_year);
}

#[test]
fn test_every_scenario_maps_to_one_recommendation() {
    let rents = [dec!(800), dec!(1500), dec!(2200), dec!(3500), dec!(5000)];
    let appreciations = [dec!(0), dec!(3), dec!(6)];

    for rent in rents {
        for appreciation in appreciations {
            let mut input = first_time_buyer();
            input.monthly_rent = rent;
            input.annual_appreciation_percent = appreciation;
            let p = project_rent_vs_buy(&input).unwrap().result;

            // Exactly one of the three labels, consistent with the numbers
            let band = dec!(400000) * dec!(0.10);
            let expected = if p.net_difference > band {
                RentVsBuyRecommendation::Buy
            } else if p.net_difference < -band {
                RentVsBuyRecommendation::Rent
            } else {
                RentVsBuyRecommendation::TooCloseToCall
            };
            assert_eq!(
                p.recommendation, expected,
                "rent={rent} appreciation={appreciation}"
            );
        }
    }
}

#[test]
fn test_high_rent_strong_market_says_buy() {
    let mut input = first_time_buyer();
    input.monthly_rent = dec!(5000);
    input.annual_appreciation_percent = dec!(6);
    let p = project_rent_vs_buy(&input).unwrap().result;

    assert_eq!(p.recommendation, RentVsBuyRecommendation::Buy);
    assert!(p.break_even_year.is_some());
}

#[test]
fn test_cheap_rent_flat_market_says_rent() {
    let mut input = first_time_buyer();
    input.monthly_rent = dec!(800);
    input.annual_rent_increase_percent = Decimal::ZERO;
    input.annual_appreciation_percent = Decimal::ZERO;
    let p = project_rent_vs_buy(&input).unwrap().result;

    assert_eq!(p.recommendation, RentVsBuyRecommendation::Rent);
    assert_eq!(p.break_even_year, None);
}

#[test]
fn test_invalid_horizons_rejected() {
    for years in [0u32, 31, 100] {
        let mut input = first_time_buyer();
        input.years_to_analyze = years;
        assert!(project_rent_vs_buy(&input).is_err(), "accepted {years}");
    }
}
