//! Dividend scorecard and capital allocation over realistic histories.

use fairval_engine::series::{clean_series, monotone_check};
use fairval_engine::{
    classify_allocation, dividend_scorecard, CashAllocationResult, DividendScorecardInput,
    FundamentalPeriod,
};

fn input(dividends_per_share: Vec<f64>, retained_earnings: Vec<f64>) -> DividendScorecardInput {
    DividendScorecardInput {
        dividends_per_share,
        retained_earnings,
        ..Default::default()
    }
}

// ============================================================================
// Dividend scorecard
// ============================================================================

#[test]
fn test_strong_dividend_payer() {
    let mut input = input(
        vec![100.0, 110.0, 121.0, 133.1, 146.41, 234.256],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    );
    input.cash_flow_from_operations = 300.0;
    input.dividends_paid = 100.0;
    input.current_ratio = 2.0;
    input.debt_to_equity = 0.5;
    input.payout_ratio = 0.4;
    input.dividend_yield = 0.03;

    let result = dividend_scorecard(&input);
    // relative changes of 10, 10, 10, 10, 60 have stddev equal to their mean
    assert_eq!(result.stability, 10.0);
    assert_eq!(result.increasing_dividends, 10.0);
    assert_eq!(result.dividend_history, 10.0);
    assert_eq!(result.safety, 9.0);
    assert_eq!(result.score, 10.0);
    assert_eq!(result.dividend_yield_percent, 3.0);
}

#[test]
fn test_constant_growth_scores_zero_stability() {
    // steady 10% raises give volatility 1, not 0
    let result = dividend_scorecard(&input(
        vec![1.0, 1.1, 1.21, 1.331],
        vec![1.0, 1.0, 1.0, 1.0],
    ));
    assert_eq!(result.stability, 0.0);
    assert_eq!(result.increasing_dividends, 10.0);
    assert_eq!(result.dividend_history, 10.0);
    assert_eq!(result.safety, 5.0);
    assert_eq!(result.score, 6.0);
}

#[test]
fn test_late_initiator_from_periods() {
    let dps = [0.0, 0.0, 1.0, 1.0, 1.5, 2.0];
    let retained = [500.0, 550.0, 540.0, 600.0, 650.0, 700.0];
    let mut periods: Vec<FundamentalPeriod> = dps
        .iter()
        .zip(retained)
        .map(|(dps, retained_earnings)| FundamentalPeriod {
            dividend_per_share: *dps,
            retained_earnings,
            ..Default::default()
        })
        .collect();
    if let Some(latest) = periods.last_mut() {
        latest.cash_flow_from_operations = 300.0;
        latest.dividends_paid = -100.0;
        latest.net_income = 200.0;
        latest.current_assets = 300.0;
        latest.current_liabilities = 200.0;
        latest.total_debt = 1000.0;
        latest.total_equity = 500.0;
    }

    let input = DividendScorecardInput::from_periods(&periods, Some(2.0 / 0.0345));
    let result = dividend_scorecard(&input);

    assert_eq!(result.dividend_history, 7.0);
    assert_eq!(result.increasing_dividends, 5.0);
    assert_eq!(result.stability, 7.0);
    assert_eq!(result.safety, 7.0);
    assert_eq!(result.score, 7.0);
    assert_eq!(result.dividend_yield_percent, 3.45);
}

#[test]
fn test_no_dividend_history() {
    let result = dividend_scorecard(&input(vec![0.0, 0.0, 0.0], vec![]));
    assert_eq!(result.dividend_history, 0.0);
    assert_eq!(result.increasing_dividends, 0.0);
    // no changes to measure, so volatility is 0
    assert_eq!(result.stability, 10.0);
}

#[test]
fn test_series_helpers_at_the_edges() {
    assert_eq!(monotone_check(&[]), 0);
    assert_eq!(monotone_check(&[0.0, 1.0, 2.0]), 2);
    assert_eq!(monotone_check(&[3.0, 2.0, 1.0]), 1);

    assert!(clean_series(&[0.0, 0.0]).is_empty());
    assert_eq!(clean_series(&[0.0, 2.0, 0.0, 3.0]), vec![2.0, 0.0, 3.0]);
}

// ============================================================================
// Capital allocation
// ============================================================================

#[test]
fn test_allocation_shares_sum_to_hundred() {
    let cases = [
        (-1_000.0, 400.0, 300.0),
        (-250.0, 250.0, 0.0),
        (-90.0, 10.0, 35.0),
        (-3.0, 1.0, 1.0),
    ];
    for (ncfi, capex, rnd) in cases {
        let result = classify_allocation(ncfi, capex, rnd);
        assert!(
            (result.total() - 100.0).abs() <= 0.02,
            "({ncfi}, {capex}, {rnd}) summed to {}",
            result.total()
        );
        assert!(result.acquisitions_percent >= 0.0);
    }
}

#[test]
fn test_allocation_from_period() {
    let period = FundamentalPeriod {
        net_cash_flow_investing: -1_000.0,
        capital_expenditure: 400.0,
        research_and_development: 300.0,
        ..Default::default()
    };
    let result = CashAllocationResult::from_period(&period);
    assert_eq!(result.capex_percent, 30.77);
    assert_eq!(result.rnd_percent, 23.08);
    assert_eq!(result.acquisitions_percent, 46.15);
}
