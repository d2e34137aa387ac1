//! Property tests for the time-value-of-money primitives and the forecaster.

use fairval_engine::forecast::forecast_fcf;
use fairval_engine::tvm::{cagr, fv, irr, npv, pv};
use proptest::prelude::*;

proptest! {
    #[test]
    fn pv_undoes_fv(rate in 0.0f64..20.0, periods in 0u32..10, amount in 1.0f64..1_000_000.0) {
        let n = f64::from(periods);
        let back = pv(rate, fv(rate, amount, n), n);
        // two 2-decimal roundings
        prop_assert!((back - amount).abs() <= 0.011, "{amount} -> {back}");
    }

    #[test]
    fn fv_at_cagr_reaches_end(
        begin in 1.0f64..10_000.0,
        factor in 0.5f64..3.0,
        periods in 1u32..10,
    ) {
        let end = begin * factor;
        let n = f64::from(periods);
        let reached = fv(cagr(begin, end, n), begin, n);
        // CAGR is rounded to 0.01 points before compounding
        let tolerance = end * 1e-3 + 0.01;
        prop_assert!((reached - end).abs() <= tolerance, "{end} vs {reached}");
    }

    #[test]
    fn irr_brackets_the_root(
        investment in 10.0f64..1_000.0,
        inflows in prop::collection::vec(10.0f64..1_000.0, 1..6),
    ) {
        let mut cash_flows = vec![-investment];
        cash_flows.extend(inflows);

        let rate = irr(&cash_flows).unwrap();
        prop_assert!(npv(rate - 1.0, &cash_flows) >= 0.0);
        prop_assert!(npv(rate, &cash_flows) < 0.0);
    }

    #[test]
    fn forecast_has_horizon_entries(
        start in 100.0f64..10_000.0,
        growth in 1.0f64..1.3,
        margin in 0.01f64..0.3,
        years in 2usize..8,
        horizon in 1usize..10,
    ) {
        let revenues: Vec<f64> = (0..years).map(|i| start * growth.powi(i as i32)).collect();
        let fcfs: Vec<f64> = revenues.iter().map(|r| r * margin).collect();

        let projected = forecast_fcf(&revenues, &fcfs, horizon, None);
        prop_assert_eq!(projected.len(), horizon);
        // non-decreasing revenue at a positive margin never projects a loss
        prop_assert!(projected.iter().all(|v| *v > 0.0));
        prop_assert!(projected.windows(2).all(|w| w[1] >= w[0]));
    }
}

#[test]
fn irr_of_simple_project() {
    assert_eq!(irr(&[-100.0, 60.0, 60.0]).unwrap(), 14.0);
}

#[test]
fn irr_requires_both_signs() {
    assert!(irr(&[100.0, 50.0]).is_err());
    assert!(irr(&[-100.0, -50.0]).is_err());
    assert!(irr(&[]).is_err());
}
