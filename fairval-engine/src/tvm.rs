//! Time-value-of-money primitives.
//!
//! Rates are percentages (`10.0` means 10%). Rounding happens at the points
//! documented on each function and nowhere else.

use tracing::trace;

use crate::error::{EngineError, Result};
use crate::series::round_to;

/// Hard cap on NPV evaluations during the IRR search.
pub const IRR_MAX_EVALUATIONS: usize = 1000;

fn growth_factor(rate_pct: f64) -> f64 {
    1.0 + rate_pct / 100.0
}

/// Present value of `cash_flow` received `periods` from now, 2 decimals.
pub fn pv(rate_pct: f64, cash_flow: f64, periods: f64) -> f64 {
    round_to(cash_flow / growth_factor(rate_pct).powf(periods), 2)
}

/// Future value of `cf0` after `periods`, 2 decimals.
pub fn fv(rate_pct: f64, cf0: f64, periods: f64) -> f64 {
    round_to(cf0 * growth_factor(rate_pct).powf(periods), 2)
}

/// Gordon growth terminal value, rounded to the nearest integer.
///
/// Meaningless when `discount_pct <= growth_pct`; not guarded.
pub fn tv(growth_pct: f64, discount_pct: f64, final_cash_flow: f64) -> f64 {
    let g = growth_pct / 100.0;
    let d = discount_pct / 100.0;
    round_to(final_cash_flow * (1.0 + g) / (d - g), 0)
}

/// Net present value with the first flow at t = 0. Unrounded.
pub fn npv(rate_pct: f64, cash_flows: &[f64]) -> f64 {
    let factor = growth_factor(rate_pct);
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / factor.powi(t as i32))
        .sum()
}

/// Internal rate of return (%), 2 decimals.
///
/// Coarse-then-fine search assuming NPV falls as the rate rises: from 100%,
/// step up by 100 points while NPV is positive, then down by 1 point while
/// NPV is negative, and report one point above where the descent stopped.
/// The answer therefore has 1-point resolution.
pub fn irr(cash_flows: &[f64]) -> Result<f64> {
    let (rate, evaluations) = irr_search(cash_flows)?;
    trace!(rate, evaluations, "IRR search settled");
    Ok(round_to(rate + 1.0, 2))
}

/// Rate where the descent stopped, and the NPV evaluations spent.
fn irr_search(cash_flows: &[f64]) -> Result<(f64, usize)> {
    let has_inflow = cash_flows.iter().any(|cf| *cf > 0.0);
    let has_outflow = cash_flows.iter().any(|cf| *cf < 0.0);
    if !has_inflow || !has_outflow {
        return Err(EngineError::InvalidCashFlowSigns);
    }

    let mut evaluations = 0usize;
    let mut npv_at = |rate: f64| -> Result<f64> {
        evaluations += 1;
        if evaluations > IRR_MAX_EVALUATIONS {
            return Err(EngineError::NoConvergence {
                evaluations: IRR_MAX_EVALUATIONS,
            });
        }
        Ok(npv(rate, cash_flows))
    };

    let mut rate = 100.0;
    // the value at the coarse stopping point seeds the fine search
    let mut value = npv_at(rate)?;
    while value > 0.0 {
        rate += 100.0;
        value = npv_at(rate)?;
    }
    while value < 0.0 {
        rate -= 1.0;
        value = npv_at(rate)?;
    }

    Ok((rate, evaluations))
}

/// Compound annual growth rate (%), 2 decimals.
pub fn cagr(begin: f64, end: f64, periods: f64) -> f64 {
    round_to(((end / begin).powf(1.0 / periods) - 1.0) * 100.0, 2)
}

/// `fv` at every period from 0 to `periods` inclusive.
///
/// Index 0 is `value0` (rounded to 2 decimals); length is `periods + 1`.
pub fn forecast(rate_pct: f64, value0: f64, periods: usize) -> Vec<f64> {
    (0..=periods)
        .map(|i| fv(rate_pct, value0, i as f64))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
