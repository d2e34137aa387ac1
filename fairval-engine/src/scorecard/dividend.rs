//! Dividend Scorecard.
//!
//! Scores dividend safety, stability and track record from historical DPS,
//! retained earnings and latest-period balance-sheet ratios.
//!
//! | Sub-score | Formula (0-1) | Safety weight |
//! |-----------|---------------|---------------|
//! | Payout | 1 - payout, 0 outside [0, 1] | 3 |
//! | Current ratio | min(1, ratio / 2) | 3 |
//! | CFO coverage | min(1, NCFO / dividends / 2) | 2 |
//! | Debt / equity | min(1, 1 / (D/E)) | 2 |
//! | Retained earnings growth | rises / years | 1 |

use tracing::debug;

use crate::series::{
    average, change, clean_series, monotone_check, round_to, volatility, weighted_average,
};
use crate::types::{DividendScorecardInput, FundamentalPeriod, ScorecardResult};

/// Weights for payout, current ratio, CFO coverage, D/E, RE growth.
pub const SAFETY_WEIGHTS: [f64; 5] = [3.0, 3.0, 2.0, 2.0, 1.0];

/// Current ratio that earns a full score.
pub const TARGET_CURRENT_RATIO: f64 = 2.0;

/// Operating cash flow / dividends coverage that earns a full score.
pub const TARGET_CFO_COVERAGE: f64 = 2.0;

pub fn payout_score(payout_ratio: f64) -> f64 {
    if (0.0..=1.0).contains(&payout_ratio) {
        1.0 - payout_ratio
    } else {
        0.0
    }
}

pub fn current_ratio_score(current_ratio: f64) -> f64 {
    if current_ratio < 0.0 {
        return 0.0;
    }
    (current_ratio / TARGET_CURRENT_RATIO).min(1.0)
}

pub fn cfo_coverage_score(cash_flow_from_operations: f64, dividends_paid: f64) -> f64 {
    if dividends_paid <= 0.0 {
        return if cash_flow_from_operations > 0.0 { 1.0 } else { 0.0 };
    }
    if cash_flow_from_operations <= 0.0 {
        return 0.0;
    }
    (cash_flow_from_operations / dividends_paid / TARGET_CFO_COVERAGE).min(1.0)
}

pub fn debt_to_equity_score(debt_to_equity: f64) -> f64 {
    if debt_to_equity < 0.0 {
        0.0
    } else if debt_to_equity == 0.0 {
        1.0
    } else {
        (1.0 / debt_to_equity).min(1.0)
    }
}

/// Share of `years` accounted for by `count`; 0 when there is no history.
fn per_year(count: usize, years: usize) -> f64 {
    if years == 0 {
        0.0
    } else {
        count as f64 / years as f64
    }
}

fn to_scale(sub_score: f64) -> f64 {
    round_to(sub_score, 1) * 10.0
}

/// Compute the dividend scorecard.
///
/// `years` is the length of the DPS history; every history-based sub-score
/// is 0 when it is empty.
pub fn dividend_scorecard(input: &DividendScorecardInput) -> ScorecardResult {
    let dps = &input.dividends_per_share;
    let years = dps.len();

    let sub_scores = [
        payout_score(input.payout_ratio),
        current_ratio_score(input.current_ratio),
        cfo_coverage_score(input.cash_flow_from_operations, input.dividends_paid),
        debt_to_equity_score(input.debt_to_equity),
        per_year(monotone_check(&input.retained_earnings), years),
    ];
    let safety = weighted_average(&sub_scores, &SAFETY_WEIGHTS);

    let cleaned = clean_series(dps);
    let dividend_history = per_year(cleaned.len(), years);
    let increasing_dividends = per_year(monotone_check(dps), years);
    // f64::max drops a NaN volatility, leaving 0. There is no upper clamp:
    // falling dividends give a negative mean change and a stability above 1.
    let stability = (1.0 - volatility(&change(&cleaned, true))).max(0.0);

    let score = average(&[safety, stability, increasing_dividends, dividend_history]);

    debug!(
        years,
        safety, stability, increasing_dividends, dividend_history, score, "Dividend scorecard"
    );

    ScorecardResult {
        score: to_scale(score),
        safety: to_scale(safety),
        stability: to_scale(stability),
        increasing_dividends: to_scale(increasing_dividends),
        dividend_history: to_scale(dividend_history),
        dividend_yield_percent: round_to(input.dividend_yield * 100.0, 2),
    }
}

impl DividendScorecardInput {
    /// Build scorecard inputs from chronological periods.
    ///
    /// Ratios come from the latest period; the yield uses its DPS over
    /// `price` and is 0 without a positive price.
    pub fn from_periods(periods: &[FundamentalPeriod], price: Option<f64>) -> Self {
        let Some(latest) = periods.last() else {
            return Self::default();
        };

        let dividend_yield = match price {
            Some(price) if price > 0.0 => latest.dividend_per_share / price,
            _ => 0.0,
        };

        Self {
            dividends_per_share: periods.iter().map(|p| p.dividend_per_share).collect(),
            retained_earnings: periods.iter().map(|p| p.retained_earnings).collect(),
            cash_flow_from_operations: latest.cash_flow_from_operations,
            dividends_paid: latest.dividends_paid.abs(),
            current_ratio: latest.current_ratio(),
            debt_to_equity: latest.debt_to_equity(),
            payout_ratio: latest.payout_ratio(),
            dividend_yield,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
