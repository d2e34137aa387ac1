//! DCF valuation engine.
//!
//! Produces a fair value per share from chronological fundamentals, either by
//! discounting projected free cash flow (most sectors) or projected dividends
//! per share (`"Financial"` sector).
//!
//! # Index convention
//!
//! Both paths discount entries `1..len` of the projected series, each by its
//! own index, and never include index 0. On the dividend path index 0 is the
//! last historical DPS, so this is exact. On the free-cash-flow path the
//! series is forecast-only, so the first forecast year is left out of the
//! present-value sum. That behavior is reproduced as-is and pinned by
//! regression tests.
//!
//! # Usage
//!
//! ```ignore
//! use fairval_engine::valuation::{fair_value, ValuationRequest};
//!
//! let request = ValuationRequest::new(profile, &periods, 5, 10.0, 2.5);
//! let per_share = fair_value(&request);
//! ```

use fairval_common::ValuationConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::forecast;
use crate::series::{clean_series, round_to, GrowthSummary};
use crate::tvm;
use crate::types::{FundamentalPeriod, ProjectedSeries, ValuationMethod, ValuationProfile};

/// Everything needed for one valuation.
#[derive(Debug, Clone)]
pub struct ValuationRequest<'a> {
    /// Entity identity; its sector selects the method
    pub profile: ValuationProfile,
    /// Chronological fundamentals, oldest first
    pub periods: &'a [FundamentalPeriod],
    /// Explicit forecast horizon N (years)
    pub horizon: usize,
    /// Discount rate (%)
    pub discount_rate_pct: f64,
    /// Perpetual growth rate for the terminal value (%)
    pub perpetual_growth_pct: f64,
    /// Growth rate (%) replacing the historical revenue / DPS growth
    pub override_growth_pct: Option<f64>,
    /// Caller-supplied forecast cash flows (free-cash-flow path only)
    pub explicit_forecast: Option<Vec<f64>>,
}

impl<'a> ValuationRequest<'a> {
    /// Create a request without overrides.
    pub fn new(
        profile: ValuationProfile,
        periods: &'a [FundamentalPeriod],
        horizon: usize,
        discount_rate_pct: f64,
        perpetual_growth_pct: f64,
    ) -> Self {
        Self {
            profile,
            periods,
            horizon,
            discount_rate_pct,
            perpetual_growth_pct,
            override_growth_pct: None,
            explicit_forecast: None,
        }
    }

    /// Create a request using configured defaults.
    pub fn from_config(
        profile: ValuationProfile,
        periods: &'a [FundamentalPeriod],
        config: &ValuationConfig,
    ) -> Self {
        Self::new(
            profile,
            periods,
            config.horizon_years as usize,
            config.discount_rate_pct,
            config.perpetual_growth_pct,
        )
    }

    /// Replace historical growth with a fixed rate (%).
    pub fn with_override_growth(mut self, growth_pct: f64) -> Self {
        self.override_growth_pct = Some(growth_pct);
        self
    }

    /// Use caller-supplied forecast cash flows instead of the forecaster.
    pub fn with_explicit_forecast(mut self, cash_flows: Vec<f64>) -> Self {
        self.explicit_forecast = Some(cash_flows);
        self
    }
}

/// Detailed result of a valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationBreakdown {
    /// Ticker valued
    pub ticker: String,
    /// Path taken
    pub method: ValuationMethod,
    /// Series that was discounted
    pub projected: ProjectedSeries,
    /// Growth rate (%) used to build the series, if one was derived
    pub growth_rate_pct: Option<f64>,
    /// Distribution of historical growth of the driving series
    pub historical_growth: GrowthSummary,
    /// Sum of discounted entries 1..len
    pub present_value_sum: f64,
    /// Undiscounted terminal value
    pub terminal_value: f64,
    /// Terminal value discounted back `horizon` periods
    pub discounted_terminal_value: f64,
    /// present_value_sum + discounted_terminal_value
    pub total_value: f64,
    /// Shares outstanding used (free-cash-flow path only)
    pub shares_outstanding: Option<f64>,
    /// Fair value per share (0 means "no estimate")
    pub fair_value: f64,
}

impl ValuationBreakdown {
    fn no_estimate(
        ticker: &str,
        method: ValuationMethod,
        projected: ProjectedSeries,
        growth_rate_pct: Option<f64>,
        historical_growth: GrowthSummary,
    ) -> Self {
        Self {
            ticker: ticker.to_string(),
            method,
            projected,
            growth_rate_pct,
            historical_growth,
            present_value_sum: 0.0,
            terminal_value: 0.0,
            discounted_terminal_value: 0.0,
            total_value: 0.0,
            shares_outstanding: None,
            fair_value: 0.0,
        }
    }

    /// True when the valuation produced a finite, positive fair value.
    pub fn has_estimate(&self) -> bool {
        self.fair_value.is_finite() && self.fair_value > 0.0
    }

    /// Discount of `price` to fair value, as a percent of fair value.
    ///
    /// Returns 0 when there is no positive fair value.
    pub fn margin_of_safety(&self, price: f64) -> f64 {
        if self.fair_value <= 0.0 {
            return 0.0;
        }
        round_to((self.fair_value - price) / self.fair_value * 100.0, 2)
    }
}

/// Value a company, returning the full breakdown.
pub fn value_company(request: &ValuationRequest<'_>) -> ValuationBreakdown {
    let method = request.profile.method();
    let span = fairval_common::valuation_span!(request.profile.ticker, method = %method);
    let _enter = span.enter();

    match method {
        ValuationMethod::FreeCashFlow => value_free_cash_flow(request),
        ValuationMethod::DividendDiscount => value_dividend_discount(request),
    }
}

/// Fair value per share; 0 when no estimate can be made.
pub fn fair_value(request: &ValuationRequest<'_>) -> f64 {
    value_company(request).fair_value
}

/// Present value of entries `1..len`, each discounted by its index.
fn discounted_sum(series: &[f64], discount_rate_pct: f64) -> f64 {
    series
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, cf)| tvm::pv(discount_rate_pct, *cf, i as f64))
        .sum()
}

/// Terminal value of the last entry and its value discounted `horizon` periods.
fn terminal(series: &[f64], request: &ValuationRequest<'_>) -> (f64, f64) {
    let last = series.last().copied().unwrap_or(0.0);
    let terminal_value = tvm::tv(
        request.perpetual_growth_pct,
        request.discount_rate_pct,
        last,
    );
    let discounted = tvm::pv(
        request.discount_rate_pct,
        terminal_value,
        request.horizon as f64,
    );
    (terminal_value, discounted)
}

fn usable_explicit_forecast<'r>(request: &'r ValuationRequest<'_>) -> Option<&'r [f64]> {
    request
        .explicit_forecast
        .as_deref()
        .filter(|values| values.iter().any(|v| v.is_finite()))
}

fn value_free_cash_flow(request: &ValuationRequest<'_>) -> ValuationBreakdown {
    let ticker = request.profile.ticker.as_str();
    let revenues: Vec<f64> = request.periods.iter().map(|p| p.revenue).collect();
    let historical_growth = GrowthSummary::from_series(&revenues);

    let (values, growth_rate_pct) = match usable_explicit_forecast(request) {
        Some(explicit) => {
            debug!(len = explicit.len(), "Using explicit forecast cash flows");
            (explicit.to_vec(), None)
        }
        None => {
            let growth = forecast::revenue_growth(&revenues, request.override_growth_pct);
            let values = forecast::forecast_from_periods(
                request.periods,
                request.horizon,
                request.override_growth_pct,
            );
            (values, Some(growth))
        }
    };
    let projected = ProjectedSeries::forecast_only(values);

    if projected.is_degenerate() {
        debug!("Projected cash flows empty or all zero, no estimate");
        return ValuationBreakdown::no_estimate(
            ticker,
            ValuationMethod::FreeCashFlow,
            projected,
            growth_rate_pct,
            historical_growth,
        );
    }

    let present_value_sum = discounted_sum(&projected.values, request.discount_rate_pct);
    let (terminal_value, discounted_terminal_value) = terminal(&projected.values, request);
    let total_value = present_value_sum + discounted_terminal_value;

    let shares = request
        .periods
        .last()
        .map(|p| p.shares_outstanding)
        .unwrap_or(0.0);
    let fair_value = if shares == 0.0 {
        debug!("Shares outstanding is zero, no estimate");
        0.0
    } else {
        total_value / shares
    };

    debug!(
        present_value_sum,
        terminal_value, total_value, shares, fair_value, "Free cash flow valuation complete"
    );

    ValuationBreakdown {
        ticker: ticker.to_string(),
        method: ValuationMethod::FreeCashFlow,
        projected,
        growth_rate_pct,
        historical_growth,
        present_value_sum,
        terminal_value,
        discounted_terminal_value,
        total_value,
        shares_outstanding: Some(shares),
        fair_value,
    }
}

/// Historical DPS growth (%) over the cleaned series, or the override.
pub fn dividend_growth(dividends_per_share: &[f64], override_growth_pct: Option<f64>) -> f64 {
    if let Some(growth) = override_growth_pct {
        return growth;
    }
    let cleaned = clean_series(dividends_per_share);
    match (cleaned.first(), cleaned.last()) {
        (Some(first), Some(last)) if cleaned.len() >= 2 => {
            let growth = tvm::cagr(*first, *last, (cleaned.len() - 1) as f64);
            if growth.is_finite() {
                growth
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

fn value_dividend_discount(request: &ValuationRequest<'_>) -> ValuationBreakdown {
    let ticker = request.profile.ticker.as_str();
    let dps: Vec<f64> = request
        .periods
        .iter()
        .map(|p| p.dividend_per_share)
        .collect();
    let historical_growth = GrowthSummary::from_series(&clean_series(&dps));
    let growth = dividend_growth(&dps, request.override_growth_pct);

    let projected = match dps.last() {
        Some(last) => {
            ProjectedSeries::base_inclusive(tvm::forecast(growth, *last, request.horizon))
        }
        None => ProjectedSeries::base_inclusive(Vec::new()),
    };

    if projected.is_degenerate() {
        debug!("Projected dividends empty or all zero, no estimate");
        return ValuationBreakdown::no_estimate(
            ticker,
            ValuationMethod::DividendDiscount,
            projected,
            Some(growth),
            historical_growth,
        );
    }

    let present_value_sum = discounted_sum(&projected.values, request.discount_rate_pct);
    let (terminal_value, discounted_terminal_value) = terminal(&projected.values, request);
    let total_value = present_value_sum + discounted_terminal_value;

    debug!(
        growth,
        present_value_sum, terminal_value, total_value, "Dividend discount valuation complete"
    );

    ValuationBreakdown {
        ticker: ticker.to_string(),
        method: ValuationMethod::DividendDiscount,
        projected,
        growth_rate_pct: Some(growth),
        historical_growth,
        present_value_sum,
        terminal_value,
        discounted_terminal_value,
        total_value,
        shares_outstanding: None,
        fair_value: total_value,
    }
}

// ============================================================================
// Tests
// ============================================================================
