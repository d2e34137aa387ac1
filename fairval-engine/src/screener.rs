//! Universe screener.
//!
//! Values every company of a universe in parallel and ranks the priced ones
//! by margin of safety. Each valuation is an independent pure call, so the
//! work is split across the rayon pool with no shared state.

use fairval_common::{Config, ScreenerConfig, ValuationConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{FundamentalPeriod, ValuationMethod, ValuationProfile};
use crate::valuation::{value_company, ValuationBreakdown, ValuationRequest};

/// One company's inputs for screening.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyFundamentals {
    /// Entity identity
    pub profile: ValuationProfile,
    /// Chronological fundamentals, oldest first
    pub periods: Vec<FundamentalPeriod>,
    /// Current market price per share
    pub price: Option<f64>,
    /// Caller-supplied forecast cash flows
    pub explicit_forecast: Option<Vec<f64>>,
}

/// A ranked company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenedCompany {
    /// Ticker symbol
    pub ticker: String,
    /// Company name
    pub name: String,
    /// Valuation path taken
    pub method: ValuationMethod,
    /// Market price used
    pub price: f64,
    /// Fair value per share
    pub fair_value: f64,
    /// Margin of safety (%)
    pub margin_of_safety: f64,
}

/// Result of a screening run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenResult {
    /// Companies at or above the margin threshold, best first
    pub ranked: Vec<ScreenedCompany>,
    /// Companies valued
    pub total_scanned: usize,
    /// Companies without a finite, positive fair value
    pub no_estimate: usize,
    /// Companies with an estimate but no usable price
    pub unpriced: usize,
    /// Priced companies below the margin threshold
    pub below_threshold: usize,
}

enum Outcome {
    Ranked(ScreenedCompany),
    NoEstimate,
    Unpriced,
    BelowThreshold,
}

fn request_for<'a>(
    company: &'a CompanyFundamentals,
    valuation: &ValuationConfig,
) -> ValuationRequest<'a> {
    let request =
        ValuationRequest::from_config(company.profile.clone(), &company.periods, valuation);
    match &company.explicit_forecast {
        Some(cash_flows) => request.with_explicit_forecast(cash_flows.clone()),
        None => request,
    }
}

fn assess(
    company: &CompanyFundamentals,
    breakdown: &ValuationBreakdown,
    min_margin_of_safety_pct: f64,
) -> Outcome {
    if !breakdown.has_estimate() {
        return Outcome::NoEstimate;
    }
    let price = match company.price {
        Some(price) if price > 0.0 => price,
        _ => return Outcome::Unpriced,
    };

    let margin_of_safety = breakdown.margin_of_safety(price);
    if margin_of_safety < min_margin_of_safety_pct {
        return Outcome::BelowThreshold;
    }

    Outcome::Ranked(ScreenedCompany {
        ticker: company.profile.ticker.clone(),
        name: company.profile.name.clone(),
        method: breakdown.method,
        price,
        fair_value: breakdown.fair_value,
        margin_of_safety,
    })
}

/// Value and rank a universe.
pub fn screen(
    universe: &[CompanyFundamentals],
    valuation: &ValuationConfig,
    screener: &ScreenerConfig,
) -> ScreenResult {
    let span = fairval_common::screen_span!(universe.len());
    let _enter = span.enter();

    let outcomes: Vec<Outcome> = universe
        .par_iter()
        .map(|company| {
            let breakdown = value_company(&request_for(company, valuation));
            assess(company, &breakdown, screener.min_margin_of_safety_pct)
        })
        .collect();

    let mut result = ScreenResult {
        total_scanned: universe.len(),
        ..Default::default()
    };
    for outcome in outcomes {
        match outcome {
            Outcome::Ranked(company) => result.ranked.push(company),
            Outcome::NoEstimate => result.no_estimate += 1,
            Outcome::Unpriced => result.unpriced += 1,
            Outcome::BelowThreshold => result.below_threshold += 1,
        }
    }

    result.ranked.sort_by(|a, b| {
        b.margin_of_safety
            .total_cmp(&a.margin_of_safety)
            .then_with(|| a.ticker.cmp(&b.ticker))
    });

    info!(
        total = result.total_scanned,
        ranked = result.ranked.len(),
        no_estimate = result.no_estimate,
        unpriced = result.unpriced,
        below_threshold = result.below_threshold,
        "Screen complete"
    );

    result
}

/// Validate `config`, then screen with its valuation and screener sections.
pub fn screen_with_config(
    universe: &[CompanyFundamentals],
    config: &Config,
) -> fairval_common::Result<ScreenResult> {
    config.validate()?;
    Ok(screen(universe, &config.valuation, &config.screener))
}

// ============================================================================
// Tests
// ============================================================================
