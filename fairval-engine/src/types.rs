//! Core types for the valuation engine.
//!
//! Inputs arrive already ordered and already mapped from whatever source the
//! caller uses. Every numeric field defaults to `0.0` when it is missing from
//! the serialized form; the engine itself never substitutes defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Fundamentals
// ============================================================================

/// One reporting period's figures.
///
/// Callers pass slices of these in strict chronological ascending order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundamentalPeriod {
    /// Period end label (informational only)
    pub period_end: Option<NaiveDate>,
    /// Revenue
    pub revenue: f64,
    /// Free cash flow
    pub free_cash_flow: f64,
    /// Net cash flow from operating activities (NCFO)
    pub cash_flow_from_operations: f64,
    /// Capital expenditure (positive magnitude)
    pub capital_expenditure: f64,
    /// Shares outstanding
    pub shares_outstanding: f64,
    /// Total debt
    pub total_debt: f64,
    /// Cash and equivalents
    pub cash_and_equivalents: f64,
    /// Net income
    pub net_income: f64,
    /// Depreciation and amortization
    pub depreciation_amortization: f64,
    /// Current assets
    pub current_assets: f64,
    /// Current liabilities
    pub current_liabilities: f64,
    /// Dividend per share
    pub dividend_per_share: f64,
    /// Total shareholders' equity
    pub total_equity: f64,
    /// Dividends paid (sign as reported; the scorecard uses the magnitude)
    pub dividends_paid: f64,
    /// Retained earnings
    pub retained_earnings: f64,
    /// Net cash flow from investing activities (NCFI, negative = outflow)
    pub net_cash_flow_investing: f64,
    /// Research and development expense (positive magnitude)
    pub research_and_development: f64,
}

impl FundamentalPeriod {
    /// Current assets / current liabilities.
    pub fn current_ratio(&self) -> f64 {
        ratio(self.current_assets, self.current_liabilities)
    }

    /// Total debt / total equity.
    pub fn debt_to_equity(&self) -> f64 {
        ratio(self.total_debt, self.total_equity)
    }

    /// |Dividends paid| / net income.
    pub fn payout_ratio(&self) -> f64 {
        ratio(self.dividends_paid.abs(), self.net_income)
    }

    /// Total debt minus cash and equivalents.
    pub fn net_debt(&self) -> f64 {
        self.total_debt - self.cash_and_equivalents
    }

    /// Free cash flow / revenue.
    pub fn fcf_margin(&self) -> f64 {
        ratio(self.free_cash_flow, self.revenue)
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

// ============================================================================
// Profile and method selection
// ============================================================================

/// Sector label that selects the dividend-discount path.
pub const FINANCIAL_SECTOR: &str = "Financial";

/// Identity of the entity being valued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationProfile {
    /// Sector name (exactly "Financial" selects the dividend-discount model)
    pub sector: String,
    /// Ticker symbol
    pub ticker: String,
    /// Company name
    pub name: String,
}

impl ValuationProfile {
    /// Create a profile.
    pub fn new(
        sector: impl Into<String>,
        ticker: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            sector: sector.into(),
            ticker: ticker.into(),
            name: name.into(),
        }
    }

    /// Valuation method implied by the sector.
    pub fn method(&self) -> ValuationMethod {
        if self.sector == FINANCIAL_SECTOR {
            ValuationMethod::DividendDiscount
        } else {
            ValuationMethod::FreeCashFlow
        }
    }
}

/// Which cash-flow basis a valuation discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationMethod {
    /// Discount projected free cash flow, divide by shares outstanding
    FreeCashFlow,
    /// Discount projected dividends per share (financial sector)
    DividendDiscount,
}

impl std::fmt::Display for ValuationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FreeCashFlow => write!(f, "free_cash_flow"),
            Self::DividendDiscount => write!(f, "dividend_discount"),
        }
    }
}

// ============================================================================
// Projected series
// ============================================================================

/// What index 0 of a projected series holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesBasis {
    /// Index 0 is the first forecast year (length N)
    ForecastOnly,
    /// Index 0 is the last historical value (length N + 1)
    BaseInclusive,
}

/// Forecast cash flows or forecast dividends per share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedSeries {
    /// Ordered values
    pub values: Vec<f64>,
    /// Meaning of index 0
    pub basis: SeriesBasis,
}

impl ProjectedSeries {
    /// Series whose first entry is already a forecast year.
    pub fn forecast_only(values: Vec<f64>) -> Self {
        Self {
            values,
            basis: SeriesBasis::ForecastOnly,
        }
    }

    /// Series whose first entry is the last historical value.
    pub fn base_inclusive(values: Vec<f64>) -> Self {
        Self {
            values,
            basis: SeriesBasis::BaseInclusive,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when empty or every entry is zero.
    pub fn is_degenerate(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    /// Last entry, the terminal value base.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

// ============================================================================
// Scorecard and allocation
// ============================================================================

/// Inputs for the dividend scorecard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DividendScorecardInput {
    /// Historical dividends per share, oldest first
    pub dividends_per_share: Vec<f64>,
    /// Historical retained earnings, oldest first
    pub retained_earnings: Vec<f64>,
    /// Latest-period net cash flow from operations
    pub cash_flow_from_operations: f64,
    /// Latest-period dividends paid (absolute value)
    pub dividends_paid: f64,
    /// Latest-period current ratio
    pub current_ratio: f64,
    /// Latest-period debt / equity
    pub debt_to_equity: f64,
    /// Latest-period payout ratio (fraction)
    pub payout_ratio: f64,
    /// Dividend yield (fraction, e.g. 0.035 for 3.5%)
    pub dividend_yield: f64,
}

/// Dividend scorecard output.
///
/// All fields except `dividend_yield_percent` are on a 0-10 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScorecardResult {
    pub score: f64,
    pub safety: f64,
    pub stability: f64,
    pub increasing_dividends: f64,
    pub dividend_history: f64,
    pub dividend_yield_percent: f64,
}

/// Split of investing outflow into capex / R&D / acquisitions shares (%).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CashAllocationResult {
    pub capex_percent: f64,
    pub rnd_percent: f64,
    pub acquisitions_percent: f64,
}
