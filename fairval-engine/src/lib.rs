//! Fairval Engine Library
//!
//! Valuation and scoring over a company's historical fundamentals.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                         fairval-engine                            │
//! ├───────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────────────┐   │
//! │  │  series /    │──▶│  forecast    │──▶│  valuation           │   │
//! │  │  tvm         │   │  (FCF margin)│   │  (DCF / DDM)         │   │
//! │  └──────────────┘   └──────────────┘   └──────────┬───────────┘   │
//! │         │                                         │               │
//! │         ▼                                         ▼               │
//! │  ┌──────────────┐                      ┌──────────────────────┐   │
//! │  │  scorecard   │                      │  screener (rayon)    │   │
//! │  └──────────────┘                      └──────────────────────┘   │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Concepts
//!
//! ## Fair value
//! - **Free cash flow**: projected FCF discounted at the discount rate, plus a
//!   Gordon growth terminal value, divided by shares outstanding
//! - **Dividend discount**: the same discounting over projected dividends per
//!   share, used for the `"Financial"` sector
//!
//! ## Soft failures
//! - Missing history, zero shares and all-zero projections yield a fair value
//!   of 0 ("no estimate") instead of an error
//!
//! ## Conventions
//! - Rates are percentages (`10.0` means 10%)
//! - Rounding is half up, at the points each primitive documents

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod error;
pub mod forecast;
pub mod scorecard;
pub mod screener;
pub mod series;
pub mod tvm;
pub mod types;
pub mod valuation;

pub use error::{EngineError, Result};
pub use scorecard::{classify_allocation, dividend_scorecard};
pub use screener::{
    screen, screen_with_config, CompanyFundamentals, ScreenResult, ScreenedCompany,
};
pub use series::GrowthSummary;
pub use types::{
    CashAllocationResult, DividendScorecardInput, FundamentalPeriod, ProjectedSeries,
    ScorecardResult, SeriesBasis, ValuationMethod, ValuationProfile,
};
pub use valuation::{fair_value, value_company, ValuationBreakdown, ValuationRequest};
