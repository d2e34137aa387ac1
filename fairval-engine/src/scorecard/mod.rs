//! Scorecards computed from the same fundamentals as the valuation.
//!
//! # Components
//!
//! - **Dividend Scorecard**: 0-10 safety / stability / history scores
//! - **Capital Allocation**: capex / R&D / acquisitions share of investing spend

pub mod allocation;
pub mod dividend;

pub use allocation::classify_allocation;
pub use dividend::dividend_scorecard;
