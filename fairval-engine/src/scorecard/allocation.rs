//! Capital Allocation Classifier.
//!
//! Splits investing spend into capex, R&D and acquisitions. Acquisitions are
//! whatever part of the investing outflow reported capex does not explain.

use crate::series::round_to;
use crate::types::{CashAllocationResult, FundamentalPeriod};

/// Classify investing spend.
///
/// * `net_cash_flow_investing` - NCFI as reported (negative = outflow)
/// * `capex` - reported capital expenditure (positive magnitude)
/// * `research_and_development` - reported R&D (positive magnitude)
pub fn classify_allocation(
    net_cash_flow_investing: f64,
    capex: f64,
    research_and_development: f64,
) -> CashAllocationResult {
    let acquisitions = (net_cash_flow_investing.abs() - capex).max(0.0);
    let total = capex + research_and_development + acquisitions;

    if total == 0.0 {
        return CashAllocationResult::default();
    }

    let share = |amount: f64| round_to(amount / total * 100.0, 2);
    CashAllocationResult {
        capex_percent: share(capex),
        rnd_percent: share(research_and_development),
        acquisitions_percent: share(acquisitions),
    }
}

impl CashAllocationResult {
    /// Classify one period's investing spend.
    pub fn from_period(period: &FundamentalPeriod) -> Self {
        classify_allocation(
            period.net_cash_flow_investing,
            period.capital_expenditure,
            period.research_and_development,
        )
    }

    /// Sum of the three shares (100 up to rounding, or 0).
    pub fn total(&self) -> f64 {
        self.capex_percent + self.rnd_percent + self.acquisitions_percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquisitions_from_unexplained_outflow() {
        let result = classify_allocation(-100.0, 60.0, 20.0);
        assert_eq!(result.capex_percent, 50.0);
        assert_eq!(result.rnd_percent, 16.67);
        assert_eq!(result.acquisitions_percent, 33.33);
        assert!((result.total() - 100.0).abs() <= 0.01);
    }

    #[test]
    fn test_all_zero() {
        assert_eq!(
            classify_allocation(0.0, 0.0, 0.0),
            CashAllocationResult::default()
        );
    }

    #[test]
    fn test_capex_exceeding_outflow_has_no_acquisitions() {
        let result = classify_allocation(-50.0, 80.0, 20.0);
        assert_eq!(result.acquisitions_percent, 0.0);
        assert_eq!(result.capex_percent, 80.0);
        assert_eq!(result.rnd_percent, 20.0);
    }

    #[test]
    fn test_investing_inflow_uses_magnitude() {
        // Asset sales still count as unexplained investing activity
        let result = classify_allocation(100.0, 60.0, 20.0);
        assert_eq!(result.acquisitions_percent, 33.33);
    }

    #[test]
    fn test_from_period() {
        let period = FundamentalPeriod {
            net_cash_flow_investing: -100.0,
            capital_expenditure: 60.0,
            research_and_development: 20.0,
            ..Default::default()
        };
        assert_eq!(
            CashAllocationResult::from_period(&period),
            classify_allocation(-100.0, 60.0, 20.0)
        );
    }
}
