//! Margin-based free-cash-flow forecaster.
//!
//! Used when the caller has no explicit cash-flow estimates: revenue is
//! projected at its historical (or an override) growth rate and converted to
//! free cash flow at the average historical FCF margin.

use tracing::debug;

use crate::tvm;
use crate::types::FundamentalPeriod;

/// Margin assumed when no period has a usable FCF margin.
pub const DEFAULT_FCF_MARGIN: f64 = 0.05;

/// Plain mean of the positive, finite FCF margins of periods with revenue.
pub fn average_fcf_margin(revenues: &[f64], free_cash_flows: &[f64]) -> f64 {
    let margins: Vec<f64> = revenues
        .iter()
        .zip(free_cash_flows)
        .filter(|(revenue, _)| **revenue > 0.0)
        .map(|(revenue, fcf)| fcf / revenue)
        .filter(|margin| margin.is_finite() && *margin > 0.0)
        .collect();

    if margins.is_empty() {
        return DEFAULT_FCF_MARGIN;
    }
    margins.iter().sum::<f64>() / margins.len() as f64
}

/// Revenue growth (%) from first to last value, or the override.
///
/// Falls back to 0 when the historical CAGR is not finite.
pub fn revenue_growth(revenues: &[f64], override_growth_pct: Option<f64>) -> f64 {
    if let Some(growth) = override_growth_pct {
        return growth;
    }
    let (Some(first), Some(last)) = (revenues.first(), revenues.last()) else {
        return 0.0;
    };
    let growth = tvm::cagr(*first, *last, (revenues.len() - 1) as f64);
    if growth.is_finite() {
        growth
    } else {
        0.0
    }
}

/// Forecast `horizon` years of free cash flow.
///
/// Needs at least two (revenue, FCF) pairs; otherwise returns an empty
/// forecast, which the valuation engine treats as "no estimate". The
/// result holds forecast years only, no base-year entry.
pub fn forecast_fcf(
    revenues: &[f64],
    free_cash_flows: &[f64],
    horizon: usize,
    override_growth_pct: Option<f64>,
) -> Vec<f64> {
    let pairs = revenues.len().min(free_cash_flows.len());
    if pairs < 2 {
        debug!(pairs, "Not enough history to forecast free cash flow");
        return Vec::new();
    }
    let revenues = &revenues[..pairs];
    let free_cash_flows = &free_cash_flows[..pairs];

    let margin = average_fcf_margin(revenues, free_cash_flows);
    let growth = revenue_growth(revenues, override_growth_pct);
    let last_revenue = revenues[pairs - 1];

    debug!(margin, growth, last_revenue, horizon, "Forecasting free cash flow");

    tvm::forecast(growth, last_revenue, horizon)
        .into_iter()
        .skip(1)
        .map(|revenue| revenue * margin)
        .collect()
}

/// [`forecast_fcf`] over the revenue and FCF columns of `periods`.
pub fn forecast_from_periods(
    periods: &[FundamentalPeriod],
    horizon: usize,
    override_growth_pct: Option<f64>,
) -> Vec<f64> {
    let revenues: Vec<f64> = periods.iter().map(|p| p.revenue).collect();
    let free_cash_flows: Vec<f64> = periods.iter().map(|p| p.free_cash_flow).collect();
    forecast_fcf(&revenues, &free_cash_flows, horizon, override_growth_pct)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const REVENUE: [f64; 3] = [1000.0, 1100.0, 1200.0];
    const FCF: [f64; 3] = [50.0, 60.0, 70.0];

    #[test]
    fn test_forecast_equals_projected_revenue_times_margin() {
        let forecast = forecast_fcf(&REVENUE, &FCF, 3, None);
        assert_eq!(forecast.len(), 3);

        let margin = (50.0 / 1000.0 + 60.0 / 1100.0 + 70.0 / 1200.0) / 3.0;
        let growth = tvm::cagr(1000.0, 1200.0, 2.0);
        for (i, value) in forecast.iter().enumerate() {
            let revenue = tvm::fv(growth, 1200.0, (i + 1) as f64);
            assert_eq!(*value, revenue * margin);
        }
        assert!(forecast.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_override_growth() {
        let forecast = forecast_fcf(&REVENUE, &FCF, 2, Some(0.0));
        assert_eq!(forecast[0], forecast[1]);
        assert_eq!(revenue_growth(&REVENUE, Some(7.5)), 7.5);
    }

    #[test]
    fn test_default_margin_when_none_valid() {
        assert_eq!(average_fcf_margin(&[100.0, 0.0], &[-5.0, 10.0]), DEFAULT_FCF_MARGIN);
        let forecast = forecast_fcf(&[100.0, 100.0], &[-5.0, -5.0], 1, None);
        assert_eq!(forecast, vec![100.0 * DEFAULT_FCF_MARGIN]);
    }

    #[test]
    fn test_insufficient_history_is_empty() {
        assert!(forecast_fcf(&[1000.0], &[50.0], 5, None).is_empty());
        assert!(forecast_fcf(&[], &[], 5, None).is_empty());
    }

    #[test]
    fn test_non_finite_growth_falls_back_to_zero() {
        assert_eq!(revenue_growth(&[0.0, 100.0], None), 0.0);
        assert_eq!(revenue_growth(&[], None), 0.0);
    }

    #[test]
    fn test_forecast_from_periods() {
        let periods: Vec<FundamentalPeriod> = REVENUE
            .iter()
            .zip(FCF)
            .map(|(revenue, fcf)| FundamentalPeriod {
                revenue: *revenue,
                free_cash_flow: fcf,
                ..Default::default()
            })
            .collect();
        assert_eq!(
            forecast_from_periods(&periods, 3, None),
            forecast_fcf(&REVENUE, &FCF, 3, None)
        );
    }
}
