//! Statistical primitives over ordered numeric sequences.
//!
//! Every function here is pure and leaves its input untouched. Several of
//! them deliberately diverge from textbook definitions (`volatility`,
//! `monotone_check`); the scorecard depends on the exact forms below.

use serde::{Deserialize, Serialize};

use crate::tvm;

/// Round half up at `decimals` places.
///
/// This is the single rounding rule used across the engine.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Mean rounded to 2 decimals. Returns 0 for an empty slice.
pub fn average(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    round_to(mean(xs), 2)
}

/// Median of a sorted copy. Returns 0 for an empty slice.
pub fn median(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population standard deviation (divides by N).
pub fn standard_deviation(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let m = mean(xs);
    let variance = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64;
    variance.sqrt()
}

/// Number of elements strictly greater than their predecessor, plus one
/// when the first element is nonzero.
pub fn monotone_check(xs: &[f64]) -> usize {
    let Some(first) = xs.first() else {
        return 0;
    };
    let rises = xs.windows(2).filter(|w| w[1] > w[0]).count();
    rises + usize::from(*first != 0.0)
}

/// First differences; when `relative`, each as a percent of the prior value.
///
/// A zero prior value yields a non-finite relative change.
pub fn change(xs: &[f64], relative: bool) -> Vec<f64> {
    xs.windows(2)
        .map(|w| {
            let diff = w[1] - w[0];
            if relative {
                diff / w[0] * 100.0
            } else {
                diff
            }
        })
        .collect()
}

/// `|stddev - mean| / mean`, with a zero mean replaced by 1 in the divisor.
///
/// Not the coefficient of variation: a perfectly steady series with a
/// nonzero mean scores 1, not 0.
pub fn volatility(xs: &[f64]) -> f64 {
    let m = mean(xs);
    let divisor = if m == 0.0 { 1.0 } else { m };
    (standard_deviation(xs) - m).abs() / divisor
}

/// Drop the leading run of elements while the running sum is still zero.
pub fn clean_series(xs: &[f64]) -> Vec<f64> {
    let mut running = 0.0;
    let start = xs
        .iter()
        .position(|x| {
            running += x;
            running != 0.0
        })
        .unwrap_or(xs.len());
    xs[start..].to_vec()
}

/// CAGR over every non-overlapping window of every width.
///
/// For each width `w` in `1..len-1` the series is tiled from index 0 in
/// steps of `w`; the last window is clipped to the final index. Windows
/// with a non-positive start value produce non-finite rates, which are
/// kept so the output length depends only on the input length.
pub fn growth_rates(xs: &[f64]) -> Vec<f64> {
    let n = xs.len();
    if n < 2 {
        return Vec::new();
    }

    let last = n - 1;
    let mut rates = Vec::new();
    for width in 1..n {
        let mut start = 0;
        while start < last {
            let end = (start + width).min(last);
            rates.push(tvm::cagr(xs[start], xs[end], (end - start) as f64));
            start += width;
        }
    }
    rates
}

/// Dot product of `xs` with `weights` normalised to sum to 1.
///
/// Returns 0 when the weights sum to zero. Extra entries on either side
/// are ignored.
pub fn weighted_average(xs: &[f64], weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().sum();
    if total == 0.0 {
        return 0.0;
    }
    xs.iter()
        .zip(weights)
        .map(|(x, w)| x * (w / total))
        .sum()
}

/// Summary of the implied growth-rate distribution of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthSummary {
    /// Number of finite rates
    pub count: usize,
    /// Average rate (%)
    pub average: f64,
    /// Median rate (%)
    pub median: f64,
    /// Minimum rate (%)
    pub min: f64,
    /// Maximum rate (%)
    pub max: f64,
}

impl GrowthSummary {
    /// Summarise the finite entries of [`growth_rates`].
    pub fn from_series(xs: &[f64]) -> Self {
        let rates: Vec<f64> = growth_rates(xs)
            .into_iter()
            .filter(|r| r.is_finite())
            .collect();

        if rates.is_empty() {
            return Self::default();
        }

        Self {
            count: rates.len(),
            average: average(&rates),
            median: median(&rates),
            min: rates.iter().copied().fold(f64::INFINITY, f64::min),
            max: rates.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_half_up() {
        assert_eq!(round_to(1.005 * 1000.0, 0), 1005.0);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -2.0);
        assert_eq!(round_to(0.125, 2), 0.13);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[1.0, 2.0, 4.0]), 2.33);
        assert_eq!(average(&[5.0]), 5.0);
    }

    #[test]
    fn test_median_does_not_mutate() {
        let xs = vec![3.0, 1.0, 2.0, 10.0];
        assert_eq!(median(&xs), 2.5);
        assert_eq!(xs, vec![3.0, 1.0, 2.0, 10.0]);
        assert_eq!(median(&[7.0, 1.0, 3.0]), 3.0);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_standard_deviation_population() {
        let sd = standard_deviation(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((sd - 2.0).abs() < 1e-12);
        assert_eq!(standard_deviation(&[]), 0.0);
    }

    #[test]
    fn test_monotone_check() {
        assert_eq!(monotone_check(&[]), 0);
        assert_eq!(monotone_check(&[0.0]), 0);
        assert_eq!(monotone_check(&[1.0]), 1);
        assert_eq!(monotone_check(&[1.0, 2.0, 2.0, 3.0]), 3);
        assert_eq!(monotone_check(&[0.0, 1.0, 0.5, 2.0]), 2);
    }

    #[test]
    fn test_change() {
        assert_eq!(change(&[10.0, 12.0, 9.0], false), vec![2.0, -3.0]);
        assert_eq!(change(&[10.0, 12.0, 9.0], true), vec![20.0, -25.0]);
        assert!(change(&[1.0], true).is_empty());
        assert!(change(&[], false).is_empty());
    }

    #[test]
    fn test_volatility_is_not_cv() {
        // Constant series: stddev 0, mean 5 -> |0 - 5| / 5 = 1
        assert_eq!(volatility(&[5.0, 5.0, 5.0]), 1.0);
        // Zero mean uses 1 as the divisor
        assert_eq!(volatility(&[-1.0, 1.0]), 1.0);
        // stddev == mean -> 0
        let xs = [10.0, 10.0, 10.0, 10.0, 60.0];
        assert!(volatility(&xs).abs() < 1e-12);
    }

    #[test]
    fn test_clean_series() {
        assert_eq!(clean_series(&[0.0, 0.0, 5.0, 0.0, 3.0]), vec![5.0, 0.0, 3.0]);
        assert_eq!(clean_series(&[0.0, 0.0]), Vec::<f64>::new());
        assert_eq!(clean_series(&[1.0, 0.0]), vec![1.0, 0.0]);
        assert_eq!(clean_series(&[]), Vec::<f64>::new());
    }

    #[test]
    fn test_growth_rates_tiling() {
        // len 5 -> widths 1..4: 4 + 2 + 2 + 1 windows
        let xs = [100.0, 110.0, 121.0, 133.1, 146.41];
        let rates = growth_rates(&xs);
        assert_eq!(rates.len(), 9);
        for rate in &rates {
            assert!((rate - 10.0).abs() < 0.011, "rate {rate} should be ~10%");
        }
        assert!(growth_rates(&[1.0]).is_empty());
    }

    #[test]
    fn test_growth_rates_clipped_window() {
        // width 2 over 4 points: [0..2], [2..3] (clipped)
        let rates = growth_rates(&[100.0, 100.0, 121.0, 242.0]);
        assert_eq!(rates.len(), 3 + 2 + 1);
        assert_eq!(rates[3], 10.0);
        assert_eq!(rates[4], 100.0);
    }

    #[test]
    fn test_weighted_average() {
        assert_eq!(weighted_average(&[1.0, 0.0], &[3.0, 1.0]), 0.75);
        assert_eq!(weighted_average(&[1.0, 1.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_growth_summary_skips_non_finite() {
        let summary = GrowthSummary::from_series(&[0.0, 100.0, 110.0]);
        // Windows starting at 0 are non-finite; only 100 -> 110 survives
        assert_eq!(summary.count, 1);
        assert_eq!(summary.median, 10.0);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 10.0);
        assert_eq!(GrowthSummary::from_series(&[]), GrowthSummary::default());
    }
}
