//! Analysis result types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::summary::ExperimentSummary;
use crate::types::{Alternative, Metric};

/// Point estimate with a symmetric confidence-interval half-width.
///
/// `error` is half the width of the empirical confidence interval, not a
/// standard error; the underlying interval is
/// `[expected - error, expected + error]` and `error >= 0` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointEstimate {
    /// Center of the confidence interval.
    pub expected: f64,
    /// Half-width of the confidence interval.
    pub error: f64,
}

impl PointEstimate {
    /// The interval `[expected - error, expected + error]`.
    pub fn interval(&self) -> (f64, f64) {
        (self.expected - self.error, self.expected + self.error)
    }
}

impl fmt::Display for PointEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} +/- {:.2}", self.expected, self.error)
    }
}

/// Significance flags at the two reporting thresholds.
///
/// The checks are independent, not mutually exclusive: a p-value below 0.01
/// sets both flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Significance {
    /// p < 0.05.
    pub at_95: bool,
    /// p < 0.01.
    pub at_99: bool,
}

impl Significance {
    /// Evaluate both thresholds for a p-value.
    pub fn from_p_value(p_value: f64) -> Self {
        Self {
            at_95: p_value < 0.05,
            at_99: p_value < 0.01,
        }
    }
}

/// Relative percentage change between two estimates, with propagated error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateChange {
    /// `100 * (expected_B / expected_A - 1)`.
    pub rate_pct: f64,
    /// First-order propagated error, in percentage points.
    pub error_pct: f64,
}

/// Outcome of a bootstrap difference test for one metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricTest {
    /// Which measure was tested.
    pub metric: Metric,
    /// Alternative hypothesis used for the p-value.
    pub alternative: Alternative,
    /// Bootstrap estimate for variant A.
    pub estimate_a: PointEstimate,
    /// Bootstrap estimate for variant B.
    pub estimate_b: PointEstimate,
    /// Relative uplift of B over A with propagated error.
    pub uplift: RateChange,
    /// Observed standardized difference statistic.
    pub observed_t: f64,
    /// Empirical p-value from the resampled null distribution.
    pub p_value: f64,
    /// Threshold flags derived from the p-value.
    pub significance: Significance,
    /// Size of the null distribution.
    pub n_resamples: usize,
}

/// Rate comparison for one slice of the positive-revenue population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueRate {
    /// Slice label: `"overall"` or a city name.
    pub label: String,
    /// Bootstrap revenue estimate for variant A.
    pub estimate_a: PointEstimate,
    /// Bootstrap revenue estimate for variant B.
    pub estimate_b: PointEstimate,
    /// Relative change of B over A.
    pub rate: RateChange,
}

/// Revenue rate comparison, overall and optionally per city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateBreakdown {
    /// Whole positive-revenue population.
    pub overall: RevenueRate,
    /// One entry per city, in first-seen order. Empty when the city
    /// breakdown is disabled.
    pub cities: Vec<RevenueRate>,
}

/// Run parameters recorded for reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Seed of the shared random source.
    pub seed: u64,
    /// Confidence level for interval estimates.
    pub confidence_level: f64,
    /// Resamples per confidence-interval estimate.
    pub estimate_resamples: usize,
    /// Resamples per null distribution.
    pub test_resamples: usize,
    /// Distinct users in the analyzed table.
    pub n_users: usize,
}

/// Complete result of one experiment analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Per-variant totals and KPIs.
    pub summary: ExperimentSummary,
    /// Difference test for the conversion metric.
    pub conversion: MetricTest,
    /// Difference test for the revenue metric.
    pub revenue: MetricTest,
    /// Revenue rate comparison over positive-revenue users.
    pub revenue_rate: RateBreakdown,
    /// Run parameters.
    pub metadata: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_is_symmetric() {
        let est = PointEstimate {
            expected: 10.0,
            error: 1.5,
        };
        assert_eq!(est.interval(), (8.5, 11.5));
    }

    #[test]
    fn test_significance_thresholds_are_independent() {
        let strong = Significance::from_p_value(0.005);
        assert!(strong.at_95 && strong.at_99);

        let weak = Significance::from_p_value(0.03);
        assert!(weak.at_95 && !weak.at_99);

        let none = Significance::from_p_value(0.2);
        assert!(!none.at_95 && !none.at_99);
    }

    #[test]
    fn test_boundary_p_values_are_not_significant() {
        let s = Significance::from_p_value(0.05);
        assert!(!s.at_95);
        let s = Significance::from_p_value(0.01);
        assert!(s.at_95 && !s.at_99);
    }
}
