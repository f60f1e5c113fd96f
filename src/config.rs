//! Configuration for experiment analysis.

use crate::types::Alternative;
use crate::{
    DEFAULT_CONFIDENCE_LEVEL, DEFAULT_ESTIMATE_RESAMPLES, DEFAULT_SEED, DEFAULT_TEST_RESAMPLES,
};

/// Configuration options for [`ExperimentOracle`](crate::ExperimentOracle).
#[derive(Debug, Clone)]
pub struct Config {
    /// Seed of the shared random source (default: 1234).
    ///
    /// All resampling in one run draws from a single stream seeded here,
    /// so a report is reproducible bit for bit from the seed and the input
    /// table.
    pub seed: u64,

    /// Confidence level for interval estimates (default: 0.95).
    pub confidence_level: f64,

    /// Resamples per confidence-interval estimate (default: 9,999).
    pub estimate_resamples: usize,

    /// Resamples per null distribution (default: 10,000).
    pub test_resamples: usize,

    /// Evaluate estimate resamples on a rayon pool (default: false).
    ///
    /// Draws are pre-committed in stream order, so results are identical
    /// to the sequential path.
    pub parallel: bool,

    /// Alternative hypothesis for the conversion test (default: two-sided).
    pub conversion_alternative: Alternative,

    /// Alternative hypothesis for the revenue test (default: two-sided).
    pub revenue_alternative: Alternative,

    /// Include a per-city revenue rate breakdown (default: true).
    pub city_breakdown: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            estimate_resamples: DEFAULT_ESTIMATE_RESAMPLES,
            test_resamples: DEFAULT_TEST_RESAMPLES,
            parallel: false,
            conversion_alternative: Alternative::TwoSided,
            revenue_alternative: Alternative::TwoSided,
            city_breakdown: true,
        }
    }
}
