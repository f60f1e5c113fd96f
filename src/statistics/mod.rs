//! Statistical infrastructure for experiment analysis.
//!
//! - Bootstrap resampling estimation with empirical confidence intervals
//! - Quantile computation with the R-7 (linear interpolation) definition

mod bootstrap;
mod quantile;

pub use bootstrap::{bootstrap_estimate, EstimateSettings};
pub use quantile::{quantile, quantile_sorted};

/// Arithmetic mean of a sample.
///
/// Returns NaN for an empty slice; callers validate emptiness up front.
pub fn mean(sample: &[f64]) -> f64 {
    sample.iter().sum::<f64>() / sample.len() as f64
}

/// Population variance (divisor n, not n-1).
///
/// The difference test is defined against biased variances.
pub fn population_variance(sample: &[f64], mean: f64) -> f64 {
    sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / sample.len() as f64
}
