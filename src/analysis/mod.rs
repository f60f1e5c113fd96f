//! Inference procedures for the two-variant experiment.
//!
//! 1. **Difference test** ([`difference`]): standardized mean difference,
//!    resampled null distribution under a shared-mean recentering, and
//!    empirical p-values.
//! 2. **Rate comparison** ([`rate`]): relative percentage change between
//!    two estimates with first-order error propagation.

mod difference;
mod rate;

pub use difference::{
    difference_test, null_distribution, observed_statistic, p_value, p_value_symmetric,
    DifferenceTest,
};
pub use rate::compute_rate;
