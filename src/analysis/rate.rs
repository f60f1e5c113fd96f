//! Relative rate comparison with first-order error propagation.

use crate::error::Error;
use crate::result::{PointEstimate, RateChange};

/// Relative percentage change of estimate B over estimate A.
///
/// `rate = 100 * (exp_B / exp_A - 1)`, with the error propagated to first
/// order through the ratio:
/// `error = 100 * sqrt((err_A * exp_B / exp_A^2)^2 + (err_B / exp_A)^2)`.
///
/// # Errors
///
/// [`Error::ZeroBaseline`] when `a.expected` is zero; the ratio is
/// undefined and must be flagged rather than returned as infinity.
pub fn compute_rate(a: PointEstimate, b: PointEstimate) -> Result<RateChange, Error> {
    if a.expected == 0.0 {
        return Err(Error::ZeroBaseline);
    }

    let rate_pct = 100.0 * (b.expected / a.expected - 1.0);
    let error_pct = 100.0
        * ((a.error * b.expected / a.expected.powi(2)).powi(2)
            + (b.error / a.expected).powi(2))
        .sqrt();

    Ok(RateChange { rate_pct, error_pct })
}
