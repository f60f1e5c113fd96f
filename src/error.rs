//! Error taxonomy for experiment analysis.
//!
//! Every failure mode is an explicit, distinguishable variant; the engine
//! never lets a NaN or infinity propagate silently into a report.

use thiserror::Error;

use crate::types::Variant;

/// Failures produced by the analysis engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A resampling routine received an empty observation sample.
    #[error("empty sample: {context}")]
    EmptySample {
        /// Which sample was empty (group, metric, city).
        context: String,
    },

    /// One arm of the difference test has no observations.
    #[error("no observations for variant {variant}")]
    EmptyGroup {
        /// The arm missing data.
        variant: Variant,
    },

    /// A variant has no users, so per-user KPIs are undefined.
    #[error("variant {variant} has no users; cvr and rpu are undefined")]
    NoUsers {
        /// The arm with zero users.
        variant: Variant,
    },

    /// An alternative-hypothesis selector string was not recognized.
    #[error("unrecognized alternative `{0}` (expected `larger`, `smaller`, or `two-sided`)")]
    InvalidAlternative(String),

    /// Confidence level outside the open interval (0, 1).
    #[error("confidence level {0} is outside (0, 1)")]
    InvalidConfidenceLevel(f64),

    /// A resampling routine was asked for zero resamples; the empirical
    /// distribution would be empty.
    #[error("resample count must be positive, got {0}")]
    InvalidResampleCount(usize),

    /// The standardized difference statistic has a zero denominator
    /// (both groups constant), so the test is undefined.
    #[error("degenerate difference statistic: {context}")]
    DegenerateStatistic {
        /// What collapsed to zero variance.
        context: String,
    },

    /// Relative rate comparison against a zero baseline estimate.
    #[error("relative rate undefined: estimate for variant A is zero")]
    ZeroBaseline,
}
