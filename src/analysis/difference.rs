//! Bootstrap difference test between the two experiment arms.
//!
//! The test statistic is the standardized mean difference
//! `t = (m_B - m_A) / sqrt(v_B/n_B + v_A/n_A)` with population (divisor n)
//! variances. The null distribution is built by recentering both groups to
//! the pooled mean, which imposes the shared-mean null hypothesis while
//! preserving each group's own variance structure, then resampling each
//! group at its own size.

use crate::error::Error;
use crate::random::RandomSource;
use crate::result::Significance;
use crate::statistics::{mean, population_variance};
use crate::types::{Alternative, Variant};

/// Outcome of one difference test.
#[derive(Debug, Clone)]
pub struct DifferenceTest {
    /// Observed standardized difference statistic.
    pub observed: f64,
    /// Empirical p-value under the chosen alternative.
    pub p_value: f64,
    /// Alternative hypothesis used.
    pub alternative: Alternative,
    /// Threshold flags derived from the p-value.
    pub significance: Significance,
    /// Size of the null distribution.
    pub n_resamples: usize,
}

/// Compute the observed standardized difference statistic.
///
/// # Errors
///
/// - [`Error::EmptyGroup`] if either group has no observations.
/// - [`Error::DegenerateStatistic`] if the combined denominator is zero
///   (both groups constant); the test is undefined and must not silently
///   report an infinite statistic.
pub fn observed_statistic(group_a: &[f64], group_b: &[f64]) -> Result<f64, Error> {
    check_groups(group_a, group_b)?;

    let mean_a = mean(group_a);
    let mean_b = mean(group_b);
    let var_a = population_variance(group_a, mean_a);
    let var_b = population_variance(group_b, mean_b);

    let denom = (var_b / group_b.len() as f64 + var_a / group_a.len() as f64).sqrt();
    if denom == 0.0 {
        return Err(Error::DegenerateStatistic {
            context: "zero variance in both groups".to_string(),
        });
    }
    Ok((mean_b - mean_a) / denom)
}

/// Build the resampled null distribution of the difference statistic.
///
/// Both groups are shifted to share the pooled mean of the combined target
/// column (`x[i] - mean_x + tot_mean`), then for each iteration a resample
/// of each group's own size is drawn with replacement and the statistic is
/// recomputed. Draw order is fixed: group A then group B within each
/// iteration, all from the shared `rng` stream.
///
/// The returned sequence has length `n_resamples` and is consumed by
/// [`p_value`]; resample-level statistics are recorded as computed.
///
/// # Errors
///
/// - [`Error::EmptyGroup`] if either group has no observations.
/// - [`Error::InvalidResampleCount`] if `n_resamples` is zero; the null
///   distribution would be empty and no p-value could be taken from it.
pub fn null_distribution(
    group_a: &[f64],
    group_b: &[f64],
    n_resamples: usize,
    rng: &mut RandomSource,
) -> Result<Vec<f64>, Error> {
    check_groups(group_a, group_b)?;
    if n_resamples == 0 {
        return Err(Error::InvalidResampleCount(0));
    }

    let n_a = group_a.len();
    let n_b = group_b.len();
    let mean_a = mean(group_a);
    let mean_b = mean(group_b);
    let tot_mean = (group_a.iter().sum::<f64>() + group_b.iter().sum::<f64>())
        / (n_a + n_b) as f64;

    let shifted_a: Vec<f64> = group_a.iter().map(|x| x - mean_a + tot_mean).collect();
    let shifted_b: Vec<f64> = group_b.iter().map(|x| x - mean_b + tot_mean).collect();

    let mut buf_a = vec![0.0; n_a];
    let mut buf_b = vec![0.0; n_b];
    let mut samples = Vec::with_capacity(n_resamples);

    for _ in 0..n_resamples {
        rng.resample_into(&shifted_a, &mut buf_a);
        rng.resample_into(&shifted_b, &mut buf_b);

        let bs_mean_a = mean(&buf_a);
        let bs_mean_b = mean(&buf_b);
        let bs_var_a = population_variance(&buf_a, bs_mean_a);
        let bs_var_b = population_variance(&buf_b, bs_mean_b);

        let denom = (bs_var_b / n_b as f64 + bs_var_a / n_a as f64).sqrt();
        samples.push((bs_mean_b - bs_mean_a) / denom);
    }

    Ok(samples)
}

/// Empirical p-value of `observed` against a null distribution.
///
/// - `Larger`: fraction of null values strictly above `observed`.
/// - `Smaller`: fraction strictly below.
/// - `TwoSided`: fraction strictly above or strictly below, i.e.
///   `P(null > t) + P(null < t)`. This counts every untied null value, so
///   it is not the symmetric `P(|null| > |t|)` comparison; see
///   [`p_value_symmetric`] for that variant.
///
/// # Panics
///
/// Panics if `null` is empty.
pub fn p_value(null: &[f64], observed: f64, alternative: Alternative) -> f64 {
    assert!(!null.is_empty(), "null distribution must be non-empty");
    let n = null.len() as f64;
    let count = match alternative {
        Alternative::Larger => null.iter().filter(|&&v| v > observed).count(),
        Alternative::Smaller => null.iter().filter(|&&v| v < observed).count(),
        Alternative::TwoSided => null
            .iter()
            .filter(|&&v| v > observed || v < observed)
            .count(),
    };
    count as f64 / n
}

/// Symmetric two-sided p-value: `P(|null| > |observed|)`.
///
/// Offered as a corrected variant of the two-sided formula in [`p_value`].
/// It compares absolute magnitudes around zero rather than counting every
/// non-tied value, and is the conventional two-sided tail probability for a
/// null distribution centered at zero.
///
/// # Panics
///
/// Panics if `null` is empty.
pub fn p_value_symmetric(null: &[f64], observed: f64) -> f64 {
    assert!(!null.is_empty(), "null distribution must be non-empty");
    let threshold = observed.abs();
    let count = null.iter().filter(|&&v| v.abs() > threshold).count();
    count as f64 / null.len() as f64
}

/// Run the full difference test: observed statistic, null distribution,
/// p-value, and significance flags.
///
/// # Errors
///
/// Propagates [`observed_statistic`] and [`null_distribution`] failures.
pub fn difference_test(
    group_a: &[f64],
    group_b: &[f64],
    alternative: Alternative,
    n_resamples: usize,
    rng: &mut RandomSource,
) -> Result<DifferenceTest, Error> {
    let observed = observed_statistic(group_a, group_b)?;
    let null = null_distribution(group_a, group_b, n_resamples, rng)?;
    let p = p_value(&null, observed, alternative);

    Ok(DifferenceTest {
        observed,
        p_value: p,
        alternative,
        significance: Significance::from_p_value(p),
        n_resamples,
    })
}

fn check_groups(group_a: &[f64], group_b: &[f64]) -> Result<(), Error> {
    if group_a.is_empty() {
        return Err(Error::EmptyGroup {
            variant: Variant::A,
        });
    }
    if group_b.is_empty() {
        return Err(Error::EmptyGroup {
            variant: Variant::B,
        });
    }
    Ok(())
}
