//! Empirical quantiles of a bootstrap distribution.
//!
//! Uses the R-7 quantile definition (linear interpolation between order
//! statistics). The interpolation choice is fixed so that confidence
//! intervals are exactly reproducible across runs and platforms; test
//! fixtures depend on it.

/// Compute the quantile at probability `p` from unsorted data.
///
/// Sorts a copy of the input; when several quantiles of the same
/// distribution are needed, sort once and use [`quantile_sorted`].
///
/// # Panics
///
/// Panics if `data` is empty or `p` is outside `[0, 1]`.
pub fn quantile(data: &[f64], p: f64) -> f64 {
    assert!(!data.is_empty(), "cannot compute quantile of empty slice");
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    quantile_sorted(&sorted, p)
}

/// Compute the quantile at probability `p` from ascending-sorted data.
///
/// R-7 definition: the target rank is `h = (n - 1) * p`; the result
/// interpolates linearly between the order statistics at `floor(h)` and
/// `floor(h) + 1`.
///
/// # Panics
///
/// Panics if `sorted` is empty or `p` is outside `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "cannot compute quantile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "quantile probability must be in [0, 1]"
    );

    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let h_floor = h.floor() as usize;
    let h_frac = h - h.floor();

    if h_floor >= n - 1 {
        return sorted[n - 1];
    }
    if h_frac == 0.0 {
        return sorted[h_floor];
    }
    sorted[h_floor] + h_frac * (sorted[h_floor + 1] - sorted[h_floor])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd() {
        let data = vec![5.0, 1.0, 3.0, 2.0, 4.0];
        assert!((quantile(&data, 0.5) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_median_interpolates() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&data, 0.5) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_extremes() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((quantile(&data, 0.0) - 1.0).abs() < 1e-12);
        assert!((quantile(&data, 1.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_r7_known_value() {
        // For [10, 20, 30, 40] at p = 0.025: h = 3 * 0.025 = 0.075,
        // so 10 + 0.075 * (20 - 10) = 10.75.
        let data = vec![10.0, 20.0, 30.0, 40.0];
        assert!((quantile(&data, 0.025) - 10.75).abs() < 1e-12);
    }

    #[test]
    fn test_single_element() {
        assert_eq!(quantile(&[7.0], 0.3), 7.0);
    }

    #[test]
    #[should_panic(expected = "cannot compute quantile of empty slice")]
    fn test_empty_panics() {
        quantile(&[], 0.5);
    }

    #[test]
    #[should_panic(expected = "quantile probability must be in [0, 1]")]
    fn test_out_of_range_probability_panics() {
        quantile(&[1.0, 2.0], 1.5);
    }
}
