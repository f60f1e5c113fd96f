//! Main `ExperimentOracle` entry point and builder.

use crate::analysis::{compute_rate, null_distribution, observed_statistic, p_value};
use crate::config::Config;
use crate::dataset::{CleanLogs, UserTable};
use crate::error::Error;
use crate::random::RandomSource;
use crate::result::{
    ExperimentReport, Metadata, MetricTest, PointEstimate, RateBreakdown, RevenueRate,
    Significance,
};
use crate::statistics::{bootstrap_estimate, mean, EstimateSettings};
use crate::summary::build_summary;
use crate::types::{Alternative, Metric, Variant};

/// Main entry point for experiment analysis.
///
/// Use the builder pattern to configure and run an analysis over a cleaned
/// log table.
///
/// # Example
///
/// ```ignore
/// use uplift_oracle::{Alternative, CleanLogs, ExperimentOracle};
///
/// let report = ExperimentOracle::new()
///     .seed(1234)
///     .revenue_alternative(Alternative::Larger)
///     .run(&logs)?;
///
/// println!("Conversion p-value: {:.2}%", report.conversion.p_value * 100.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExperimentOracle {
    config: Config,
}

impl ExperimentOracle {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create with reduced resample counts for fast tests.
    ///
    /// Settings: 999 estimate resamples, 1,000 test resamples.
    pub fn quick() -> Self {
        Self {
            config: Config {
                estimate_resamples: 999,
                test_resamples: 1_000,
                ..Config::default()
            },
        }
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the confidence level for interval estimates.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.config.confidence_level = level;
        self
    }

    /// Set the number of resamples per interval estimate.
    pub fn estimate_resamples(mut self, n: usize) -> Self {
        self.config.estimate_resamples = n;
        self
    }

    /// Set the number of resamples per null distribution.
    pub fn test_resamples(mut self, n: usize) -> Self {
        self.config.test_resamples = n;
        self
    }

    /// Evaluate estimate resamples on a rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set the alternative hypothesis for the conversion test.
    pub fn conversion_alternative(mut self, alternative: Alternative) -> Self {
        self.config.conversion_alternative = alternative;
        self
    }

    /// Set the alternative hypothesis for the revenue test.
    pub fn revenue_alternative(mut self, alternative: Alternative) -> Self {
        self.config.revenue_alternative = alternative;
        self
    }

    /// Enable or disable the per-city revenue rate breakdown.
    pub fn city_breakdown(mut self, enabled: bool) -> Self {
        self.config.city_breakdown = enabled;
        self
    }

    /// Run the full analysis: summary, both metric tests, and the revenue
    /// rate breakdown.
    ///
    /// A single [`RandomSource`] seeded from the configuration backs every
    /// resampling step, advancing monotonically through the run; the two
    /// variants' results are linked through that one stream.
    ///
    /// # Errors
    ///
    /// Any failure from the summary builder, the estimators, or the
    /// difference tests propagates unchanged.
    pub fn run(&self, logs: &CleanLogs) -> Result<ExperimentReport, Error> {
        let summary = build_summary(logs)?;
        let users = logs.user_table();
        let mut rng = RandomSource::from_seed(self.config.seed);

        let conversion = self.test_metric(
            &users,
            Metric::Conversion,
            self.config.conversion_alternative,
            &mut rng,
        )?;
        let revenue = self.test_metric(
            &users,
            Metric::Revenue,
            self.config.revenue_alternative,
            &mut rng,
        )?;
        let revenue_rate = self.rate_breakdown(&users, &mut rng)?;

        Ok(ExperimentReport {
            summary,
            conversion,
            revenue,
            revenue_rate,
            metadata: Metadata {
                seed: self.config.seed,
                confidence_level: self.config.confidence_level,
                estimate_resamples: self.config.estimate_resamples,
                test_resamples: self.config.test_resamples,
                n_users: users.len(),
            },
        })
    }

    /// Run the bootstrap difference test for one metric.
    ///
    /// Draws, in stream order: the estimate for A, the estimate for B,
    /// then the null distribution.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyGroup`] if a variant has no users; estimator and test
    /// failures propagate unchanged.
    pub fn test_metric(
        &self,
        users: &UserTable,
        metric: Metric,
        alternative: Alternative,
        rng: &mut RandomSource,
    ) -> Result<MetricTest, Error> {
        let group_a = users.metric_values(Variant::A, metric);
        let group_b = users.metric_values(Variant::B, metric);
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

        let settings = self.estimate_settings();
        let estimate_a = bootstrap_estimate(&group_a, mean, &settings, rng)?;
        let estimate_b = bootstrap_estimate(&group_b, mean, &settings, rng)?;
        let uplift = compute_rate(estimate_a, estimate_b)?;

        let observed_t = observed_statistic(&group_a, &group_b)?;
        let null = null_distribution(&group_a, &group_b, self.config.test_resamples, rng)?;
        let p = p_value(&null, observed_t, alternative);

        Ok(MetricTest {
            metric,
            alternative,
            estimate_a,
            estimate_b,
            uplift,
            observed_t,
            p_value: p,
            significance: Significance::from_p_value(p),
            n_resamples: self.config.test_resamples,
        })
    }

    /// Estimate the relative revenue rate of B over A for users with
    /// positive revenue, overall and per city when enabled.
    ///
    /// # Errors
    ///
    /// [`Error::EmptySample`] naming the slice and variant when a slice has
    /// no positive-revenue users for one arm.
    pub fn rate_breakdown(
        &self,
        users: &UserTable,
        rng: &mut RandomSource,
    ) -> Result<RateBreakdown, Error> {
        let positive = users.with_positive_revenue();

        let overall = self.rate_for_slice(&positive, "overall", rng)?;
        let mut cities = Vec::new();
        if self.config.city_breakdown {
            for city in positive.cities() {
                let slice = positive.in_city(&city);
                cities.push(self.rate_for_slice(&slice, &city, rng)?);
            }
        }

        Ok(RateBreakdown { overall, cities })
    }

    fn rate_for_slice(
        &self,
        slice: &UserTable,
        label: &str,
        rng: &mut RandomSource,
    ) -> Result<RevenueRate, Error> {
        let settings = self.estimate_settings();
        let estimate_a = self.revenue_estimate(slice, Variant::A, label, &settings, rng)?;
        let estimate_b = self.revenue_estimate(slice, Variant::B, label, &settings, rng)?;
        let rate = compute_rate(estimate_a, estimate_b)?;

        Ok(RevenueRate {
            label: label.to_string(),
            estimate_a,
            estimate_b,
            rate,
        })
    }

    fn revenue_estimate(
        &self,
        slice: &UserTable,
        variant: Variant,
        label: &str,
        settings: &EstimateSettings,
        rng: &mut RandomSource,
    ) -> Result<PointEstimate, Error> {
        let values = slice.metric_values(variant, Metric::Revenue);
        if values.is_empty() {
            return Err(Error::EmptySample {
                context: format!("variant {variant} revenue in {label}"),
            });
        }
        bootstrap_estimate(&values, mean, settings, rng)
    }

    fn estimate_settings(&self) -> EstimateSettings {
        EstimateSettings {
            confidence_level: self.config.confidence_level,
            n_resamples: self.config.estimate_resamples,
            parallel: self.config.parallel,
        }
    }
}

/// Convenience function: analyze cleaned logs with default configuration.
///
/// # Errors
///
/// See [`ExperimentOracle::run`].
pub fn analyze(logs: &CleanLogs) -> Result<ExperimentReport, Error> {
    ExperimentOracle::new().run(logs)
}
