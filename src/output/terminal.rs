//! Terminal output formatting with colors.

use colored::Colorize;

use crate::result::{ExperimentReport, MetricTest, RevenueRate, Significance};
use crate::types::Variant;

/// Format an ExperimentReport for human-readable terminal output.
pub fn format_report(report: &ExperimentReport) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);
    let confidence_pct = report.metadata.confidence_level * 100.0;

    output.push_str("uplift-oracle\n");
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    output.push_str(&format!(
        "  Users: {}   Seed: {}   Resamples: {} / {}\n",
        report.metadata.n_users,
        report.metadata.seed,
        report.metadata.estimate_resamples,
        report.metadata.test_resamples
    ));
    output.push('\n');

    output.push_str("  Experiment summary\n");
    output.push_str(&format!(
        "    {:<8} {:>8} {:>10} {:>12} {:>7} {:>8}\n",
        "variant", "users", "bookings", "revenue", "cvr", "rpu"
    ));
    for variant in Variant::ALL {
        if let Some(totals) = report.summary.get(variant) {
            output.push_str(&format!(
                "    {:<8} {:>8} {:>10} {:>12.3} {:>7.3} {:>8.3}\n",
                variant.to_string(),
                totals.tot_users,
                totals.tot_bookings,
                totals.tot_revenue,
                totals.cvr,
                totals.rpu
            ));
        }
    }
    output.push('\n');

    format_metric_test(&mut output, &report.conversion, confidence_pct);
    format_metric_test(&mut output, &report.revenue, confidence_pct);

    output.push_str("  Revenue rate (positive revenue only)\n");
    format_rate_line(&mut output, &report.revenue_rate.overall);
    for city in &report.revenue_rate.cities {
        format_rate_line(&mut output, city);
    }
    output.push('\n');

    output.push_str(&sep);
    output.push('\n');
    output.push_str(
        "Note: estimates are bootstrap confidence intervals; p-values are\nempirical tail probabilities of the resampled null distribution.\n",
    );

    output
}

fn format_metric_test(output: &mut String, test: &MetricTest, confidence_pct: f64) {
    output.push_str(&format!(
        "  Test: {} (bootstrap resampling, alternative: {})\n",
        capitalize(&test.metric.to_string()),
        test.alternative
    ));
    output.push_str(&format!(
        "    Estimate for A ({confidence_pct:.0}% confidence): {}\n",
        test.estimate_a
    ));
    output.push_str(&format!(
        "    Estimate for B ({confidence_pct:.0}% confidence): {}\n",
        test.estimate_b
    ));

    if test.uplift.rate_pct >= 0.0 {
        output.push_str(&format!(
            "    Expected uplift: {:.2}%\n",
            test.uplift.rate_pct
        ));
    } else {
        output.push_str(&format!(
            "    Expected downlift: {:.2}%\n",
            -test.uplift.rate_pct
        ));
    }

    output.push_str(&format!("    t-statistic: {:.2}\n", test.observed_t));
    output.push_str(&format!("    P-value: {:.2}%\n", test.p_value * 100.0));
    output.push_str(&format!(
        "    {}\n",
        format_significance(test.significance)
    ));
    output.push('\n');
}

fn format_rate_line(output: &mut String, rate: &RevenueRate) {
    output.push_str(&format!(
        "    {:<12} {:+.2}% +/- {:.2}%   (A: {}, B: {})\n",
        rate.label, rate.rate.rate_pct, rate.rate.error_pct, rate.estimate_a, rate.estimate_b
    ));
}

fn format_significance(significance: Significance) -> String {
    match (significance.at_95, significance.at_99) {
        (true, true) => "\u{2713} Significant at 95% and 99%".green().bold().to_string(),
        (true, false) => "\u{2713} Significant at 95%".green().to_string(),
        _ => "Not significant at 95%".yellow().to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{
        Metadata, PointEstimate, RateBreakdown, RateChange,
    };
    use crate::summary::{ExperimentSummary, VariantTotals};
    use crate::types::{Alternative, Metric};
    use std::collections::BTreeMap;

    fn make_report(p_value: f64) -> ExperimentReport {
        let estimate_a = PointEstimate {
            expected: 5.0,
            error: 0.5,
        };
        let estimate_b = PointEstimate {
            expected: 7.5,
            error: 0.6,
        };
        let metric_test = |metric: Metric| MetricTest {
            metric,
            alternative: Alternative::TwoSided,
            estimate_a,
            estimate_b,
            uplift: RateChange {
                rate_pct: 50.0,
                error_pct: 19.2,
            },
            observed_t: 2.4,
            p_value,
            significance: Significance::from_p_value(p_value),
            n_resamples: 1000,
        };

        let mut variants = BTreeMap::new();
        variants.insert(
            Variant::A,
            VariantTotals {
                tot_users: 100,
                tot_bookings: 10,
                tot_revenue: 500.0,
                cvr: 0.1,
                rpu: 5.0,
            },
        );
        variants.insert(
            Variant::B,
            VariantTotals {
                tot_users: 100,
                tot_bookings: 15,
                tot_revenue: 750.0,
                cvr: 0.15,
                rpu: 7.5,
            },
        );

        ExperimentReport {
            summary: ExperimentSummary { variants },
            conversion: metric_test(Metric::Conversion),
            revenue: metric_test(Metric::Revenue),
            revenue_rate: RateBreakdown {
                overall: RevenueRate {
                    label: "overall".to_string(),
                    estimate_a,
                    estimate_b,
                    rate: RateChange {
                        rate_pct: 50.0,
                        error_pct: 19.2,
                    },
                },
                cities: vec![],
            },
            metadata: Metadata {
                seed: 1234,
                confidence_level: 0.95,
                estimate_resamples: 999,
                test_resamples: 1000,
                n_users: 200,
            },
        }
    }

    #[test]
    fn test_format_significant_report() {
        let output = format_report(&make_report(0.004));
        assert!(output.contains("uplift-oracle"));
        assert!(output.contains("Expected uplift: 50.00%"));
        assert!(output.contains("P-value: 0.40%"));
        assert!(output.contains("Significant at 95% and 99%"));
    }

    #[test]
    fn test_format_insignificant_report() {
        let output = format_report(&make_report(0.42));
        assert!(output.contains("Not significant at 95%"));
        assert!(output.contains("Test: Conversion"));
        assert!(output.contains("Test: Revenue"));
    }

    #[test]
    fn test_summary_rows_present() {
        let output = format_report(&make_report(0.5));
        assert!(output.contains("Experiment summary"));
        assert!(output.contains("0.150"));
        assert!(output.contains("750.000"));
    }
}
