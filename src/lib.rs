//! # uplift-oracle
//!
//! Bootstrap-based statistical inference for two-variant experiments.
//!
//! This crate analyzes cleaned A/B experiment logs, outputting:
//! - Bootstrap confidence-interval estimates per variant
//! - A paired-resampling difference test with empirical p-values
//! - Relative uplift with first-order error propagation
//! - Per-variant summary KPIs (conversion rate, revenue per user)
//!
//! All resampling draws from a single seedable [`RandomSource`], so a
//! report is reproducible bit for bit from its seed and input table; the
//! two variants' results in one run are deliberately linked through one
//! advancing stream.
//!
//! ## Quick Start
//!
//! ```ignore
//! use uplift_oracle::{analyze, output, CleanLogs};
//!
//! let logs = CleanLogs::new(records);
//! let report = analyze(&logs)?;
//!
//! println!("{}", output::terminal::format_report(&report));
//! ```
//!
//! Ingestion from a persisted store, record-cleaning heuristics, and
//! plotting are collaborators outside this crate: it consumes logs that
//! are already cleaned.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod dataset;
mod error;
mod experiment;
mod random;
mod result;
mod summary;
mod types;

// Functional modules
pub mod analysis;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use config::Config;
pub use dataset::{CleanLogs, LogRecord, UserRow, UserTable, BOOKING_REQUEST};
pub use error::Error;
pub use experiment::{analyze, ExperimentOracle};
pub use random::RandomSource;
pub use result::{
    ExperimentReport, Metadata, MetricTest, PointEstimate, RateBreakdown, RateChange,
    RevenueRate, Significance,
};
pub use summary::{build_summary, ExperimentSummary, VariantTotals};
pub use types::{Alternative, Metric, Variant};

/// Default seed of the shared random source.
pub const DEFAULT_SEED: u64 = 1234;

/// Default confidence level (95%).
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Default number of resamples per confidence-interval estimate.
pub const DEFAULT_ESTIMATE_RESAMPLES: usize = 9_999;

/// Default number of resamples per null distribution.
pub const DEFAULT_TEST_RESAMPLES: usize = 10_000;
