//! In-memory representation of cleaned experiment logs.
//!
//! The engine consumes logs that have already been cleaned by the ingestion
//! pipeline: one event per row, with users already validated for consistent
//! variant assignment. Grouping and aggregation are explicit iteration over
//! record vectors, with no implicit dataframe operations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Metric, Variant};

/// Event type marking a completed booking funnel entry.
pub const BOOKING_REQUEST: &str = "booking_request";

/// One cleaned event log row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// Analysis unit key.
    pub user_id: u64,
    /// Arm the user was assigned to.
    pub variant: Variant,
    /// City the event originated from.
    pub city: String,
    /// Event type label (see [`BOOKING_REQUEST`]).
    pub event_type: String,
    /// Revenue attached to the event; `None` is treated as zero.
    pub revenue: Option<f64>,
    /// Event timestamp, ISO-8601. Carried through for reporting
    /// collaborators; not used by the inference engine.
    pub datetime: String,
}

/// A cleaned event log table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanLogs {
    records: Vec<LogRecord>,
}

impl CleanLogs {
    /// Wrap a vector of cleaned records.
    pub fn new(records: Vec<LogRecord>) -> Self {
        Self { records }
    }

    /// All event rows.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Number of event rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aggregate events into one row per user.
    ///
    /// Revenue is summed with `None` counted as zero; variant and city take
    /// the first occurrence (cleaning guarantees a single variant per user);
    /// conversion is 1.0 when the summed revenue is positive. Rows keep
    /// first-seen user order.
    pub fn user_table(&self) -> UserTable {
        let mut index: HashMap<u64, usize> = HashMap::new();
        let mut rows: Vec<UserRow> = Vec::new();

        for record in &self.records {
            let revenue = record.revenue.unwrap_or(0.0);
            match index.get(&record.user_id) {
                Some(&i) => rows[i].revenue += revenue,
                None => {
                    index.insert(record.user_id, rows.len());
                    rows.push(UserRow {
                        user_id: record.user_id,
                        variant: record.variant,
                        city: record.city.clone(),
                        revenue,
                        conversion: 0.0,
                    });
                }
            }
        }
        for row in &mut rows {
            row.conversion = if row.revenue > 0.0 { 1.0 } else { 0.0 };
        }

        UserTable { rows }
    }
}

/// Per-user aggregate of the cleaned logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    /// Analysis unit key.
    pub user_id: u64,
    /// Assigned arm.
    pub variant: Variant,
    /// First observed city.
    pub city: String,
    /// Summed revenue.
    pub revenue: f64,
    /// 1.0 if the user generated any revenue, 0.0 otherwise.
    pub conversion: f64,
}

/// One row per user, the unit of analysis for all inference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserTable {
    rows: Vec<UserRow>,
}

impl UserTable {
    /// All user rows.
    pub fn rows(&self) -> &[UserRow] {
        &self.rows
    }

    /// Number of distinct users.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Metric column for one variant, in row order.
    pub fn metric_values(&self, variant: Variant, metric: Metric) -> Vec<f64> {
        self.rows
            .iter()
            .filter(|row| row.variant == variant)
            .map(|row| match metric {
                Metric::Conversion => row.conversion,
                Metric::Revenue => row.revenue,
            })
            .collect()
    }

    /// Users with strictly positive revenue, preserving order.
    pub fn with_positive_revenue(&self) -> UserTable {
        UserTable {
            rows: self
                .rows
                .iter()
                .filter(|row| row.revenue > 0.0)
                .cloned()
                .collect(),
        }
    }

    /// Users from a single city, preserving order.
    pub fn in_city(&self, city: &str) -> UserTable {
        UserTable {
            rows: self
                .rows
                .iter()
                .filter(|row| row.city == city)
                .cloned()
                .collect(),
        }
    }

    /// Distinct cities in first-seen order.
    pub fn cities(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for row in &self.rows {
            if !seen.iter().any(|c| c == &row.city) {
                seen.push(row.city.clone());
            }
        }
        seen
    }
}
