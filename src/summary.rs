//! Experiment summary aggregation.
//!
//! Per-variant totals and derived KPIs, computed by explicit iteration over
//! the cleaned event log. Recomputed fresh on every analysis run; never a
//! source of truth.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::dataset::{CleanLogs, BOOKING_REQUEST};
use crate::error::Error;
use crate::types::Variant;

/// Totals and KPIs for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariantTotals {
    /// Distinct users assigned to the variant.
    pub tot_users: u64,
    /// Booking-request events observed.
    pub tot_bookings: u64,
    /// Summed revenue, rounded to 3 decimals.
    pub tot_revenue: f64,
    /// Conversion rate `tot_bookings / tot_users`, rounded to 3 decimals.
    pub cvr: f64,
    /// Revenue per user `tot_revenue / tot_users`, rounded to 3 decimals.
    pub rpu: f64,
}

/// Per-variant summary of the experiment, ordered by variant label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    /// Totals per variant, A before B.
    pub variants: BTreeMap<Variant, VariantTotals>,
}

impl ExperimentSummary {
    /// Totals for one variant, if present.
    pub fn get(&self, variant: Variant) -> Option<&VariantTotals> {
        self.variants.get(&variant)
    }
}

/// Round to 3 decimal places, the reporting precision of the summary table.
fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[derive(Default)]
struct Accumulator {
    users: HashSet<u64>,
    bookings: u64,
    revenue: f64,
}

/// Build the per-variant experiment summary from cleaned logs.
///
/// # Errors
///
/// Returns [`Error::NoUsers`] if either variant has no users: the per-user
/// KPIs would be a division by zero, and a report must never carry a silent
/// NaN.
pub fn build_summary(logs: &CleanLogs) -> Result<ExperimentSummary, Error> {
    let mut acc: BTreeMap<Variant, Accumulator> = BTreeMap::new();

    for record in logs.records() {
        let entry = acc.entry(record.variant).or_default();
        entry.users.insert(record.user_id);
        if record.event_type == BOOKING_REQUEST {
            entry.bookings += 1;
        }
        entry.revenue += record.revenue.unwrap_or(0.0);
    }

    let mut variants = BTreeMap::new();
    for variant in Variant::ALL {
        let entry = acc.remove(&variant).unwrap_or_default();
        let tot_users = entry.users.len() as u64;
        if tot_users == 0 {
            return Err(Error::NoUsers { variant });
        }
        let tot_revenue = round3(entry.revenue);
        variants.insert(
            variant,
            VariantTotals {
                tot_users,
                tot_bookings: entry.bookings,
                tot_revenue,
                cvr: round3(entry.bookings as f64 / tot_users as f64),
                rpu: round3(tot_revenue / tot_users as f64),
            },
        );
    }

    Ok(ExperimentSummary { variants })
}
