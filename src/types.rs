//! Common enums shared across the analysis pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Experiment arm identifier.
///
/// The experiment has exactly two variants: `A` is the control arm and `B`
/// the treatment arm. Ordering follows the label, so summaries iterate A
/// before B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Control arm.
    A,
    /// Treatment arm.
    B,
}

impl Variant {
    /// Both arms in label order.
    pub const ALL: [Variant; 2] = [Variant::A, Variant::B];
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::A => write!(f, "A"),
            Variant::B => write!(f, "B"),
        }
    }
}

/// Target measure for a bootstrap difference test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Per-user conversion indicator (1.0 if the user generated any revenue).
    Conversion,
    /// Per-user total revenue.
    Revenue,
}

impl Metric {
    /// Name of the derived KPI this metric corresponds to in the
    /// experiment summary.
    pub fn kpi_name(&self) -> &'static str {
        match self {
            Metric::Conversion => "cvr",
            Metric::Revenue => "rpu",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Conversion => write!(f, "conversion"),
            Metric::Revenue => write!(f, "revenue"),
        }
    }
}

/// Alternative hypothesis for the difference test p-value.
///
/// `Larger` asks whether B's mean exceeds A's, `Smaller` the reverse,
/// and `TwoSided` either direction. Selector strings follow the original
/// reporting convention (`"larger"`, `"smaller"`, `"two-sided"`); anything
/// else is rejected with [`Error::InvalidAlternative`] rather than falling
/// back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    /// H1: mean of B > mean of A.
    Larger,
    /// H1: mean of B < mean of A.
    Smaller,
    /// H1: means differ in either direction.
    TwoSided,
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alternative::Larger => write!(f, "larger"),
            Alternative::Smaller => write!(f, "smaller"),
            Alternative::TwoSided => write!(f, "two-sided"),
        }
    }
}

impl FromStr for Alternative {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "larger" => Ok(Alternative::Larger),
            "smaller" => Ok(Alternative::Smaller),
            "two-sided" => Ok(Alternative::TwoSided),
            other => Err(Error::InvalidAlternative(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_ordering() {
        assert!(Variant::A < Variant::B);
        assert_eq!(Variant::ALL, [Variant::A, Variant::B]);
    }

    #[test]
    fn test_alternative_parsing() {
        assert_eq!("larger".parse::<Alternative>().unwrap(), Alternative::Larger);
        assert_eq!("smaller".parse::<Alternative>().unwrap(), Alternative::Smaller);
        assert_eq!(
            "two-sided".parse::<Alternative>().unwrap(),
            Alternative::TwoSided
        );
    }

    #[test]
    fn test_alternative_rejects_unknown_selector() {
        let err = "foo".parse::<Alternative>().unwrap_err();
        assert!(matches!(err, Error::InvalidAlternative(ref s) if s == "foo"));
    }

    #[test]
    fn test_kpi_names() {
        assert_eq!(Metric::Conversion.kpi_name(), "cvr");
        assert_eq!(Metric::Revenue.kpi_name(), "rpu");
    }
}
