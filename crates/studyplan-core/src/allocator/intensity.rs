use std::fmt;

use serde::{Deserialize, Serialize};

/// How hard a subject is pushed on a given day, based on days left until its exam.
///
/// Serialized as its multiplier (1.0, 1.2 or 1.5) so that exported records
/// carry the raw weighting factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    /// Exams at most this many days away are studied at high intensity.
    pub const HIGH_WITHIN_DAYS: i64 = 3;
    /// Exams at most this many days away are studied at medium intensity.
    pub const MEDIUM_WITHIN_DAYS: i64 = 7;

    pub fn for_days_left(days_left: i64) -> Self {
        if days_left <= Self::HIGH_WITHIN_DAYS {
            Intensity::High
        } else if days_left <= Self::MEDIUM_WITHIN_DAYS {
            Intensity::Medium
        } else {
            Intensity::Low
        }
    }

    /// Weight multiplier applied to the subject's difficulty.
    pub fn multiplier(self) -> f64 {
        match self {
            Intensity::Low => 1.0,
            Intensity::Medium => 1.2,
            Intensity::High => 1.5,
        }
    }

    /// Map a multiplier back to its display level.
    ///
    /// Below 1.1 is low, below 1.4 is medium, anything else is high.
    pub fn classify(multiplier: f64) -> Self {
        if multiplier < 1.1 {
            Intensity::Low
        } else if multiplier < 1.4 {
            Intensity::Medium
        } else {
            Intensity::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Intensity> for f64 {
    fn from(value: Intensity) -> Self {
        value.multiplier()
    }
}

impl From<f64> for Intensity {
    fn from(value: f64) -> Self {
        Intensity::classify(value)
    }
}
