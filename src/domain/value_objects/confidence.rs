//! # Confidence Levels
//!
//! Demand estimates carry an additive 0-100 confidence score, banded into
//! [`ConfidenceLevel`] for downstream consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Banded confidence in a demand estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfidenceLevel {
    /// Score below 40: thin or mocked signals.
    Low,
    /// Score 40-69.99: partial signals.
    Medium,
    /// Score 70 and above: strong live signals.
    High,
}

impl ConfidenceLevel {
    /// Score threshold for the High band.
    pub const HIGH_THRESHOLD: f64 = 70.0;
    /// Score threshold for the Medium band.
    pub const MEDIUM_THRESHOLD: f64 = 40.0;

    /// Maps an additive confidence score into a band.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            Self::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banding() {
        assert_eq!(ConfidenceLevel::from_score(0.0), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(39.9), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(40.0), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(69.9), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(70.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(100.0), ConfidenceLevel::High);
    }

    #[test]
    fn ordering() {
        assert!(ConfidenceLevel::Low < ConfidenceLevel::Medium);
        assert!(ConfidenceLevel::Medium < ConfidenceLevel::High);
    }
}
