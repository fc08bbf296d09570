//! # Demand Estimate
//!
//! The demand estimator's output for one channel: a low/mid/high monthly
//! sales range, an additive confidence score with its band, and the
//! absorption capacity the allocation planner works against.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::confidence::ConfidenceLevel;
use serde::{Deserialize, Serialize};

/// Estimated monthly demand for one channel.
///
/// # Invariants
///
/// - `0 <= low <= mid <= high`
/// - `absorption_capacity_per_month >= 0`
/// - `confidence_score` in `[0, 100]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandEstimate {
    /// Pessimistic monthly sales estimate.
    low: f64,
    /// Central monthly sales estimate.
    mid: f64,
    /// Optimistic monthly sales estimate.
    high: f64,
    /// Additive confidence score, 0-100.
    confidence_score: f64,
    /// Confidence band derived from the score.
    confidence: ConfidenceLevel,
    /// Units per month this channel can absorb without flooding it.
    absorption_capacity_per_month: f64,
    /// Human-readable signals that fed the estimate.
    signals: Vec<String>,
}

impl DemandEstimate {
    /// Creates a validated demand estimate.
    ///
    /// The confidence score is capped at 100 and the band derived from the
    /// capped value.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEstimate`] if the range ordering or
    /// non-negativity invariants are violated.
    pub fn new(
        low: f64,
        mid: f64,
        high: f64,
        confidence_score: f64,
        absorption_capacity_per_month: f64,
        signals: Vec<String>,
    ) -> DomainResult<Self> {
        if !(low.is_finite() && mid.is_finite() && high.is_finite()) {
            return Err(DomainError::InvalidEstimate(
                "estimates must be finite".to_string(),
            ));
        }
        if low < 0.0 || absorption_capacity_per_month < 0.0 {
            return Err(DomainError::InvalidEstimate(
                "estimates must be non-negative".to_string(),
            ));
        }
        if low > mid || mid > high {
            return Err(DomainError::InvalidEstimate(format!(
                "range must be ordered: low={low} mid={mid} high={high}"
            )));
        }
        let capped = confidence_score.clamp(0.0, 100.0);
        Ok(Self {
            low,
            mid,
            high,
            confidence_score: capped,
            confidence: ConfidenceLevel::from_score(capped),
            absorption_capacity_per_month,
            signals,
        })
    }

    /// Returns the pessimistic monthly estimate.
    #[inline]
    #[must_use]
    pub const fn low(&self) -> f64 {
        self.low
    }

    /// Returns the central monthly estimate.
    #[inline]
    #[must_use]
    pub const fn mid(&self) -> f64 {
        self.mid
    }

    /// Returns the optimistic monthly estimate.
    #[inline]
    #[must_use]
    pub const fn high(&self) -> f64 {
        self.high
    }

    /// Returns the additive confidence score.
    #[inline]
    #[must_use]
    pub const fn confidence_score(&self) -> f64 {
        self.confidence_score
    }

    /// Returns the confidence band.
    #[inline]
    #[must_use]
    pub const fn confidence(&self) -> ConfidenceLevel {
        self.confidence
    }

    /// Returns the monthly absorption capacity.
    #[inline]
    #[must_use]
    pub const fn absorption_capacity_per_month(&self) -> f64 {
        self.absorption_capacity_per_month
    }

    /// Returns the signals that fed the estimate.
    #[must_use]
    pub fn signals(&self) -> &[String] {
        &self.signals
    }
}
