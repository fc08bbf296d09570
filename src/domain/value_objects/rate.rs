//! # Fractional Rates
//!
//! The [`Rate`] value object models fee, duty and VAT percentages as
//! fractional values in `[0, 1]`.
//!
//! Two constructors reflect the two trust levels in the system: defaults and
//! internal tables use [`Rate::clamped`], which forces out-of-range input
//! into the valid range; caller-supplied overrides use [`Rate::new`], which
//! rejects out-of-range input with a validation error instead of silently
//! correcting it.

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fractional rate in `[0, 1]`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    /// The zero rate.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a rate, rejecting values outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRate`] if the value is negative or
    /// greater than one.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(DomainError::InvalidRate { value });
        }
        Ok(Self(value))
    }

    /// Creates a rate, clamping values into `[0, 1]`.
    #[must_use]
    pub fn clamped(value: Decimal) -> Self {
        Self(value.clamp(Decimal::ZERO, Decimal::ONE))
    }

    /// Convenience constructor from basis points (1 bp = 0.0001).
    #[must_use]
    pub fn from_bps(bps: i64) -> Self {
        Self::clamped(Decimal::new(bps, 4))
    }

    /// Returns the fractional value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Decimal {
        self.0
    }

    /// Returns true if the rate is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * Decimal::ONE_HUNDRED)
    }
}
