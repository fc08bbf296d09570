//! # Money
//!
//! A decimal amount tagged with its [`Currency`], with checked arithmetic
//! and a single explicit conversion operation.
//!
//! Mixing currencies is a [`DomainError::CurrencyMismatch`]; conversion
//! happens only through [`Money::convert`] with an [`FxRate`] whose pair is
//! validated against the money's currency.
//!
//! # Examples
//!
//! ```
//! use deal_engine::domain::value_objects::money::Money;
//! use deal_engine::domain::value_objects::currency::{Currency, FxRate};
//! use rust_decimal::Decimal;
//!
//! let landed = Money::new(Decimal::new(11630, 2), Currency::Usd);
//! let rate = FxRate::new(Currency::Usd, Currency::Gbp, Decimal::new(80, 2)).unwrap();
//! let converted = landed.convert(&rate).unwrap();
//! assert_eq!(converted.amount(), Decimal::new(9304, 2));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::CheckedArithmetic;
use crate::domain::value_objects::currency::{Currency, FxRate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary amount in a specific currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The decimal amount.
    amount: Decimal,
    /// The currency of the amount.
    currency: Currency,
}

impl Money {
    /// Creates a new money value. Negative amounts are allowed; margins can
    /// legitimately be negative.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Returns a zero value in the given currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns the amount.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    #[inline]
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is strictly positive.
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if the amount is strictly negative.
    #[inline]
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Returns true if the amount is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns this value rounded to two decimal places.
    #[must_use]
    pub fn round2(&self) -> Self {
        Self {
            amount: self.amount.round_dp(2),
            currency: self.currency,
        }
    }

    /// Adds another money value in the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CurrencyMismatch`] on differing currencies or
    /// an arithmetic error on overflow.
    pub fn safe_add(&self, other: Self) -> DomainResult<Self> {
        self.ensure_same_currency(other)?;
        Ok(Self {
            amount: self.amount.safe_add(other.amount)?,
            currency: self.currency,
        })
    }

    /// Subtracts another money value in the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CurrencyMismatch`] on differing currencies or
    /// an arithmetic error on overflow.
    pub fn safe_sub(&self, other: Self) -> DomainResult<Self> {
        self.ensure_same_currency(other)?;
        Ok(Self {
            amount: self.amount.safe_sub(other.amount)?,
            currency: self.currency,
        })
    }

    /// Multiplies the amount by a scalar.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error on overflow.
    pub fn mul_decimal(&self, factor: Decimal) -> DomainResult<Self> {
        Ok(Self {
            amount: self.amount.safe_mul(factor)?,
            currency: self.currency,
        })
    }

    /// Divides the amount by a scalar.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error on overflow or division by zero.
    pub fn div_decimal(&self, divisor: Decimal) -> DomainResult<Self> {
        Ok(Self {
            amount: self.amount.safe_div(divisor)?,
            currency: self.currency,
        })
    }

    /// Converts this value to another currency with the given rate.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::FxPairMismatch`] if the rate's source currency
    /// does not match this money's currency, or an arithmetic error on
    /// overflow.
    pub fn convert(&self, rate: &FxRate) -> DomainResult<Self> {
        if rate.from() != self.currency {
            return Err(DomainError::FxPairMismatch {
                from: rate.from(),
                to: rate.to(),
                currency: self.currency,
            });
        }
        Ok(Self {
            amount: self.amount.safe_mul(rate.rate())?,
            currency: rate.to(),
        })
    }

    fn ensure_same_currency(&self, other: Self) -> DomainResult<()> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch {
                expected: self.currency,
                found: other.currency,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), Currency::Usd)
    }

    #[test]
    fn add_same_currency() {
        let total = usd(1050).safe_add(usd(250)).unwrap();
        assert_eq!(total, usd(1300));
    }

    #[test]
    fn add_mismatched_currency_fails() {
        let gbp = Money::new(Decimal::ONE, Currency::Gbp);
        let result = usd(100).safe_add(gbp);
        assert!(matches!(
            result,
            Err(DomainError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn subtraction_can_go_negative() {
        let margin = usd(100).safe_sub(usd(250)).unwrap();
        assert!(margin.is_negative());
        assert_eq!(margin.amount(), Decimal::new(-150, 2));
    }

    #[test]
    fn convert_checks_pair() {
        let rate = FxRate::new(Currency::Gbp, Currency::Usd, Decimal::new(125, 2)).unwrap();
        let result = usd(100).convert(&rate);
        assert!(matches!(result, Err(DomainError::FxPairMismatch { .. })));
    }

    #[test]
    fn convert_applies_rate() {
        let rate = FxRate::new(Currency::Usd, Currency::Gbp, Decimal::new(80, 2)).unwrap();
        let converted = usd(11630).convert(&rate).unwrap();
        assert_eq!(converted.currency(), Currency::Gbp);
        assert_eq!(converted.amount(), Decimal::new(9304, 2));
    }

    #[test]
    fn round2_rounds_half_even() {
        let value = Money::new(Decimal::new(114768, 3), Currency::Usd);
        assert_eq!(value.round2().amount(), Decimal::new(11477, 2));
    }

    #[test]
    fn display_format() {
        assert_eq!(usd(1234).to_string(), "12.34 USD");
    }
}
