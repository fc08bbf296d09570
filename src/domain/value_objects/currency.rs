//! # Currency and FX Rates
//!
//! ISO currency codes for the markets the engine trades across, and the
//! [`FxRate`] value object used at the single conversion point of the
//! margin evaluator.
//!
//! # Examples
//!
//! ```
//! use deal_engine::domain::value_objects::currency::{Currency, FxRate};
//! use rust_decimal::Decimal;
//!
//! let usd_gbp = FxRate::new(Currency::Usd, Currency::Gbp, Decimal::new(80, 2)).unwrap();
//! assert_eq!(usd_gbp.invert().unwrap().from(), Currency::Gbp);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::CheckedArithmetic;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported settlement currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Currency {
    /// United States dollar.
    Usd,
    /// Pound sterling.
    Gbp,
    /// Euro.
    Eur,
    /// Australian dollar.
    Aud,
    /// Canadian dollar.
    Cad,
    /// Japanese yen.
    Jpy,
    /// Chinese yuan renminbi.
    Cny,
}

impl Currency {
    /// Returns the ISO 4217 code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Eur => "EUR",
            Self::Aud => "AUD",
            Self::Cad => "CAD",
            Self::Jpy => "JPY",
            Self::Cny => "CNY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An exchange rate from one currency to another.
///
/// Rates are directional: converting with a rate whose `from` does not
/// match the money's currency is a domain error, never a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FxRate {
    /// Source currency.
    from: Currency,
    /// Target currency.
    to: Currency,
    /// Units of `to` per unit of `from`.
    rate: Decimal,
}

impl FxRate {
    /// Creates a new FX rate.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAmount`] if the rate is not strictly
    /// positive.
    pub fn new(from: Currency, to: Currency, rate: Decimal) -> DomainResult<Self> {
        if rate <= Decimal::ZERO {
            return Err(DomainError::InvalidAmount(format!(
                "FX rate must be positive, got {rate}"
            )));
        }
        Ok(Self { from, to, rate })
    }

    /// Returns the identity rate for a currency.
    #[must_use]
    pub const fn identity(currency: Currency) -> Self {
        Self {
            from: currency,
            to: currency,
            rate: Decimal::ONE,
        }
    }

    /// Returns the source currency.
    #[inline]
    #[must_use]
    pub const fn from(&self) -> Currency {
        self.from
    }

    /// Returns the target currency.
    #[inline]
    #[must_use]
    pub const fn to(&self) -> Currency {
        self.to
    }

    /// Returns the numeric rate.
    #[inline]
    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns the inverse rate (`to -> from`).
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error if the inversion overflows; the rate is
    /// guaranteed non-zero by construction.
    pub fn invert(&self) -> DomainResult<Self> {
        let inverted = Decimal::ONE.safe_div(self.rate)?;
        Ok(Self {
            from: self.to,
            to: self.from,
            rate: inverted,
        })
    }
}

impl fmt::Display for FxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{} @ {}", self.from, self.to, self.rate)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn currency_codes() {
        assert_eq!(Currency::Usd.code(), "USD");
        assert_eq!(Currency::Gbp.to_string(), "GBP");
    }

    #[test]
    fn fx_rate_rejects_non_positive() {
        assert!(FxRate::new(Currency::Usd, Currency::Gbp, Decimal::ZERO).is_err());
        assert!(FxRate::new(Currency::Usd, Currency::Gbp, Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn fx_rate_inverts() {
        let rate = FxRate::new(Currency::Usd, Currency::Gbp, Decimal::new(80, 2)).unwrap();
        let inverse = rate.invert().unwrap();
        assert_eq!(inverse.from(), Currency::Gbp);
        assert_eq!(inverse.to(), Currency::Usd);
        assert_eq!(inverse.rate(), Decimal::new(125, 2));
    }

    #[test]
    fn identity_rate() {
        let rate = FxRate::identity(Currency::Eur);
        assert_eq!(rate.rate(), Decimal::ONE);
        assert_eq!(rate.from(), rate.to());
    }

    #[test]
    fn serde_roundtrip() {
        let rate = FxRate::new(Currency::Usd, Currency::Aud, Decimal::new(152, 2)).unwrap();
        let json = serde_json::to_string(&rate).unwrap();
        let back: FxRate = serde_json::from_str(&json).unwrap();
        assert_eq!(rate, back);
    }
}
