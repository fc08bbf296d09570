//! # Domain Errors
//!
//! Error types for business rule violations inside the deal evaluation
//! domain.
//!
//! Calculators return [`DomainResult`] and propagate failures upward, where
//! the application layer wraps them into its own error type.

use crate::domain::value_objects::arithmetic::ArithmeticError;
use crate::domain::value_objects::currency::Currency;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error type for domain rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Two money values in different currencies were combined.
    #[error("currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// The currency that was expected.
        expected: Currency,
        /// The currency that was found.
        found: Currency,
    },

    /// A monetary amount failed validation.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A quantity failed validation.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A fractional rate fell outside the `[0, 1]` range.
    #[error("rate {value} outside [0, 1]")]
    InvalidRate {
        /// The rejected value.
        value: Decimal,
    },

    /// An EAN/UPC/GTIN failed validation.
    #[error("invalid EAN: {0}")]
    InvalidEan(String),

    /// A Harmonized System code failed validation.
    #[error("invalid HS code: {0}")]
    InvalidHsCode(String),

    /// A demand estimate violated its ordering invariant.
    #[error("invalid demand estimate: {0}")]
    InvalidEstimate(String),

    /// An FX rate was applied to the wrong currency pair.
    #[error("FX rate {from}->{to} cannot convert {currency}")]
    FxPairMismatch {
        /// Source currency of the rate.
        from: Currency,
        /// Target currency of the rate.
        to: Currency,
        /// Currency of the money being converted.
        currency: Currency,
    },

    /// Checked arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
