//! # Checked Arithmetic
//!
//! Safe arithmetic over [`rust_decimal::Decimal`] for money-bearing code.
//!
//! Every calculator in the engine goes through [`CheckedArithmetic`] instead
//! of the bare operators, so overflow and division by zero surface as
//! [`ArithmeticError`] values rather than panics.
//!
//! # Examples
//!
//! ```
//! use deal_engine::domain::value_objects::arithmetic::CheckedArithmetic;
//! use rust_decimal::Decimal;
//!
//! let subtotal = Decimal::new(13265, 2);
//! let rate = Decimal::new(1325, 4);
//! let fee = subtotal.safe_mul(rate).unwrap();
//! assert_eq!(fee.round_dp(2), Decimal::new(1758, 2));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Error type for arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation overflowed the decimal range.
    #[error("arithmetic overflow")]
    Overflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Extension trait providing checked arithmetic with explicit errors.
pub trait CheckedArithmetic: Sized {
    /// Adds two values, failing on overflow.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] if the result does not fit.
    fn safe_add(self, other: Self) -> ArithmeticResult<Self>;

    /// Subtracts `other` from `self`, failing on overflow.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] if the result does not fit.
    fn safe_sub(self, other: Self) -> ArithmeticResult<Self>;

    /// Multiplies two values, failing on overflow.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] if the result does not fit.
    fn safe_mul(self, other: Self) -> ArithmeticResult<Self>;

    /// Divides `self` by `other`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if `other` is zero and
    /// [`ArithmeticError::Overflow`] if the result does not fit.
    fn safe_div(self, other: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    fn safe_add(self, other: Self) -> ArithmeticResult<Self> {
        self.checked_add(other).ok_or(ArithmeticError::Overflow)
    }

    fn safe_sub(self, other: Self) -> ArithmeticResult<Self> {
        self.checked_sub(other).ok_or(ArithmeticError::Overflow)
    }

    fn safe_mul(self, other: Self) -> ArithmeticResult<Self> {
        self.checked_mul(other).ok_or(ArithmeticError::Overflow)
    }

    fn safe_div(self, other: Self) -> ArithmeticResult<Self> {
        if other.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(other).ok_or(ArithmeticError::Overflow)
    }
}
