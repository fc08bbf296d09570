//! # Identifier Types
//!
//! Strongly typed identifiers for deals and products.
//!
//! - [`DealId`]: UUID-based evaluation identifier
//! - [`Ean`]: validated EAN/UPC/GTIN product barcode

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a deal evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealId(Uuid);

impl DealId {
    /// Generates a new random identifier.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[inline]
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated EAN/UPC/GTIN product barcode.
///
/// Accepts 8 to 14 digits, which covers EAN-8, UPC-A, EAN-13 and GTIN-14.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ean(String);

impl Ean {
    /// Creates a validated EAN.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEan`] if the input is not 8-14 digits.
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let len = value.len();
        if !(8..=14).contains(&len) || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidEan(value));
        }
        Ok(Self(value))
    }

    /// Returns the barcode digits.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ean {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ean> for String {
    fn from(ean: Ean) -> Self {
        ean.0
    }
}

impl fmt::Display for Ean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
