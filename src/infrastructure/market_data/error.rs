//! # Market Data Errors
//!
//! Error types for market data collection.
//!
//! Every variant except a provider misconfiguration is non-fatal to an
//! evaluation: the collector logs it and moves on to the next venue. The
//! evaluation only fails when no venue yields a snapshot at all.
//!
//! # Examples
//!
//! ```
//! use deal_engine::infrastructure::market_data::error::MarketDataError;
//!
//! let error = MarketDataError::timeout("request timed out", Some(5000));
//! assert!(error.is_retryable());
//!
//! let error = MarketDataError::deserialize("bad payload");
//! assert!(!error.is_retryable());
//! ```

use crate::domain::value_objects::channel::Marketplace;
use thiserror::Error;

/// Error type for market data provider operations.
#[derive(Debug, Clone, Error)]
pub enum MarketDataError {
    /// The venue has no listing for this product.
    #[error("no listing on {marketplace} for ean {ean}")]
    NotFound {
        /// The venue queried.
        marketplace: Marketplace,
        /// The barcode queried.
        ean: String,
    },

    /// Network or HTTP-level failure.
    #[error("market data http error: {message}")]
    Http {
        /// Error message.
        message: String,
    },

    /// The request timed out.
    #[error("market data timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout in milliseconds, when known.
        timeout_ms: Option<u64>,
    },

    /// The response could not be parsed.
    #[error("market data parse error: {message}")]
    Deserialize {
        /// Error message.
        message: String,
    },

    /// The provider itself is misconfigured.
    #[error("market data configuration error: {message}")]
    Configuration {
        /// Error message.
        message: String,
    },
}

impl MarketDataError {
    /// Creates a not-found error for one venue and barcode.
    #[must_use]
    pub fn not_found(marketplace: Marketplace, ean: impl Into<String>) -> Self {
        Self::NotFound {
            marketplace,
            ean: ean.into(),
        }
    }

    /// Creates an HTTP error.
    #[must_use]
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>, timeout_ms: Option<u64>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms,
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn deserialize(message: impl Into<String>) -> Self {
        Self::Deserialize {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns true if retrying the request might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Timeout { .. })
    }

    /// Returns true if the venue simply has no listing. The collector
    /// treats this as an empty result rather than a failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for market data operations.
pub type MarketDataResult<T> = Result<T, MarketDataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(MarketDataError::http("503").is_retryable());
        assert!(MarketDataError::timeout("slow", Some(5000)).is_retryable());
        assert!(!MarketDataError::deserialize("bad json").is_retryable());
        assert!(!MarketDataError::not_found(Marketplace::AmazonUs, "5012345678900").is_retryable());
    }

    #[test]
    fn not_found_classification() {
        let err = MarketDataError::not_found(Marketplace::EbayUk, "5012345678900");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("ebay.co.uk"));
    }
}
