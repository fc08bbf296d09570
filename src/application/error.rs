//! # Application Errors
//!
//! Error types for evaluation use cases.
//!
//! # Error Hierarchy
//!
//! ```text
//! EvaluationError
//! ├── Domain(DomainError)           - Value/entity invariant violations
//! ├── MarketData(MarketDataError)   - Snapshot collection failures
//! ├── Repository(RepositoryError)   - Persistence collaborator failures
//! ├── Validation(String)            - Request validation failures
//! ├── InvalidOverride(String)       - Rejected assumption overrides
//! └── NoMarketData                  - The one fatal data condition
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::arithmetic::ArithmeticError;
use crate::infrastructure::market_data::error::MarketDataError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error for deal evaluation.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Market data collaborator failure.
    #[error("market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Persistence collaborator failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// An assumption override was rejected.
    #[error("invalid override: {0}")]
    InvalidOverride(String),

    /// No marketplace or peer-marketplace snapshot was available.
    #[error("no market data: no marketplace snapshots available for evaluation")]
    NoMarketData,
}

impl From<ArithmeticError> for EvaluationError {
    fn from(err: ArithmeticError) -> Self {
        Self::Domain(DomainError::from(err))
    }
}

impl EvaluationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an invalid-override error.
    #[must_use]
    pub fn invalid_override(message: impl Into<String>) -> Self {
        Self::InvalidOverride(message.into())
    }

    /// Returns true if this is a validation or override rejection.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidOverride(_))
    }
}

/// Result type for evaluation operations.
pub type EvaluationResult<T> = Result<T, EvaluationError>;
