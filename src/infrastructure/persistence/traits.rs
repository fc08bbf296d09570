//! # Repository Ports
//!
//! Port definitions for the persistence collaborators: completed
//! evaluations, the assumption baseline, and the assumption audit trail.
//!
//! Calibration of the assumption defaults happens out of band; the engine
//! only ever reads the current baseline and appends audit records for
//! per-evaluation overrides.

use crate::domain::entities::assumption_set::AssumptionSet;
use crate::domain::entities::deal_evaluation::DealEvaluation;
use crate::domain::value_objects::ids::{DealId, Ean};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The requested record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind.
        entity: &'static str,
        /// Identifier looked up.
        id: String,
    },

    /// A write conflicted with existing state.
    #[error("repository conflict: {message}")]
    Conflict {
        /// Error message.
        message: String,
    },

    /// The backing store failed.
    #[error("storage error: {message}")]
    Storage {
        /// Error message.
        message: String,
    },
}

impl RepositoryError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a storage error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// One audit entry for an assumption override applied to an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssumptionAuditRecord {
    /// The evaluation the override applied to.
    pub deal_id: DealId,
    /// Dotted field key, e.g. `shipping.cn->uk.air.rate_per_kg`.
    pub field: String,
    /// Who or what supplied the override.
    pub source: String,
    /// When the override was applied.
    pub recorded_at: DateTime<Utc>,
}

/// Store for completed deal evaluations.
#[async_trait]
pub trait EvaluationStore: Send + Sync + fmt::Debug {
    /// Persists one evaluation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the deal id already exists,
    /// or `Storage` on a backend failure.
    async fn save(&self, evaluation: &DealEvaluation) -> RepositoryResult<()>;

    /// Loads one evaluation by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such evaluation exists.
    async fn find(&self, deal_id: DealId) -> RepositoryResult<DealEvaluation>;

    /// Returns every stored evaluation for a barcode, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on a backend failure.
    async fn find_by_ean(&self, ean: &Ean) -> RepositoryResult<Vec<DealEvaluation>>;
}

/// Store for the assumption baseline and its audit trail.
#[async_trait]
pub trait AssumptionStore: Send + Sync + fmt::Debug {
    /// Returns the current assumption baseline.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on a backend failure.
    async fn current(&self) -> RepositoryResult<AssumptionSet>;

    /// Replaces the baseline with a newer version.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new version does not
    /// advance the stored one.
    async fn replace(&self, assumptions: AssumptionSet) -> RepositoryResult<()>;

    /// Appends audit records for the overrides one evaluation used.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on a backend failure.
    async fn append_audit(&self, records: &[AssumptionAuditRecord]) -> RepositoryResult<()>;

    /// Returns the full audit trail, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on a backend failure.
    async fn audit_log(&self) -> RepositoryResult<Vec<AssumptionAuditRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let err = RepositoryError::not_found("evaluation", "abc-123");
        assert!(err.to_string().contains("evaluation not found: abc-123"));
    }

    #[test]
    fn conflict_message() {
        let err = RepositoryError::conflict("version 1 does not advance 2");
        assert!(err.to_string().contains("conflict"));
    }
}
