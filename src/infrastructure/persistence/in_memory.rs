//! # In-Memory Repositories
//!
//! `tokio::sync::RwLock` backed implementations of the repository ports,
//! used in tests and single-process deployments.

use crate::domain::entities::assumption_set::AssumptionSet;
use crate::domain::entities::deal_evaluation::DealEvaluation;
use crate::domain::value_objects::ids::{DealId, Ean};
use crate::infrastructure::persistence::traits::{
    AssumptionAuditRecord, AssumptionStore, EvaluationStore, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory evaluation store.
#[derive(Debug, Default)]
pub struct InMemoryEvaluationStore {
    evaluations: RwLock<HashMap<DealId, DealEvaluation>>,
}

impl InMemoryEvaluationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored evaluations.
    pub async fn len(&self) -> usize {
        self.evaluations.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.evaluations.read().await.is_empty()
    }
}

#[async_trait]
impl EvaluationStore for InMemoryEvaluationStore {
    async fn save(&self, evaluation: &DealEvaluation) -> RepositoryResult<()> {
        let mut evaluations = self.evaluations.write().await;
        if evaluations.contains_key(&evaluation.deal_id) {
            return Err(RepositoryError::conflict(format!(
                "evaluation {} already stored",
                evaluation.deal_id
            )));
        }
        evaluations.insert(evaluation.deal_id, evaluation.clone());
        Ok(())
    }

    async fn find(&self, deal_id: DealId) -> RepositoryResult<DealEvaluation> {
        self.evaluations
            .read()
            .await
            .get(&deal_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("evaluation", deal_id))
    }

    async fn find_by_ean(&self, ean: &Ean) -> RepositoryResult<Vec<DealEvaluation>> {
        let mut matches: Vec<DealEvaluation> = self
            .evaluations
            .read()
            .await
            .values()
            .filter(|evaluation| &evaluation.ean == ean)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.evaluated_at.cmp(&a.evaluated_at));
        Ok(matches)
    }
}

/// In-memory assumption store.
#[derive(Debug)]
pub struct InMemoryAssumptionStore {
    baseline: RwLock<AssumptionSet>,
    audit: RwLock<Vec<AssumptionAuditRecord>>,
}

impl InMemoryAssumptionStore {
    /// Creates a store seeded with the given baseline.
    #[must_use]
    pub fn new(baseline: AssumptionSet) -> Self {
        Self {
            baseline: RwLock::new(baseline),
            audit: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryAssumptionStore {
    fn default() -> Self {
        Self::new(AssumptionSet::system_defaults(1))
    }
}

#[async_trait]
impl AssumptionStore for InMemoryAssumptionStore {
    async fn current(&self) -> RepositoryResult<AssumptionSet> {
        Ok(self.baseline.read().await.clone())
    }

    async fn replace(&self, assumptions: AssumptionSet) -> RepositoryResult<()> {
        let mut baseline = self.baseline.write().await;
        if assumptions.version() <= baseline.version() {
            return Err(RepositoryError::conflict(format!(
                "version {} does not advance stored version {}",
                assumptions.version(),
                baseline.version()
            )));
        }
        *baseline = assumptions;
        Ok(())
    }

    async fn append_audit(&self, records: &[AssumptionAuditRecord]) -> RepositoryResult<()> {
        self.audit.write().await.extend_from_slice(records);
        Ok(())
    }

    async fn audit_log(&self) -> RepositoryResult<Vec<AssumptionAuditRecord>> {
        Ok(self.audit.read().await.clone())
    }
}
