//! Persistence ports and the in-memory adapters.

pub mod in_memory;
pub mod traits;

pub use in_memory::{InMemoryAssumptionStore, InMemoryEvaluationStore};
pub use traits::{
    AssumptionAuditRecord, AssumptionStore, EvaluationStore, RepositoryError, RepositoryResult,
};
