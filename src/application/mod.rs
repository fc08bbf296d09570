//! Application layer: use cases, orchestration and their error types.

pub mod error;
pub mod services;

pub use error::{EvaluationError, EvaluationResult};
