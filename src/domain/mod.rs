//! # Domain Layer
//!
//! Pure business types for deal evaluation: validated value objects,
//! immutable entities, and the domain error taxonomy. No I/O, no async,
//! no dependencies on the application or infrastructure layers.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
