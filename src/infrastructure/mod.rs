//! Infrastructure layer: collaborator adapters and deployment wiring.

pub mod config;
pub mod fx;
pub mod market_data;
pub mod persistence;
