//! # Entities
//!
//! Domain aggregates and records: evaluation inputs ([`MarketSnapshot`],
//! [`AssumptionSet`]), intermediate results ([`DemandEstimate`],
//! [`ChannelEvaluation`]), and the final [`DealEvaluation`] aggregate.
//!
//! All entities are created fresh per evaluation call and never mutated
//! afterwards.

pub mod allocation_plan;
pub mod assumption_set;
pub mod channel_evaluation;
pub mod deal_evaluation;
pub mod demand_estimate;
pub mod market_snapshot;

pub use allocation_plan::AllocationPlan;
pub use assumption_set::{
    AssumptionSet, DutyMethod, DutyRule, FeeRule, ShippingMethod, ShippingRule,
};
pub use channel_evaluation::{ChannelEvaluation, FeeBreakdown, LandedCost};
pub use deal_evaluation::{DealEvaluation, DealScore, NegotiationSupport, SourcingSuggestion};
pub use demand_estimate::DemandEstimate;
pub use market_snapshot::{DataSource, MarketSnapshot};
