//! Application services: the calculators and the orchestrating engine.

pub mod allocation;
pub mod assumption_resolver;
pub mod demand;
pub mod evaluation;
pub mod fee_calculator;
pub mod landed_cost;
pub mod margin;
pub mod negotiation;
pub mod scorer;

pub use allocation::AllocationPlanner;
pub use assumption_resolver::{AssumptionOverrides, AssumptionResolver};
pub use demand::DemandEstimator;
pub use evaluation::{DealEvaluationEngine, EvaluationRequest};
pub use fee_calculator::{ChannelPricing, FeeCalculator};
pub use landed_cost::{LandedCostCalculator, LandedCostInput};
pub use margin::{MarginEvaluator, MarginResult};
pub use negotiation::NegotiationAdvisor;
pub use scorer::{DealScorer, ScoreInput};
