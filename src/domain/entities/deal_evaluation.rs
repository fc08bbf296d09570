//! # Deal Evaluation
//!
//! The aggregate result of one evaluation call: the weighted score with
//! its breakdown, the decision, per-channel analysis, the allocation plan,
//! and (for weak deals) negotiation support.
//!
//! Evaluations are immutable once produced and are handed to the external
//! persistence collaborator as an opaque snapshot.

use crate::domain::entities::allocation_plan::AllocationPlan;
use crate::domain::entities::channel_evaluation::ChannelEvaluation;
use crate::domain::value_objects::channel::Marketplace;
use crate::domain::value_objects::decision::DealDecision;
use crate::domain::value_objects::ids::{DealId, Ean};
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::rate::Rate;
use crate::domain::value_objects::region::Region;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The weighted 0-100 deal quality score and its factor breakdown.
///
/// Each factor is a 0-100 subscore; `overall` is their weighted sum
/// (margin 0.35, demand confidence 0.25, volume risk 0.25, data
/// reliability 0.15) rounded to the nearest integer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealScore {
    /// Weighted composite, 0-100.
    pub overall: u8,
    /// Margin subscore.
    pub margin: f64,
    /// Demand confidence subscore.
    pub demand_confidence: f64,
    /// Volume risk subscore (higher is safer).
    pub volume_risk: f64,
    /// Data reliability subscore.
    pub data_reliability: f64,
}

/// Supplier negotiation targets derived from the best channel's proceeds.
///
/// All prices are in the buy-side currency, rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationSupport {
    /// Buy price that would yield a 25% margin.
    pub target_buy_price: Money,
    /// Buy price below which the deal is still worth 15%.
    pub walk_away_price: Money,
    /// Per-unit saving if the target is reached.
    pub savings_per_unit: Money,
    /// Saving across the full quantity.
    pub total_savings: Money,
}

/// A known-cheaper sourcing alternative from the reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcingSuggestion {
    /// Suggested origin region.
    pub region: Region,
    /// Supplier shape to approach there.
    pub supplier_type: String,
    /// Rough cost saving versus the current origin.
    pub estimated_savings: Rate,
    /// Short rationale.
    pub note: String,
}

/// The immutable aggregate produced by one evaluation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealEvaluation {
    /// Unique identifier for this evaluation.
    pub deal_id: DealId,
    /// The product evaluated.
    pub ean: Ean,
    /// Weighted score and breakdown.
    pub score: DealScore,
    /// Buy / Renegotiate / Source Elsewhere / Pass.
    pub decision: DealDecision,
    /// Human-readable reasoning behind the decision.
    pub explanation: String,
    /// Highest-margin sellable channel, when one exists.
    pub best_channel: Option<Marketplace>,
    /// Per-channel results, ordered by margin descending.
    pub channel_analysis: Vec<ChannelEvaluation>,
    /// How the quantity would be distributed.
    pub allocation: AllocationPlan,
    /// Present for Renegotiate and Source Elsewhere decisions.
    pub negotiation: Option<NegotiationSupport>,
    /// Present for Source Elsewhere decisions.
    pub sourcing_suggestions: Vec<SourcingSuggestion>,
    /// When the evaluation was produced.
    pub evaluated_at: DateTime<Utc>,
}

impl DealEvaluation {
    /// Returns the best channel's evaluation, when one exists.
    #[must_use]
    pub fn best_channel_evaluation(&self) -> Option<&ChannelEvaluation> {
        let best = self.best_channel?;
        self.channel_analysis.iter().find(|c| c.marketplace == best)
    }
}
