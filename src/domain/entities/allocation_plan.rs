//! # Allocation Plan
//!
//! The allocation planner's output: per-channel quantities plus a hold
//! bucket for units that cannot be safely placed.

use crate::domain::value_objects::channel::Marketplace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distribution of the purchased quantity across selling channels.
///
/// # Invariants
///
/// - `sum(allocated.values()) + hold == total_quantity`
/// - every per-channel allocation respects the planner's caps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPlan {
    /// Quantity the plan covers.
    pub total_quantity: u32,
    /// Units placed per channel. BTreeMap keeps serialization stable.
    pub allocated: BTreeMap<Marketplace, u32>,
    /// Units held back.
    pub hold: u32,
    /// Why units were held and how channels were filled.
    pub rationale: String,
}

impl AllocationPlan {
    /// A plan that holds everything, used when no channel is eligible.
    #[must_use]
    pub fn hold_all(total_quantity: u32, rationale: impl Into<String>) -> Self {
        Self {
            total_quantity,
            allocated: BTreeMap::new(),
            hold: total_quantity,
            rationale: rationale.into(),
        }
    }

    /// Total units placed across channels.
    #[must_use]
    pub fn total_allocated(&self) -> u32 {
        self.allocated.values().sum()
    }

    /// Checks the conservation invariant.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_allocated() + self.hold == self.total_quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_all_is_balanced() {
        let plan = AllocationPlan::hold_all(120, "no sellable channels");
        assert_eq!(plan.hold, 120);
        assert_eq!(plan.total_allocated(), 0);
        assert!(plan.is_balanced());
    }

    #[test]
    fn balance_detects_mismatch() {
        let mut plan = AllocationPlan::hold_all(100, "x");
        plan.allocated.insert(Marketplace::AmazonUs, 30);
        assert!(!plan.is_balanced());
        plan.hold = 70;
        assert!(plan.is_balanced());
    }
}
