//! # Allocation Planner
//!
//! Distributes the purchased quantity across sellable channels in two
//! phases, holding back anything that cannot be safely placed.
//!
//! - Phase 1 places up to 65% of the quantity into the highest-margin
//!   channels first.
//! - Phase 2 places the remainder into the fastest-moving channels
//!   (largest monthly absorption first).
//!
//! No channel ever receives more than
//! `min(3 x monthly_capacity, 30% x total_quantity)`. Distributor
//! channels are all-or-nothing: they take at least their minimum order
//! quantity or none at all.

use crate::domain::entities::allocation_plan::AllocationPlan;
use crate::domain::entities::assumption_set::AssumptionSet;
use crate::domain::entities::channel_evaluation::ChannelEvaluation;
use crate::domain::value_objects::channel::{ChannelType, Marketplace};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::debug;

/// Share of the total quantity placed by margin in phase 1.
const PHASE_ONE_SHARE: f64 = 0.65;
/// Months of absorption a single channel may carry.
const CAPACITY_MONTHS: f64 = 3.0;
/// Share of the total quantity any single channel may carry.
const CHANNEL_SHARE_CAP: f64 = 0.30;
/// Minimum margin percent for phase 1 placement.
const PHASE_ONE_MIN_MARGIN: f64 = 15.0;

/// Pure allocation planner.
#[derive(Debug, Clone, Default)]
pub struct AllocationPlanner;

struct Candidate {
    marketplace: Marketplace,
    margin_percent: f64,
    capacity: f64,
    cap: u32,
    allocated: u32,
    moq: Option<u32>,
}

impl Candidate {
    fn headroom(&self) -> u32 {
        self.cap.saturating_sub(self.allocated)
    }
}

impl AllocationPlanner {
    /// Creates a new planner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Plans the distribution of `quantity` units across the sellable
    /// channels.
    #[must_use]
    pub fn plan(
        &self,
        channels: &[ChannelEvaluation],
        quantity: u32,
        assumptions: &AssumptionSet,
    ) -> AllocationPlan {
        if quantity == 0 {
            return AllocationPlan::hold_all(0, "nothing to allocate");
        }

        let mut candidates: Vec<Candidate> = channels
            .iter()
            .filter(|channel| channel.recommendation.is_sellable())
            .map(|channel| {
                let capacity = channel.absorption_capacity();
                Candidate {
                    marketplace: channel.marketplace,
                    margin_percent: channel.margin_percent,
                    capacity,
                    cap: channel_cap(capacity, quantity),
                    allocated: 0,
                    moq: distributor_moq(channel, assumptions),
                }
            })
            .collect();

        if candidates.is_empty() {
            return AllocationPlan::hold_all(
                quantity,
                "no channel met the 15% margin floor; holding all units",
            );
        }

        // Phase 1: 65% of the quantity, best margin first.
        let phase_one_budget = scale(quantity, PHASE_ONE_SHARE);
        candidates.sort_by(|a, b| {
            b.margin_percent
                .partial_cmp(&a.margin_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut remaining_total = quantity;
        let mut budget = phase_one_budget.min(remaining_total);
        for candidate in &mut candidates {
            if budget == 0 {
                break;
            }
            if candidate.margin_percent < PHASE_ONE_MIN_MARGIN {
                continue;
            }
            let placed = place(candidate, budget);
            budget -= placed;
            remaining_total -= placed;
        }

        // Phase 2: the remainder, fastest-absorbing channels first.
        candidates.sort_by(|a, b| {
            b.capacity
                .partial_cmp(&a.capacity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for candidate in &mut candidates {
            if remaining_total == 0 {
                break;
            }
            let placed = place(candidate, remaining_total);
            remaining_total -= placed;
        }

        let allocated: BTreeMap<Marketplace, u32> = candidates
            .iter()
            .filter(|candidate| candidate.allocated > 0)
            .map(|candidate| (candidate.marketplace, candidate.allocated))
            .collect();
        let hold = remaining_total;
        let rationale = rationale(&candidates, quantity, hold);
        debug!(quantity, hold, channels = allocated.len(), "allocation planned");

        AllocationPlan {
            total_quantity: quantity,
            allocated,
            hold,
            rationale,
        }
    }
}

/// Places as much of `budget` as the candidate's cap and MOQ allow.
fn place(candidate: &mut Candidate, budget: u32) -> u32 {
    let amount = candidate.headroom().min(budget);
    if let Some(moq) = candidate.moq {
        // Distributors take a full minimum order or nothing.
        if candidate.allocated == 0 && candidate.allocated + amount < moq {
            return 0;
        }
    }
    if amount == 0 {
        return 0;
    }
    candidate.allocated += amount;
    amount
}

fn channel_cap(capacity: f64, total: u32) -> u32 {
    let by_capacity = scale_f64(capacity * CAPACITY_MONTHS);
    let by_share = scale(total, CHANNEL_SHARE_CAP);
    by_capacity.min(by_share)
}

fn distributor_moq(channel: &ChannelEvaluation, assumptions: &AssumptionSet) -> Option<u32> {
    if channel.channel_type != ChannelType::Distributor {
        return None;
    }
    assumptions
        .fee_rule(channel.marketplace)
        .and_then(|rule| rule.min_order_quantity)
}

fn scale(quantity: u32, share: f64) -> u32 {
    scale_f64(f64::from(quantity) * share)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_f64(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.floor().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

fn rationale(candidates: &[Candidate], quantity: u32, hold: u32) -> String {
    let mut text = String::new();
    for candidate in candidates {
        if candidate.allocated > 0 {
            let _ = write!(
                text,
                "{}: {} units (cap {}); ",
                candidate.marketplace, candidate.allocated, candidate.cap
            );
        }
    }
    if hold == 0 {
        let _ = write!(text, "all {quantity} units placed");
        return text;
    }
    let capacity_bound = candidates.iter().all(|c| c.headroom() == 0 || c.moq.is_some());
    if capacity_bound {
        let _ = write!(
            text,
            "holding {hold} of {quantity} units: monthly absorption capacity and \
             per-channel share caps would risk flooding the remaining channels"
        );
    } else {
        let _ = write!(
            text,
            "holding {hold} of {quantity} units: remaining channels below the \
             margin floor or distributor minimum order quantities"
        );
    }
    text
}
