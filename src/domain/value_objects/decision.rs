//! # Decisions and Recommendations
//!
//! The per-channel [`ChannelRecommendation`] produced by the margin
//! evaluator, and the deal-level [`DealDecision`] produced by the scorer's
//! decision table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-channel recommendation derived from margin percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChannelRecommendation {
    /// Margin below 15%: do not sell through this channel.
    Avoid,
    /// Margin 15-24.9%: sellable but thin.
    SellWithCaution,
    /// Margin at or above 25%.
    Sell,
}

impl ChannelRecommendation {
    /// Returns true for both selling recommendations.
    #[inline]
    #[must_use]
    pub const fn is_sellable(self) -> bool {
        matches!(self, Self::Sell | Self::SellWithCaution)
    }
}

impl fmt::Display for ChannelRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sell => write!(f, "Sell"),
            Self::SellWithCaution => write!(f, "Sell (caution)"),
            Self::Avoid => write!(f, "Avoid"),
        }
    }
}

/// Deal-level decision from the scorer's decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DealDecision {
    /// Strong deal: buy at the current terms.
    Buy,
    /// Workable deal at a lower buy price: negotiate with the supplier.
    Renegotiate,
    /// Workable product, wrong origin: source from a cheaper region.
    SourceElsewhere,
    /// Not worth pursuing.
    Pass,
}

impl DealDecision {
    /// Returns true when the negotiation advisor should run.
    #[inline]
    #[must_use]
    pub const fn needs_negotiation_support(self) -> bool {
        matches!(self, Self::Renegotiate | Self::SourceElsewhere)
    }
}

impl fmt::Display for DealDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Renegotiate => write!(f, "Renegotiate"),
            Self::SourceElsewhere => write!(f, "Source Elsewhere"),
            Self::Pass => write!(f, "Pass"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sellable_recommendations() {
        assert!(ChannelRecommendation::Sell.is_sellable());
        assert!(ChannelRecommendation::SellWithCaution.is_sellable());
        assert!(!ChannelRecommendation::Avoid.is_sellable());
    }

    #[test]
    fn negotiation_trigger() {
        assert!(DealDecision::Renegotiate.needs_negotiation_support());
        assert!(DealDecision::SourceElsewhere.needs_negotiation_support());
        assert!(!DealDecision::Buy.needs_negotiation_support());
        assert!(!DealDecision::Pass.needs_negotiation_support());
    }

    #[test]
    fn display() {
        assert_eq!(DealDecision::SourceElsewhere.to_string(), "Source Elsewhere");
        assert_eq!(
            ChannelRecommendation::SellWithCaution.to_string(),
            "Sell (caution)"
        );
    }
}
