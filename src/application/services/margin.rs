//! # Margin Evaluator
//!
//! Combines a channel's net proceeds with the landed cost to produce the
//! net margin, the margin percentage and the per-channel recommendation.
//!
//! The landed cost crosses currencies exactly once, here, using the FX
//! rate that rode along with the market snapshot. Nothing downstream
//! re-converts.

use crate::application::error::EvaluationResult;
use crate::application::services::fee_calculator::ChannelPricing;
use crate::domain::entities::channel_evaluation::LandedCost;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::arithmetic::CheckedArithmetic;
use crate::domain::value_objects::currency::FxRate;
use crate::domain::value_objects::decision::ChannelRecommendation;
use crate::domain::value_objects::money::Money;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Margin percent at or above which a channel is a clear Sell.
pub const SELL_THRESHOLD: f64 = 25.0;
/// Margin percent at or above which a channel is sellable with caution.
pub const CAUTION_THRESHOLD: f64 = 15.0;

/// The margin evaluator's per-channel output.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginResult {
    /// Landed cost converted into the listing currency.
    pub landed_cost_converted: Money,
    /// Net proceeds minus the converted landed cost.
    pub net_margin: Money,
    /// Margin as a percentage of the converted landed cost.
    pub margin_percent: f64,
    /// Sell / Sell (caution) / Avoid.
    pub recommendation: ChannelRecommendation,
}

/// Pure margin evaluator.
#[derive(Debug, Clone, Default)]
pub struct MarginEvaluator;

impl MarginEvaluator {
    /// Creates a new evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates one channel's margin.
    ///
    /// # Errors
    ///
    /// Returns a domain error on FX pair mismatch, currency mixing, or a
    /// zero landed cost (the margin percentage is undefined).
    pub fn evaluate(
        &self,
        pricing: &ChannelPricing,
        landed: &LandedCost,
        fx_to_listing: &FxRate,
    ) -> EvaluationResult<MarginResult> {
        let landed_converted = landed.total.convert(fx_to_listing)?.round2();
        let net_margin = pricing.net_proceeds.safe_sub(landed_converted)?;

        let percent_decimal = net_margin
            .amount()
            .safe_div(landed_converted.amount())
            .and_then(|ratio| ratio.safe_mul(Decimal::ONE_HUNDRED))
            .map_err(DomainError::from)?;
        let margin_percent = percent_decimal.to_f64().unwrap_or(0.0);

        Ok(MarginResult {
            landed_cost_converted: landed_converted,
            net_margin,
            margin_percent,
            recommendation: recommend(margin_percent),
        })
    }
}

/// Maps a margin percentage to the per-channel recommendation.
#[must_use]
pub fn recommend(margin_percent: f64) -> ChannelRecommendation {
    if margin_percent >= SELL_THRESHOLD {
        ChannelRecommendation::Sell
    } else if margin_percent >= CAUTION_THRESHOLD {
        ChannelRecommendation::SellWithCaution
    } else {
        ChannelRecommendation::Avoid
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::channel_evaluation::FeeBreakdown;
    use crate::domain::value_objects::currency::Currency;
    use proptest::prelude::*;

    fn gbp(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), Currency::Gbp)
    }

    fn usd(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), Currency::Usd)
    }

    fn pricing(net_cents: i64) -> ChannelPricing {
        ChannelPricing {
            sell_price: gbp(net_cents + 1788),
            fees: FeeBreakdown::zero(Currency::Gbp),
            net_proceeds: gbp(net_cents),
        }
    }

    fn landed(total_cents: i64) -> LandedCost {
        LandedCost::compute(
            usd(total_cents),
            usd(0),
            usd(0),
            usd(0),
            true,
        )
        .unwrap()
    }

    #[test]
    fn uk_ebay_documented_example() {
        // Net £114.77; landed $116.30 at 0.80 -> £93.04; margin 23.4%.
        let fx = FxRate::new(Currency::Usd, Currency::Gbp, Decimal::new(80, 2)).unwrap();
        let result = MarginEvaluator::new()
            .evaluate(&pricing(11477), &landed(11630), &fx)
            .unwrap();

        assert_eq!(result.landed_cost_converted, gbp(9304));
        assert_eq!(result.net_margin, gbp(2173));
        assert!((result.margin_percent - 23.356).abs() < 0.01);
        assert_eq!(result.recommendation, ChannelRecommendation::SellWithCaution);
    }

    #[test]
    fn thresholds() {
        assert_eq!(recommend(25.0), ChannelRecommendation::Sell);
        assert_eq!(recommend(24.9), ChannelRecommendation::SellWithCaution);
        assert_eq!(recommend(15.0), ChannelRecommendation::SellWithCaution);
        assert_eq!(recommend(14.9), ChannelRecommendation::Avoid);
        assert_eq!(recommend(-5.0), ChannelRecommendation::Avoid);
    }

    #[test]
    fn negative_margin_allowed() {
        let fx = FxRate::new(Currency::Usd, Currency::Gbp, Decimal::new(80, 2)).unwrap();
        let result = MarginEvaluator::new()
            .evaluate(&pricing(5000), &landed(11630), &fx)
            .unwrap();
        assert!(result.net_margin.is_negative());
        assert!(result.margin_percent < 0.0);
        assert_eq!(result.recommendation, ChannelRecommendation::Avoid);
    }

    #[test]
    fn zero_landed_cost_is_an_error() {
        let fx = FxRate::new(Currency::Usd, Currency::Gbp, Decimal::new(80, 2)).unwrap();
        let result = MarginEvaluator::new().evaluate(&pricing(5000), &landed(0), &fx);
        assert!(result.is_err());
    }

    proptest! {
        // Raising the sell price (hence net proceeds) with fees and landed
        // cost fixed never lowers the margin percentage.
        #[test]
        fn margin_monotone_in_net_proceeds(
            net_a in 1_000i64..500_000,
            bump in 0i64..100_000,
            landed_cents in 1_000i64..500_000,
        ) {
            let fx = FxRate::new(Currency::Usd, Currency::Gbp, Decimal::new(80, 2)).unwrap();
            let evaluator = MarginEvaluator::new();
            let low = evaluator
                .evaluate(&pricing(net_a), &landed(landed_cents), &fx)
                .unwrap();
            let high = evaluator
                .evaluate(&pricing(net_a + bump), &landed(landed_cents), &fx)
                .unwrap();
            prop_assert!(high.margin_percent >= low.margin_percent);
        }
    }
}
