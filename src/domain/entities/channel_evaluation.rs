//! # Channel Evaluation
//!
//! Per-channel derived results: the fee breakdown, the landed cost basis,
//! and the combined [`ChannelEvaluation`] the scorer and allocation
//! planner consume.
//!
//! # Invariants
//!
//! - `net_proceeds = sell_price - fees.total_deductions()`
//! - `margin_percent = (net_proceeds - landed_cost_converted)
//!    / landed_cost_converted * 100`

use crate::domain::errors::DomainResult;
use crate::domain::entities::demand_estimate::DemandEstimate;
use crate::domain::entities::market_snapshot::DataSource;
use crate::domain::value_objects::channel::{ChannelType, Marketplace};
use crate::domain::value_objects::currency::{Currency, FxRate};
use crate::domain::value_objects::decision::ChannelRecommendation;
use crate::domain::value_objects::money::Money;
use serde::{Deserialize, Serialize};

/// Itemized selling fees for one channel, all in the listing currency.
///
/// The `marketplace_fee` slot holds whichever headline fee the channel
/// charges: the referral fee (marketplace), the final-value fee (peer
/// marketplace), the commission (retailer), or the distributor's margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    /// Referral / final-value / commission / distributor margin.
    pub marketplace_fee: Money,
    /// FBA-style fulfillment fee.
    pub fulfillment_fee: Money,
    /// Media closing fee.
    pub closing_fee: Money,
    /// Flat per-order fee.
    pub per_order_fee: Money,
    /// Payment processing fee.
    pub payment_fee: Money,
    /// Destination VAT deducted from proceeds.
    pub vat: Money,
}

impl FeeBreakdown {
    /// Returns an all-zero breakdown in the given currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            marketplace_fee: Money::zero(currency),
            fulfillment_fee: Money::zero(currency),
            closing_fee: Money::zero(currency),
            per_order_fee: Money::zero(currency),
            payment_fee: Money::zero(currency),
            vat: Money::zero(currency),
        }
    }

    /// Sums the selling fees, excluding VAT.
    ///
    /// # Errors
    ///
    /// Returns a domain error if components have mismatched currencies.
    pub fn total_fees(&self) -> DomainResult<Money> {
        self.marketplace_fee
            .safe_add(self.fulfillment_fee)?
            .safe_add(self.closing_fee)?
            .safe_add(self.per_order_fee)?
            .safe_add(self.payment_fee)
    }

    /// Sums everything deducted from the sell price, including VAT.
    ///
    /// # Errors
    ///
    /// Returns a domain error if components have mismatched currencies.
    pub fn total_deductions(&self) -> DomainResult<Money> {
        self.total_fees()?.safe_add(self.vat)
    }
}

/// Per-unit landed cost in the buy-side currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandedCost {
    /// Wholesale buy price per unit.
    pub buy_price: Money,
    /// Import duty per unit.
    pub duty: Money,
    /// Freight cost per unit.
    pub shipping: Money,
    /// Import VAT per unit, tracked even when reclaimed.
    pub import_vat: Money,
    /// True when import VAT is reclaimed and excluded from the basis.
    pub vat_reclaimed: bool,
    /// The cost basis: buy + duty + shipping, plus import VAT when it is
    /// not reclaimed.
    pub total: Money,
}

impl LandedCost {
    /// Builds a landed cost, computing the total from its parts.
    ///
    /// # Errors
    ///
    /// Returns a domain error if components have mismatched currencies.
    pub fn compute(
        buy_price: Money,
        duty: Money,
        shipping: Money,
        import_vat: Money,
        vat_reclaimed: bool,
    ) -> DomainResult<Self> {
        let mut total = buy_price.safe_add(duty)?.safe_add(shipping)?;
        if !vat_reclaimed {
            total = total.safe_add(import_vat)?;
        }
        Ok(Self {
            buy_price,
            duty,
            shipping,
            import_vat,
            vat_reclaimed,
            total,
        })
    }
}

/// The full derived result for one selling channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelEvaluation {
    /// The venue evaluated.
    pub marketplace: Marketplace,
    /// The venue's channel shape.
    pub channel_type: ChannelType,
    /// Effective sell price in the listing currency.
    pub sell_price: Money,
    /// Itemized fees.
    pub fees: FeeBreakdown,
    /// Sell price minus all deductions.
    pub net_proceeds: Money,
    /// Landed cost in the buy-side currency.
    pub landed_cost: LandedCost,
    /// Landed cost converted to the listing currency.
    pub landed_cost_converted: Money,
    /// Net margin in the listing currency.
    pub net_margin: Money,
    /// Margin as a percentage of the landed cost basis.
    pub margin_percent: f64,
    /// Sell / Sell (caution) / Avoid.
    pub recommendation: ChannelRecommendation,
    /// Demand estimate for this channel.
    pub demand: DemandEstimate,
    /// Months to clear the quantity allocated to this channel; filled in
    /// by the allocation planner.
    pub months_to_sell: Option<f64>,
    /// The FX rate used for the single conversion point.
    pub fx_to_listing: FxRate,
    /// Provenance of the underlying snapshot.
    pub data_source: DataSource,
}

impl ChannelEvaluation {
    /// Returns the monthly absorption capacity from the demand estimate.
    #[inline]
    #[must_use]
    pub fn absorption_capacity(&self) -> f64 {
        self.demand.absorption_capacity_per_month()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use rust_decimal::Decimal;

    fn gbp(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), Currency::Gbp)
    }

    #[test]
    fn fee_totals() {
        let fees = FeeBreakdown {
            marketplace_fee: gbp(1758),
            per_order_fee: gbp(30),
            ..FeeBreakdown::zero(Currency::Gbp)
        };
        assert_eq!(fees.total_fees().unwrap(), gbp(1788));
        assert_eq!(fees.total_deductions().unwrap(), gbp(1788));
    }

    #[test]
    fn fee_total_includes_vat() {
        let fees = FeeBreakdown {
            marketplace_fee: gbp(1000),
            vat: gbp(2000),
            ..FeeBreakdown::zero(Currency::Gbp)
        };
        assert_eq!(fees.total_fees().unwrap(), gbp(1000));
        assert_eq!(fees.total_deductions().unwrap(), gbp(3000));
    }

    #[test]
    fn fee_currency_mismatch_rejected() {
        let fees = FeeBreakdown {
            marketplace_fee: Money::new(Decimal::ONE, Currency::Usd),
            ..FeeBreakdown::zero(Currency::Gbp)
        };
        assert!(matches!(
            fees.total_fees(),
            Err(DomainError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn landed_cost_excludes_reclaimed_vat() {
        let usd = |cents| Money::new(Decimal::new(cents, 2), Currency::Usd);
        let cost = LandedCost::compute(usd(10000), usd(500), usd(800), usd(2000), true).unwrap();
        assert_eq!(cost.total, usd(11300));

        let cost = LandedCost::compute(usd(10000), usd(500), usd(800), usd(2000), false).unwrap();
        assert_eq!(cost.total, usd(13300));
    }
}
