//! # Fee Calculator
//!
//! Computes channel-specific selling fees and destination VAT, producing
//! the effective sell price, the itemized [`FeeBreakdown`] and the net
//! proceeds for one channel.
//!
//! The four channel shapes share one result contract; the [`ChannelType`]
//! tag selects the formula:
//!
//! - Marketplace: referral (per category, overridable) + fulfillment by
//!   size tier and weight + media closing fee.
//! - Peer marketplace: 13.25% final-value fee + flat per-order fee.
//! - Retailer: the retail price is the marketplace reference discounted by
//!   the retailer multiplier; commission + payment fee apply to it.
//! - Distributor: the distributor buys at a percentage of the reference
//!   price; the discount is the only deduction.
//!
//! VAT is deducted from proceeds on marketplace and retailer channels,
//! where the operator remits it from the gross price. Peer-marketplace and
//! distributor proceeds are VAT-free: peer listings are margin-scheme
//! sales and distributors buy wholesale, net of VAT.

use crate::application::error::EvaluationResult;
use crate::domain::entities::assumption_set::{AssumptionSet, FeeRule};
use crate::domain::entities::channel_evaluation::FeeBreakdown;
use crate::domain::entities::market_snapshot::MarketSnapshot;
use crate::domain::value_objects::arithmetic::CheckedArithmetic;
use crate::domain::value_objects::category::{ProductCategory, SizeTier};
use crate::domain::value_objects::channel::ChannelType;
use crate::domain::value_objects::money::Money;
use rust_decimal::Decimal;

/// Peer-marketplace final-value fee rate.
const PEER_FINAL_VALUE_RATE: Decimal = Decimal::from_parts(1325, 0, 0, false, 4);
/// Peer-marketplace flat per-order fee, listing currency.
const PEER_PER_ORDER_FEE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);
/// Closing fee for media categories, listing currency.
const MEDIA_CLOSING_FEE: Decimal = Decimal::from_parts(180, 0, 0, false, 2);
/// Retailer commission fallback when no fee rule is seeded.
const DEFAULT_COMMISSION: Decimal = Decimal::from_parts(12, 0, 0, false, 2);
/// Retailer payment fee fallback.
const DEFAULT_PAYMENT_FEE: Decimal = Decimal::from_parts(25, 0, 0, false, 3);
/// Retailer price multiplier fallback.
const DEFAULT_RETAILER_MULTIPLIER: Decimal = Decimal::from_parts(93, 0, 0, false, 2);
/// Distributor buy percentage fallback.
const DEFAULT_BUY_PERCENT: Decimal = Decimal::from_parts(55, 0, 0, false, 2);
/// Weight assumed for fulfillment fees when none is supplied.
const DEFAULT_WEIGHT_KG: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
/// Weight included in the base fulfillment fee.
const INCLUDED_WEIGHT_KG: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// The fee calculator's per-channel output.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelPricing {
    /// Effective sell price in the listing currency.
    pub sell_price: Money,
    /// Itemized fees and VAT.
    pub fees: FeeBreakdown,
    /// Sell price minus all deductions.
    pub net_proceeds: Money,
}

/// Pure fee calculator.
#[derive(Debug, Clone, Default)]
pub struct FeeCalculator;

impl FeeCalculator {
    /// Creates a new calculator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes fees and net proceeds for one channel snapshot.
    ///
    /// The snapshot's `sell_price` is the listing price for marketplace and
    /// peer channels, and the marketplace reference price for retailer and
    /// distributor channels.
    ///
    /// # Errors
    ///
    /// Returns a domain error on arithmetic overflow or currency mixing.
    pub fn calculate(
        &self,
        snapshot: &MarketSnapshot,
        category: ProductCategory,
        weight_kg: Option<Decimal>,
        assumptions: &AssumptionSet,
    ) -> EvaluationResult<ChannelPricing> {
        let rule = assumptions
            .fee_rule(snapshot.marketplace)
            .cloned()
            .unwrap_or_default();

        let pricing = match snapshot.marketplace.channel_type() {
            ChannelType::Marketplace => {
                self.marketplace_fees(snapshot, category, weight_kg, &rule)?
            }
            ChannelType::PeerMarketplace => self.peer_fees(snapshot, &rule)?,
            ChannelType::Retailer => self.retailer_fees(snapshot, category, &rule)?,
            ChannelType::Distributor => self.distributor_fees(snapshot, &rule)?,
        };
        Ok(pricing)
    }

    fn marketplace_fees(
        &self,
        snapshot: &MarketSnapshot,
        category: ProductCategory,
        weight_kg: Option<Decimal>,
        rule: &FeeRule,
    ) -> EvaluationResult<ChannelPricing> {
        let sell = snapshot.sell_price;
        let currency = sell.currency();

        let referral_rate = rule.referral_rate.unwrap_or_else(|| category.referral_rate());
        let referral = sell.mul_decimal(referral_rate.get())?.round2();

        let weight = weight_kg.unwrap_or(DEFAULT_WEIGHT_KG);
        let tier = SizeTier::from_weight_kg(weight);
        let over = (weight.safe_sub(INCLUDED_WEIGHT_KG)?).max(Decimal::ZERO);
        let fulfillment_amount = tier
            .base_fulfillment_fee()
            .safe_add(over.safe_mul(tier.per_kg_surcharge())?)?;
        let fulfillment = Money::new(fulfillment_amount, currency).round2();

        let closing = if category.is_media() {
            Money::new(rule.closing_fee.unwrap_or(MEDIA_CLOSING_FEE), currency)
        } else {
            Money::zero(currency)
        };

        let vat = vat_deduction(sell, category, snapshot, rule)?;

        let fees = FeeBreakdown {
            marketplace_fee: referral,
            fulfillment_fee: fulfillment,
            closing_fee: closing,
            vat,
            ..FeeBreakdown::zero(currency)
        };
        finish(sell, fees)
    }

    fn peer_fees(
        &self,
        snapshot: &MarketSnapshot,
        rule: &FeeRule,
    ) -> EvaluationResult<ChannelPricing> {
        let sell = snapshot.sell_price;
        let currency = sell.currency();

        let final_value_rate = rule
            .referral_rate
            .map_or(PEER_FINAL_VALUE_RATE, |rate| rate.get());
        let final_value = sell.mul_decimal(final_value_rate)?.round2();
        let per_order = Money::new(rule.per_order_fee.unwrap_or(PEER_PER_ORDER_FEE), currency);

        let fees = FeeBreakdown {
            marketplace_fee: final_value,
            per_order_fee: per_order,
            ..FeeBreakdown::zero(currency)
        };
        finish(sell, fees)
    }

    fn retailer_fees(
        &self,
        snapshot: &MarketSnapshot,
        category: ProductCategory,
        rule: &FeeRule,
    ) -> EvaluationResult<ChannelPricing> {
        let multiplier = rule
            .retailer_multiplier
            .unwrap_or(DEFAULT_RETAILER_MULTIPLIER);
        let sell = snapshot.sell_price.mul_decimal(multiplier)?.round2();
        let currency = sell.currency();

        let commission_rate = rule
            .commission_rate
            .map_or(DEFAULT_COMMISSION, |rate| rate.get());
        let payment_rate = rule
            .payment_fee_rate
            .map_or(DEFAULT_PAYMENT_FEE, |rate| rate.get());
        let commission = sell.mul_decimal(commission_rate)?.round2();
        let payment = sell.mul_decimal(payment_rate)?.round2();
        let vat = vat_deduction(sell, category, snapshot, rule)?;

        let fees = FeeBreakdown {
            marketplace_fee: commission,
            payment_fee: payment,
            vat,
            ..FeeBreakdown::zero(currency)
        };
        finish(sell, fees)
    }

    fn distributor_fees(
        &self,
        snapshot: &MarketSnapshot,
        rule: &FeeRule,
    ) -> EvaluationResult<ChannelPricing> {
        let reference = snapshot.sell_price;
        let currency = reference.currency();
        let buy_percent = rule.buy_percent.map_or(DEFAULT_BUY_PERCENT, |rate| rate.get());

        // The distributor's margin is the only deduction from the
        // reference price.
        let discount_rate = Decimal::ONE.safe_sub(buy_percent)?;
        let discount = reference.mul_decimal(discount_rate)?.round2();

        let fees = FeeBreakdown {
            marketplace_fee: discount,
            ..FeeBreakdown::zero(currency)
        };
        finish(reference, fees)
    }
}

/// VAT remitted from the gross price: `price * rate / (1 + rate)`.
fn vat_deduction(
    sell: Money,
    category: ProductCategory,
    snapshot: &MarketSnapshot,
    rule: &FeeRule,
) -> EvaluationResult<Money> {
    let rate = rule
        .vat_rate
        .unwrap_or_else(|| category.vat_rate(snapshot.marketplace.country()));
    if rate.is_zero() {
        return Ok(Money::zero(sell.currency()));
    }
    let divisor = Decimal::ONE.safe_add(rate.get())?;
    Ok(sell.mul_decimal(rate.get())?.div_decimal(divisor)?.round2())
}

fn finish(sell: Money, fees: FeeBreakdown) -> EvaluationResult<ChannelPricing> {
    let net_proceeds = sell.safe_sub(fees.total_deductions()?)?;
    Ok(ChannelPricing {
        sell_price: sell,
        fees,
        net_proceeds,
    })
}

/// True for channel shapes whose proceeds are net of destination VAT.
#[must_use]
pub fn applies_vat(channel_type: ChannelType) -> bool {
    matches!(channel_type, ChannelType::Marketplace | ChannelType::Retailer)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::market_snapshot::DataSource;
    use crate::domain::value_objects::channel::Marketplace;
    use crate::domain::value_objects::currency::FxRate;
    use crate::domain::value_objects::rate::Rate;

    fn snapshot(marketplace: Marketplace, price_cents: i64) -> MarketSnapshot {
        let currency = marketplace.currency();
        MarketSnapshot {
            marketplace,
            sell_price: Money::new(Decimal::new(price_cents, 2), currency),
            sales_rank: Some(900),
            active_listings: Some(10),
            fba_seller_count: Some(3),
            price_stability: None,
            data_source: DataSource::Live,
            fx_to_listing: FxRate::identity(currency),
        }
    }

    fn assumptions() -> AssumptionSet {
        AssumptionSet::system_defaults(1)
    }

    mod peer_marketplace {
        use super::*;

        #[test]
        fn uk_ebay_documented_example() {
            // £132.65 at 13.25% + £0.30 = £17.88 in fees, £114.77 net.
            let snap = snapshot(Marketplace::EbayUk, 13265);
            let pricing = FeeCalculator::new()
                .calculate(&snap, ProductCategory::Electronics, None, &assumptions())
                .unwrap();

            assert_eq!(
                pricing.fees.marketplace_fee.amount(),
                Decimal::new(1758, 2)
            );
            assert_eq!(pricing.fees.per_order_fee.amount(), Decimal::new(30, 2));
            assert_eq!(
                pricing.fees.total_deductions().unwrap().amount(),
                Decimal::new(1788, 2)
            );
            assert_eq!(pricing.net_proceeds.amount(), Decimal::new(11477, 2));
        }

        #[test]
        fn no_vat_on_peer_channels() {
            let snap = snapshot(Marketplace::EbayUk, 10000);
            let pricing = FeeCalculator::new()
                .calculate(&snap, ProductCategory::Electronics, None, &assumptions())
                .unwrap();
            assert!(pricing.fees.vat.is_zero());
        }
    }

    mod marketplace {
        use super::*;

        #[test]
        fn referral_fulfillment_and_vat() {
            let snap = snapshot(Marketplace::AmazonUk, 10000);
            let pricing = FeeCalculator::new()
                .calculate(&snap, ProductCategory::Electronics, None, &assumptions())
                .unwrap();

            // Electronics referral 8% = 8.00; small-standard base 3.22;
            // UK VAT 100 * 0.2/1.2 = 16.67.
            assert_eq!(pricing.fees.marketplace_fee.amount(), Decimal::new(800, 2));
            assert_eq!(
                pricing.fees.fulfillment_fee.amount(),
                Decimal::new(322, 2)
            );
            assert!(pricing.fees.closing_fee.is_zero());
            assert_eq!(pricing.fees.vat.amount(), Decimal::new(1667, 2));
            assert_eq!(pricing.net_proceeds.amount(), Decimal::new(7211, 2));
        }

        #[test]
        fn media_closing_fee() {
            let snap = snapshot(Marketplace::AmazonUs, 2500);
            let pricing = FeeCalculator::new()
                .calculate(&snap, ProductCategory::Books, None, &assumptions())
                .unwrap();
            assert_eq!(pricing.fees.closing_fee.amount(), Decimal::new(180, 2));
            // US: no VAT deduction.
            assert!(pricing.fees.vat.is_zero());
        }

        #[test]
        fn heavy_item_fulfillment_surcharge() {
            let snap = snapshot(Marketplace::AmazonUs, 10000);
            let pricing = FeeCalculator::new()
                .calculate(
                    &snap,
                    ProductCategory::HomeKitchen,
                    Some(Decimal::new(5, 0)),
                    &assumptions(),
                )
                .unwrap();
            // Large-standard: 4.75 + 4.5 kg over * 0.45 = 6.78.
            assert_eq!(
                pricing.fees.fulfillment_fee.amount(),
                Decimal::new(678, 2)
            );
        }

        #[test]
        fn referral_override_applies() {
            let snap = snapshot(Marketplace::AmazonUk, 10000);
            let mut set = assumptions();
            set.set_fee_rule(
                Marketplace::AmazonUk,
                FeeRule {
                    referral_rate: Some(Rate::from_bps(1000)),
                    ..FeeRule::default()
                },
            );
            let pricing = FeeCalculator::new()
                .calculate(&snap, ProductCategory::Electronics, None, &set)
                .unwrap();
            assert_eq!(
                pricing.fees.marketplace_fee.amount(),
                Decimal::new(1000, 2)
            );
        }
    }

    mod retailer {
        use super::*;

        #[test]
        fn discounted_price_and_commission() {
            // Reference $100; US retailer multiplier 0.93 -> $93.00;
            // commission 12% = 11.16; payment 2.5% = 2.33; no US VAT.
            let snap = snapshot(Marketplace::RetailerUs, 10000);
            let pricing = FeeCalculator::new()
                .calculate(&snap, ProductCategory::Electronics, None, &assumptions())
                .unwrap();

            assert_eq!(pricing.sell_price.amount(), Decimal::new(9300, 2));
            assert_eq!(
                pricing.fees.marketplace_fee.amount(),
                Decimal::new(1116, 2)
            );
            assert_eq!(pricing.fees.payment_fee.amount(), Decimal::new(233, 2));
            assert!(pricing.fees.vat.is_zero());
            assert_eq!(pricing.net_proceeds.amount(), Decimal::new(7951, 2));
        }

        #[test]
        fn uk_retailer_pays_vat() {
            let snap = snapshot(Marketplace::RetailerUk, 10000);
            let pricing = FeeCalculator::new()
                .calculate(&snap, ProductCategory::Electronics, None, &assumptions())
                .unwrap();
            // 100 * 0.96 = 96.00; VAT = 96 * 0.2/1.2 = 16.00.
            assert_eq!(pricing.sell_price.amount(), Decimal::new(9600, 2));
            assert_eq!(pricing.fees.vat.amount(), Decimal::new(1600, 2));
        }
    }

    mod distributor {
        use super::*;

        #[test]
        fn buy_percent_discount() {
            // Reference $100, US distributor buys at 55%.
            let snap = snapshot(Marketplace::DistributorUs, 10000);
            let pricing = FeeCalculator::new()
                .calculate(&snap, ProductCategory::Electronics, None, &assumptions())
                .unwrap();
            assert_eq!(
                pricing.fees.marketplace_fee.amount(),
                Decimal::new(4500, 2)
            );
            assert_eq!(pricing.net_proceeds.amount(), Decimal::new(5500, 2));
            assert!(pricing.fees.vat.is_zero());
        }
    }

    #[test]
    fn vat_channels() {
        assert!(applies_vat(ChannelType::Marketplace));
        assert!(applies_vat(ChannelType::Retailer));
        assert!(!applies_vat(ChannelType::PeerMarketplace));
        assert!(!applies_vat(ChannelType::Distributor));
    }
}
