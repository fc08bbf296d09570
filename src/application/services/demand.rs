//! # Demand Estimator
//!
//! Converts a channel's raw demand signals into a low/mid/high monthly
//! sales range, an additive confidence score and an absorption capacity.
//!
//! Three signal tiers, best available wins:
//!
//! 1. Sales rank: power model `coefficient / rank^exponent` per category,
//!    scaled by the venue's size factor relative to amazon.com.
//! 2. Active listing count (peer marketplaces without a rank).
//! 3. Category-multiplier mock baseline (retailer and distributor
//!    channels, which expose no public demand feed).
//!
//! `absorption_capacity = mid * target_share(competitor_count)`, where the
//! target share steps down as the competitor count grows.

use crate::application::error::EvaluationResult;
use crate::domain::entities::demand_estimate::DemandEstimate;
use crate::domain::entities::market_snapshot::MarketSnapshot;
use crate::domain::value_objects::category::ProductCategory;
use crate::domain::value_objects::channel::ChannelType;
use rust_decimal::prelude::ToPrimitive;
use tracing::trace;

/// Pessimistic bound as a fraction of the central estimate.
const LOW_FACTOR: f64 = 0.6;
/// Optimistic bound as a fraction of the central estimate.
const HIGH_FACTOR: f64 = 1.5;
/// Monthly units per listing assumed for the listing-count fallback.
const SALES_PER_LISTING: f64 = 0.4;
/// Baseline monthly sales for the mock estimate, reference market.
const MOCK_BASELINE: f64 = 50.0;

/// Pure demand estimator.
#[derive(Debug, Clone, Default)]
pub struct DemandEstimator;

impl DemandEstimator {
    /// Creates a new estimator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Estimates monthly demand for one channel snapshot.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the computed range violates the estimate
    /// invariants, which indicates corrupt input signals.
    pub fn estimate(
        &self,
        snapshot: &MarketSnapshot,
        category: ProductCategory,
    ) -> EvaluationResult<DemandEstimate> {
        let mut signals = Vec::new();
        let mid = self.central_estimate(snapshot, category, &mut signals);
        let low = mid * LOW_FACTOR;
        let high = mid * HIGH_FACTOR;

        let share = target_share(snapshot.competitor_count());
        let absorption = mid * share;
        let score = confidence_score(snapshot, &mut signals);

        trace!(
            marketplace = %snapshot.marketplace,
            mid,
            absorption,
            score,
            "demand estimated"
        );
        Ok(DemandEstimate::new(
            low, mid, high, score, absorption, signals,
        )?)
    }

    fn central_estimate(
        &self,
        snapshot: &MarketSnapshot,
        category: ProductCategory,
        signals: &mut Vec<String>,
    ) -> f64 {
        let size = snapshot.marketplace.size_factor();
        match snapshot.marketplace.channel_type() {
            ChannelType::Marketplace | ChannelType::PeerMarketplace => {
                if let Some(rank) = snapshot.sales_rank.filter(|rank| *rank > 0) {
                    let (coefficient, exponent) = category.demand_curve();
                    signals.push(format!("sales rank {rank}"));
                    return coefficient / f64::from(rank).powf(exponent) * size;
                }
                if snapshot.marketplace.channel_type() == ChannelType::PeerMarketplace {
                    if let Some(listings) = snapshot.active_listings {
                        signals.push(format!("{listings} active listings"));
                        return f64::from(listings) * SALES_PER_LISTING * size;
                    }
                }
                signals.push("no rank signal, category baseline".to_string());
                mock_estimate(category, size)
            }
            ChannelType::Retailer | ChannelType::Distributor => {
                signals.push("category baseline estimate".to_string());
                mock_estimate(category, size)
            }
        }
    }
}

fn mock_estimate(category: ProductCategory, size_factor: f64) -> f64 {
    MOCK_BASELINE * category.mock_demand_multiplier() * size_factor
}

/// Share of a channel's monthly sales the seller can realistically take,
/// stepping down as the competitor count grows.
#[must_use]
pub fn target_share(competitor_count: Option<u32>) -> f64 {
    match competitor_count {
        Some(0 | 1) => 0.35,
        Some(2..=4) => 0.25,
        Some(5..=9) | None => 0.15,
        Some(10..=14) => 0.10,
        Some(_) => 0.08,
    }
}

fn confidence_score(snapshot: &MarketSnapshot, signals: &mut Vec<String>) -> f64 {
    let mut score = 0.0;
    if let Some(rank) = snapshot.sales_rank {
        score += if rank <= 1_000 {
            35.0
        } else if rank <= 10_000 {
            30.0
        } else {
            10.0
        };
    }
    if let Some(count) = snapshot.competitor_count() {
        score += if count >= 5 { 25.0 } else { 15.0 };
        signals.push(format!("{count} competing sellers"));
    }
    if let Some(stability) = snapshot.price_stability {
        let stability = stability.get().to_f64().unwrap_or(0.0);
        score += 15.0 + stability * 10.0;
        signals.push(format!("price stability {stability:.2}"));
    }
    score.min(100.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::market_snapshot::DataSource;
    use crate::domain::value_objects::channel::Marketplace;
    use crate::domain::value_objects::confidence::ConfidenceLevel;
    use crate::domain::value_objects::currency::FxRate;
    use crate::domain::value_objects::money::Money;
    use crate::domain::value_objects::rate::Rate;
    use rust_decimal::Decimal;

    fn snapshot(marketplace: Marketplace) -> MarketSnapshot {
        let currency = marketplace.currency();
        MarketSnapshot {
            marketplace,
            sell_price: Money::new(Decimal::new(9999, 2), currency),
            sales_rank: None,
            active_listings: None,
            fba_seller_count: None,
            price_stability: None,
            data_source: DataSource::Live,
            fx_to_listing: FxRate::identity(currency),
        }
    }

    mod central_estimate {
        use super::*;

        #[test]
        fn rank_model_scales_with_market_size() {
            let mut us = snapshot(Marketplace::AmazonUs);
            us.sales_rank = Some(1_000);
            let mut uk = snapshot(Marketplace::AmazonUk);
            uk.sales_rank = Some(1_000);

            let estimator = DemandEstimator::new();
            let us_est = estimator
                .estimate(&us, ProductCategory::Electronics)
                .unwrap();
            let uk_est = estimator
                .estimate(&uk, ProductCategory::Electronics)
                .unwrap();

            // 120000 / 1000^0.78, UK at 35% of the US market.
            assert!(us_est.mid() > 500.0 && us_est.mid() < 600.0);
            assert!((uk_est.mid() - us_est.mid() * 0.35).abs() < 1e-9);
        }

        #[test]
        fn better_rank_means_more_sales() {
            let estimator = DemandEstimator::new();
            let mut fast = snapshot(Marketplace::AmazonUs);
            fast.sales_rank = Some(100);
            let mut slow = snapshot(Marketplace::AmazonUs);
            slow.sales_rank = Some(50_000);

            let fast_est = estimator
                .estimate(&fast, ProductCategory::Electronics)
                .unwrap();
            let slow_est = estimator
                .estimate(&slow, ProductCategory::Electronics)
                .unwrap();
            assert!(fast_est.mid() > slow_est.mid());
        }

        #[test]
        fn peer_listing_fallback() {
            let mut snap = snapshot(Marketplace::EbayUk);
            snap.active_listings = Some(40);
            let est = DemandEstimator::new()
                .estimate(&snap, ProductCategory::Electronics)
                .unwrap();
            // 40 * 0.4 * 0.20 = 3.2 per month.
            assert!((est.mid() - 3.2).abs() < 1e-9);
        }

        #[test]
        fn retailer_mock_estimate() {
            let snap = snapshot(Marketplace::RetailerUs);
            let est = DemandEstimator::new()
                .estimate(&snap, ProductCategory::Electronics)
                .unwrap();
            // 50 * 1.2 * 0.10 = 6 per month.
            assert!((est.mid() - 6.0).abs() < 1e-9);
            assert_eq!(est.confidence(), ConfidenceLevel::Low);
        }

        #[test]
        fn range_brackets_mid() {
            let mut snap = snapshot(Marketplace::AmazonUs);
            snap.sales_rank = Some(500);
            let est = DemandEstimator::new()
                .estimate(&snap, ProductCategory::ToysGames)
                .unwrap();
            assert!((est.low() - est.mid() * 0.6).abs() < 1e-9);
            assert!((est.high() - est.mid() * 1.5).abs() < 1e-9);
        }
    }

    mod target_shares {
        use super::*;

        #[test]
        fn steps_down_with_competition() {
            assert!((target_share(Some(0)) - 0.35).abs() < f64::EPSILON);
            assert!((target_share(Some(1)) - 0.35).abs() < f64::EPSILON);
            assert!((target_share(Some(3)) - 0.25).abs() < f64::EPSILON);
            assert!((target_share(Some(7)) - 0.15).abs() < f64::EPSILON);
            assert!((target_share(Some(12)) - 0.10).abs() < f64::EPSILON);
            assert!((target_share(Some(20)) - 0.08).abs() < f64::EPSILON);
        }

        #[test]
        fn unknown_competition_uses_middle_share() {
            assert!((target_share(None) - 0.15).abs() < f64::EPSILON);
        }

        #[test]
        fn absorption_uses_share() {
            let mut snap = snapshot(Marketplace::EbayUk);
            snap.active_listings = Some(40);
            snap.fba_seller_count = Some(1);
            let est = DemandEstimator::new()
                .estimate(&snap, ProductCategory::Electronics)
                .unwrap();
            assert!((est.absorption_capacity_per_month() - 3.2 * 0.35).abs() < 1e-9);
        }
    }

    mod confidence {
        use super::*;

        #[test]
        fn strong_signals_band_high() {
            let mut snap = snapshot(Marketplace::AmazonUs);
            snap.sales_rank = Some(850);
            snap.fba_seller_count = Some(6);
            snap.price_stability = Some(Rate::from_bps(9_000));
            let est = DemandEstimator::new()
                .estimate(&snap, ProductCategory::Electronics)
                .unwrap();
            // 35 + 25 + (15 + 0.9*10) = 84.
            assert!((est.confidence_score() - 84.0).abs() < 1e-9);
            assert_eq!(est.confidence(), ConfidenceLevel::High);
        }

        #[test]
        fn partial_signals_band_medium() {
            let mut snap = snapshot(Marketplace::AmazonUs);
            snap.sales_rank = Some(5_000);
            snap.fba_seller_count = Some(2);
            let est = DemandEstimator::new()
                .estimate(&snap, ProductCategory::Electronics)
                .unwrap();
            // 30 + 15 = 45.
            assert!((est.confidence_score() - 45.0).abs() < 1e-9);
            assert_eq!(est.confidence(), ConfidenceLevel::Medium);
        }

        #[test]
        fn no_signals_band_low() {
            let snap = snapshot(Marketplace::DistributorUs);
            let est = DemandEstimator::new()
                .estimate(&snap, ProductCategory::Other)
                .unwrap();
            assert!(est.confidence_score() < 1.0);
            assert_eq!(est.confidence(), ConfidenceLevel::Low);
        }
    }
}
