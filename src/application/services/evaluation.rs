//! # Deal Evaluation Engine
//!
//! The orchestrating use case: takes a validated request plus the market
//! snapshots the collaborators fetched, runs every channel through the
//! fee, landed cost, margin and demand calculators, plans the allocation,
//! scores the deal and renders the decision.
//!
//! The engine itself is pure and synchronous. Everything nondeterministic
//! (market data, FX, persistence) happens in the infrastructure layer
//! before and after this call, so evaluating the same request against the
//! same snapshots always yields the same analysis.

use crate::application::error::{EvaluationError, EvaluationResult};
use crate::application::services::allocation::AllocationPlanner;
use crate::application::services::assumption_resolver::{AssumptionOverrides, AssumptionResolver};
use crate::application::services::demand::DemandEstimator;
use crate::application::services::fee_calculator::FeeCalculator;
use crate::application::services::landed_cost::{LandedCostCalculator, LandedCostInput};
use crate::application::services::margin::MarginEvaluator;
use crate::application::services::negotiation::NegotiationAdvisor;
use crate::application::services::scorer::{DealScorer, ScoreInput};
use crate::domain::entities::assumption_set::{AssumptionSet, ShippingMethod};
use crate::domain::entities::channel_evaluation::ChannelEvaluation;
use crate::domain::entities::deal_evaluation::{DealEvaluation, NegotiationSupport};
use crate::domain::entities::market_snapshot::MarketSnapshot;
use crate::domain::value_objects::category::ProductCategory;
use crate::domain::value_objects::channel::{ChannelType, Marketplace};
use crate::domain::value_objects::currency::Currency;
use crate::domain::value_objects::decision::DealDecision;
use crate::domain::value_objects::ids::{DealId, Ean};
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::region::{Region, RouteKey};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

/// Version of the assumption defaults the engine ships with.
pub const DEFAULT_ASSUMPTION_VERSION: u32 = 1;

fn default_reclaim_vat() -> bool {
    true
}

/// One deal evaluation request, the engine's external input contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    /// Product barcode.
    pub ean: Ean,
    /// Offered quantity, must be positive.
    pub quantity: u32,
    /// Wholesale buy price per unit.
    pub buy_price: Decimal,
    /// Buy-side currency.
    pub currency: Currency,
    /// Supplier origin region.
    pub supplier_region: Region,
    /// Harmonized System code, 6 to 10 digits, when the supplier quotes
    /// one. The chapter (first two digits) drives duty lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hs_code: Option<String>,
    /// Product category. Defaults to the generic category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_category: Option<ProductCategory>,
    /// Unit weight in kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<Decimal>,
    /// Freight method. Defaults to air.
    #[serde(default)]
    pub shipping_method: ShippingMethod,
    /// True when the importer reclaims import VAT (VAT-registered).
    #[serde(default = "default_reclaim_vat")]
    pub reclaim_vat: bool,
    /// Caller-supplied listing prices that replace the snapshot price for
    /// the named venues, in each venue's listing currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_prices: Option<HashMap<Marketplace, Decimal>>,
    /// Assumption overrides for this evaluation only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumption_overrides: Option<AssumptionOverrides>,
}

impl EvaluationRequest {
    /// Validates the request and parses the HS chapter, if any.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::Validation`] on a non-positive quantity
    /// or buy price, a malformed HS code, or a non-positive listing price
    /// override.
    pub fn validate(&self) -> EvaluationResult<Option<u8>> {
        if self.quantity == 0 {
            return Err(EvaluationError::validation("quantity must be positive"));
        }
        if self.buy_price <= Decimal::ZERO {
            return Err(EvaluationError::validation("buy price must be positive"));
        }
        if let Some(prices) = &self.listing_prices {
            for (marketplace, price) in prices {
                if *price <= Decimal::ZERO {
                    return Err(EvaluationError::validation(format!(
                        "listing price for {marketplace} must be positive"
                    )));
                }
            }
        }
        self.hs_chapter()
    }

    /// Parses the HS chapter from the first two digits of the HS code.
    fn hs_chapter(&self) -> EvaluationResult<Option<u8>> {
        let Some(code) = &self.hs_code else {
            return Ok(None);
        };
        let digits_only = code.bytes().all(|b| b.is_ascii_digit());
        if !digits_only || !(6..=10).contains(&code.len()) {
            return Err(EvaluationError::validation(format!(
                "HS code '{code}' must be 6 to 10 digits"
            )));
        }
        let chapter = code
            .get(..2)
            .and_then(|prefix| prefix.parse::<u8>().ok())
            .ok_or_else(|| {
                EvaluationError::validation(format!("HS code '{code}' has no parsable chapter"))
            })?;
        Ok(Some(chapter))
    }

    /// Returns the per-unit buy price as money in the buy-side currency.
    #[must_use]
    pub fn buy_money(&self) -> Money {
        Money::new(self.buy_price, self.currency)
    }

    /// Returns the effective category.
    #[must_use]
    pub fn category(&self) -> ProductCategory {
        self.product_category.unwrap_or(ProductCategory::Other)
    }
}

/// The orchestrating evaluation engine.
#[derive(Debug, Clone)]
pub struct DealEvaluationEngine {
    defaults: AssumptionSet,
    resolver: AssumptionResolver,
    fees: FeeCalculator,
    landed: LandedCostCalculator,
    margin: MarginEvaluator,
    demand: DemandEstimator,
    allocation: AllocationPlanner,
    scorer: DealScorer,
    advisor: NegotiationAdvisor,
}

impl Default for DealEvaluationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DealEvaluationEngine {
    /// Creates an engine on the shipped assumption defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::with_defaults(AssumptionSet::system_defaults(DEFAULT_ASSUMPTION_VERSION))
    }

    /// Creates an engine on a specific assumption baseline.
    #[must_use]
    pub fn with_defaults(defaults: AssumptionSet) -> Self {
        Self {
            defaults,
            resolver: AssumptionResolver::new(),
            fees: FeeCalculator::new(),
            landed: LandedCostCalculator::new(),
            margin: MarginEvaluator::new(),
            demand: DemandEstimator::new(),
            allocation: AllocationPlanner::new(),
            scorer: DealScorer::new(),
            advisor: NegotiationAdvisor::new(),
        }
    }

    /// Evaluates one deal against the supplied market snapshots.
    ///
    /// A channel whose calculation fails is skipped with a warning; the
    /// evaluation only fails outright when the request is invalid, an
    /// override is rejected, or no marketplace or peer-marketplace
    /// snapshot is available at all.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::Validation`] or
    /// [`EvaluationError::InvalidOverride`] for bad input, and
    /// [`EvaluationError::NoMarketData`] when no priceable marketplace
    /// snapshot exists.
    #[instrument(skip_all, fields(ean = %request.ean, quantity = request.quantity))]
    pub fn evaluate(
        &self,
        request: &EvaluationRequest,
        snapshots: &[MarketSnapshot],
    ) -> EvaluationResult<DealEvaluation> {
        let hs_chapter = request.validate()?;
        require_market_data(snapshots)?;
        let assumptions = self
            .resolver
            .resolve(&self.defaults, request.assumption_overrides.as_ref())?;

        let category = request.category();
        let mut channels = Vec::with_capacity(snapshots.len());
        for snapshot in snapshots {
            match self.evaluate_channel(request, snapshot, hs_chapter, &assumptions) {
                Ok(channel) => channels.push(channel),
                Err(error) => {
                    warn!(
                        marketplace = %snapshot.marketplace,
                        %error,
                        "channel evaluation failed, skipping"
                    );
                }
            }
        }
        channels.sort_by(|a, b| {
            b.margin_percent
                .partial_cmp(&a.margin_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let allocation = self
            .allocation
            .plan(&channels, request.quantity, &assumptions);
        apply_allocation_pace(&mut channels, &allocation.allocated);

        let best = channels
            .iter()
            .find(|channel| channel.recommendation.is_sellable());
        let best_margin = best
            .or_else(|| channels.first())
            .map_or(0.0, |channel| channel.margin_percent);
        let cheaper_origin_exists = self
            .advisor
            .cheaper_alternative_exists(category, request.supplier_region);
        let input = ScoreInput {
            best_margin_percent: best_margin,
            demand_confidence: best.map_or(0.0, |channel| channel.demand.confidence_score()),
            months_to_sell: months_to_clear(&channels, request.quantity),
            channels_found: channels.len(),
            cheaper_origin_exists,
        };
        let score = self.scorer.score(&input);
        let decision = self.scorer.decide(&score, &input);

        let negotiation = self.negotiation_support(request, decision, best)?;
        let sourcing_suggestions = if decision == DealDecision::SourceElsewhere {
            self.advisor
                .sourcing_suggestions(category, request.supplier_region)
        } else {
            Vec::new()
        };
        let explanation = explain(&channels, &score, decision, &allocation);
        info!(
            ean = %request.ean,
            overall = score.overall,
            %decision,
            channels = channels.len(),
            "deal evaluated"
        );

        Ok(DealEvaluation {
            deal_id: DealId::new_v4(),
            ean: request.ean.clone(),
            score,
            decision,
            explanation,
            best_channel: best.map(|channel| channel.marketplace),
            channel_analysis: channels,
            allocation,
            negotiation,
            sourcing_suggestions,
            evaluated_at: Utc::now(),
        })
    }

    fn evaluate_channel(
        &self,
        request: &EvaluationRequest,
        snapshot: &MarketSnapshot,
        hs_chapter: Option<u8>,
        assumptions: &AssumptionSet,
    ) -> EvaluationResult<ChannelEvaluation> {
        let snapshot = override_price(request, snapshot);
        let category = request.category();

        let pricing = self
            .fees
            .calculate(&snapshot, category, request.weight_kg, assumptions)?;
        let landed_input = LandedCostInput {
            buy_price: request.buy_money(),
            route: RouteKey::new(request.supplier_region, snapshot.marketplace.country()),
            category,
            hs_chapter,
            weight_kg: request.weight_kg,
            shipping_method: request.shipping_method,
            reclaim_vat: request.reclaim_vat,
        };
        let landed = self.landed.calculate(&landed_input, assumptions)?;
        let margin = self
            .margin
            .evaluate(&pricing, &landed, &snapshot.fx_to_listing)?;
        let demand = self.demand.estimate(&snapshot, category)?;

        Ok(ChannelEvaluation {
            marketplace: snapshot.marketplace,
            channel_type: snapshot.marketplace.channel_type(),
            sell_price: pricing.sell_price,
            fees: pricing.fees,
            net_proceeds: pricing.net_proceeds,
            landed_cost: landed,
            landed_cost_converted: margin.landed_cost_converted,
            net_margin: margin.net_margin,
            margin_percent: margin.margin_percent,
            recommendation: margin.recommendation,
            demand,
            months_to_sell: None,
            fx_to_listing: snapshot.fx_to_listing,
            data_source: snapshot.data_source,
        })
    }

    fn negotiation_support(
        &self,
        request: &EvaluationRequest,
        decision: DealDecision,
        best: Option<&ChannelEvaluation>,
    ) -> EvaluationResult<Option<NegotiationSupport>> {
        if !decision.needs_negotiation_support() {
            return Ok(None);
        }
        let Some(best) = best else {
            return Ok(None);
        };
        let support = self.advisor.advise(
            request.buy_money(),
            request.quantity,
            best.net_proceeds,
            &best.fx_to_listing,
        )?;
        Ok(Some(support))
    }
}

/// Fails fast when no marketplace or peer-marketplace snapshot exists.
/// Retailer and distributor channels are derived from marketplace prices,
/// so without at least one the evaluation has nothing to stand on.
fn require_market_data(snapshots: &[MarketSnapshot]) -> EvaluationResult<()> {
    let priceable = snapshots.iter().any(|snapshot| {
        matches!(
            snapshot.marketplace.channel_type(),
            ChannelType::Marketplace | ChannelType::PeerMarketplace
        )
    });
    if priceable {
        Ok(())
    } else {
        Err(EvaluationError::NoMarketData)
    }
}

fn override_price(request: &EvaluationRequest, snapshot: &MarketSnapshot) -> MarketSnapshot {
    let mut snapshot = snapshot.clone();
    if let Some(price) = request
        .listing_prices
        .as_ref()
        .and_then(|prices| prices.get(&snapshot.marketplace))
    {
        snapshot.sell_price = Money::new(*price, snapshot.marketplace.currency());
    }
    snapshot
}

/// Fills in each allocated channel's months-to-sell pace.
fn apply_allocation_pace(
    channels: &mut [ChannelEvaluation],
    allocated: &std::collections::BTreeMap<Marketplace, u32>,
) {
    for channel in channels {
        let capacity = channel.absorption_capacity();
        if let Some(quantity) = allocated.get(&channel.marketplace) {
            if capacity > 0.0 {
                channel.months_to_sell = Some(f64::from(*quantity) / capacity);
            }
        }
    }
}

/// Months to clear the full quantity across all sellable channels.
fn months_to_clear(channels: &[ChannelEvaluation], quantity: u32) -> Option<f64> {
    let total_capacity: f64 = channels
        .iter()
        .filter(|channel| channel.recommendation.is_sellable())
        .map(ChannelEvaluation::absorption_capacity)
        .sum();
    if total_capacity > 0.0 {
        Some(f64::from(quantity) / total_capacity)
    } else {
        None
    }
}

fn explain(
    channels: &[ChannelEvaluation],
    score: &crate::domain::entities::deal_evaluation::DealScore,
    decision: DealDecision,
    allocation: &crate::domain::entities::allocation_plan::AllocationPlan,
) -> String {
    let sellable = channels
        .iter()
        .filter(|channel| channel.recommendation.is_sellable())
        .count();
    let channel_summary = channels.first().map_or_else(
        || "no channel produced a usable evaluation".to_string(),
        |top| {
            format!(
                "best channel {} at {:.1}% net margin",
                top.marketplace, top.margin_percent
            )
        },
    );
    format!(
        "{decision}: score {} ({channel_summary}; {sellable} of {} channels sellable; \
         allocation holds {} of {} units)",
        score.overall,
        channels.len(),
        allocation.hold,
        allocation.total_quantity,
    )
}
