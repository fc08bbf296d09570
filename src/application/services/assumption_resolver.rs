//! # Assumption Resolver
//!
//! Merges caller-supplied overrides onto the versioned system defaults,
//! producing the effective [`AssumptionSet`] for one evaluation call.
//!
//! Override payloads accept a single object or a list per category; both
//! shapes are normalized to lists at the boundary so downstream code never
//! branches on shape. Overrides match defaults by exact key equality
//! (origin + destination for routes, marketplace for fees) and replace only
//! the matched fields; everything else keeps the system defaults.
//!
//! Validation is all-or-nothing: a rejected override leaves the caller's
//! defaults untouched.

use crate::application::error::{EvaluationError, EvaluationResult};
use crate::domain::entities::assumption_set::{
    AssumptionSet, DutyMethod, DutyRule, FeeRule, ShippingMethod, ShippingRule,
};
use crate::domain::value_objects::channel::Marketplace;
use crate::domain::value_objects::rate::Rate;
use crate::domain::value_objects::region::{Country, Region, RouteKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single value or a list, accepted interchangeably at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single override object.
    One(T),
    /// A list of override objects.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Normalizes to a list.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }

    /// Returns the overrides as a slice-like vec of references.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        match self {
            Self::One(item) => Box::new(std::iter::once(item)),
            Self::Many(items) => Box::new(items.iter()),
        }
    }
}

/// Override for one shipping route. Absent fields keep the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOverride {
    /// Origin region of the route.
    pub origin: Region,
    /// Destination country of the route.
    pub destination: Country,
    /// Method whose rate is replaced. Defaults to air.
    #[serde(default)]
    pub method: ShippingMethod,
    /// Replacement per-kg rate, buy-side currency.
    #[serde(default)]
    pub rate_per_kg: Option<Decimal>,
    /// Replacement minimum charge, buy-side currency.
    #[serde(default)]
    pub min_charge: Option<Decimal>,
}

/// Override for one route's duty rule. Absent fields keep the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyOverride {
    /// Origin region of the route.
    pub origin: Region,
    /// Destination country of the route.
    pub destination: Country,
    /// Ad-valorem rate replacing the table lookup (HS-code method).
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Fixed per-unit duty amount (direct method). Takes precedence over
    /// `rate` when both are present.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Replacement trade-remedy surcharge.
    #[serde(default)]
    pub surcharge: Option<Decimal>,
}

/// Override for one marketplace's fee rule. Absent fields keep the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeOverride {
    /// The marketplace the override targets.
    pub marketplace: Marketplace,
    /// Referral rate replacement.
    #[serde(default)]
    pub referral_rate: Option<Decimal>,
    /// Media closing fee replacement, listing currency.
    #[serde(default)]
    pub closing_fee: Option<Decimal>,
    /// Per-order fee replacement, listing currency.
    #[serde(default)]
    pub per_order_fee: Option<Decimal>,
    /// Retailer commission rate replacement.
    #[serde(default)]
    pub commission_rate: Option<Decimal>,
    /// Retailer payment fee rate replacement.
    #[serde(default)]
    pub payment_fee_rate: Option<Decimal>,
    /// Distributor buy percentage replacement.
    #[serde(default)]
    pub buy_percent: Option<Decimal>,
    /// Retailer price multiplier replacement.
    #[serde(default)]
    pub retailer_multiplier: Option<Decimal>,
    /// Destination VAT rate replacement.
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    /// Distributor minimum order quantity replacement.
    #[serde(default)]
    pub min_order_quantity: Option<u32>,
}

/// The full override payload supplied with an evaluation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssumptionOverrides {
    /// Shipping route overrides.
    #[serde(default)]
    pub shipping_overrides: Option<OneOrMany<ShippingOverride>>,
    /// Duty route overrides.
    #[serde(default)]
    pub duty_overrides: Option<OneOrMany<DutyOverride>>,
    /// Marketplace fee overrides.
    #[serde(default)]
    pub fee_overrides: Option<OneOrMany<FeeOverride>>,
}

impl AssumptionOverrides {
    /// Returns true if the payload carries no overrides at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shipping_overrides.is_none()
            && self.duty_overrides.is_none()
            && self.fee_overrides.is_none()
    }
}

/// Merges overrides onto system defaults. Pure; no side effects.
#[derive(Debug, Clone, Default)]
pub struct AssumptionResolver;

impl AssumptionResolver {
    /// Creates a new resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolves the effective assumption set from defaults plus overrides.
    ///
    /// Every override is validated before any is applied, so a failure
    /// never yields a partially merged set.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::InvalidOverride`] for rates outside
    /// `[0, 1]` or negative amounts.
    pub fn resolve(
        &self,
        defaults: &AssumptionSet,
        overrides: Option<&AssumptionOverrides>,
    ) -> EvaluationResult<AssumptionSet> {
        let mut resolved = defaults.clone();
        let Some(overrides) = overrides else {
            return Ok(resolved);
        };

        if let Some(shipping) = &overrides.shipping_overrides {
            let items: Vec<_> = shipping.iter().collect();
            for item in &items {
                validate_shipping(item)?;
            }
            for item in items {
                apply_shipping(&mut resolved, item);
            }
        }
        if let Some(duty) = &overrides.duty_overrides {
            let validated: Vec<_> = duty
                .iter()
                .map(|item| validate_duty(item).map(|rule| (item, rule)))
                .collect::<EvaluationResult<_>>()?;
            for (item, rule) in validated {
                apply_duty(&mut resolved, item, rule);
            }
        }
        if let Some(fees) = &overrides.fee_overrides {
            let validated: Vec<_> = fees
                .iter()
                .map(|item| {
                    let base = resolved.fee_rule(item.marketplace).cloned().unwrap_or_default();
                    validate_fee(item, base).map(|rule| (item, rule))
                })
                .collect::<EvaluationResult<_>>()?;
            for (item, rule) in validated {
                apply_fee(&mut resolved, item, rule);
            }
        }

        if resolved.has_overrides() {
            debug!(
                overridden = resolved.overridden_fields().len(),
                "assumption overrides applied"
            );
        }
        Ok(resolved)
    }
}

fn require_non_negative(value: Decimal, field: &str) -> EvaluationResult<()> {
    if value < Decimal::ZERO {
        return Err(EvaluationError::invalid_override(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}

fn strict_rate(value: Decimal, field: &str) -> EvaluationResult<Rate> {
    Rate::new(value).map_err(|_| {
        EvaluationError::invalid_override(format!(
            "{field} must be a fractional rate in [0, 1], got {value}"
        ))
    })
}

fn validate_shipping(item: &ShippingOverride) -> EvaluationResult<()> {
    if item.rate_per_kg.is_none() && item.min_charge.is_none() {
        return Err(EvaluationError::invalid_override(format!(
            "shipping override for {} carries no fields",
            RouteKey::new(item.origin, item.destination)
        )));
    }
    if let Some(rate) = item.rate_per_kg {
        require_non_negative(rate, "shipping.ratePerKg")?;
    }
    if let Some(min) = item.min_charge {
        require_non_negative(min, "shipping.minCharge")?;
    }
    Ok(())
}

fn apply_shipping(set: &mut AssumptionSet, item: &ShippingOverride) {
    let route = RouteKey::new(item.origin, item.destination);
    let mut rule = set
        .shipping_for(&route)
        .cloned()
        .unwrap_or_else(ShippingRule::generic_cross_border);
    if let Some(rate) = item.rate_per_kg {
        rule = rule.with_rate(item.method, rate);
        set.record_override(format!("shipping.{route}.{}.rate_per_kg", item.method));
    }
    if let Some(min) = item.min_charge {
        rule = rule.with_min_charge(min);
        set.record_override(format!("shipping.{route}.min_charge"));
    }
    set.set_shipping(route, rule);
}

fn validate_duty(item: &DutyOverride) -> EvaluationResult<DutyRule> {
    if item.rate.is_none() && item.amount.is_none() && item.surcharge.is_none() {
        return Err(EvaluationError::invalid_override(format!(
            "duty override for {} carries no fields",
            RouteKey::new(item.origin, item.destination)
        )));
    }
    let surcharge = match item.surcharge {
        Some(value) => strict_rate(value, "duty.surcharge")?,
        None => Rate::ZERO,
    };
    let method = if let Some(amount) = item.amount {
        require_non_negative(amount, "duty.amount")?;
        DutyMethod::Direct { amount }
    } else if let Some(rate) = item.rate {
        DutyMethod::HsCode {
            rate_override: Some(strict_rate(rate, "duty.rate")?),
        }
    } else {
        DutyMethod::Category
    };
    Ok(DutyRule::new(method, surcharge))
}

fn apply_duty(set: &mut AssumptionSet, item: &DutyOverride, rule: DutyRule) {
    let route = RouteKey::new(item.origin, item.destination);
    if item.amount.is_some() {
        set.record_override(format!("duty.{route}.amount"));
    } else if item.rate.is_some() {
        set.record_override(format!("duty.{route}.rate"));
    }
    if item.surcharge.is_some() {
        set.record_override(format!("duty.{route}.surcharge"));
    }
    set.set_duty(route, rule);
}

fn validate_fee(item: &FeeOverride, mut rule: FeeRule) -> EvaluationResult<FeeRule> {
    if let Some(value) = item.referral_rate {
        rule.referral_rate = Some(strict_rate(value, "fees.referralRate")?);
    }
    if let Some(value) = item.commission_rate {
        rule.commission_rate = Some(strict_rate(value, "fees.commissionRate")?);
    }
    if let Some(value) = item.payment_fee_rate {
        rule.payment_fee_rate = Some(strict_rate(value, "fees.paymentFeeRate")?);
    }
    if let Some(value) = item.buy_percent {
        rule.buy_percent = Some(strict_rate(value, "fees.buyPercent")?);
    }
    if let Some(value) = item.vat_rate {
        rule.vat_rate = Some(strict_rate(value, "fees.vatRate")?);
    }
    if let Some(value) = item.closing_fee {
        require_non_negative(value, "fees.closingFee")?;
        rule.closing_fee = Some(value);
    }
    if let Some(value) = item.per_order_fee {
        require_non_negative(value, "fees.perOrderFee")?;
        rule.per_order_fee = Some(value);
    }
    if let Some(value) = item.retailer_multiplier {
        require_non_negative(value, "fees.retailerMultiplier")?;
        rule.retailer_multiplier = Some(value);
    }
    if let Some(value) = item.min_order_quantity {
        rule.min_order_quantity = Some(value);
    }
    Ok(rule)
}

fn apply_fee(set: &mut AssumptionSet, item: &FeeOverride, rule: FeeRule) {
    let venue = item.marketplace.code();
    let fields: [(&str, bool); 9] = [
        ("referral_rate", item.referral_rate.is_some()),
        ("closing_fee", item.closing_fee.is_some()),
        ("per_order_fee", item.per_order_fee.is_some()),
        ("commission_rate", item.commission_rate.is_some()),
        ("payment_fee_rate", item.payment_fee_rate.is_some()),
        ("buy_percent", item.buy_percent.is_some()),
        ("retailer_multiplier", item.retailer_multiplier.is_some()),
        ("vat_rate", item.vat_rate.is_some()),
        ("min_order_quantity", item.min_order_quantity.is_some()),
    ];
    for (field, present) in fields {
        if present {
            set.record_override(format!("fees.{venue}.{field}"));
        }
    }
    set.set_fee_rule(item.marketplace, rule);
}
