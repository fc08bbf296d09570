//! # Assumption Set
//!
//! The effective set of shipping, duty and fee assumptions used by every
//! calculator in one evaluation call.
//!
//! An [`AssumptionSet`] is built fresh per evaluation from versioned system
//! defaults plus caller overrides (copy-on-override) and is never mutated
//! afterwards. The `overridden_fields` audit set records exactly which
//! fields diverged from the defaults.

use crate::domain::value_objects::category::ProductCategory;
use crate::domain::value_objects::channel::Marketplace;
use crate::domain::value_objects::rate::Rate;
use crate::domain::value_objects::region::{Country, Region, RouteKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Shipping method for a route.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    /// Air freight (default).
    #[default]
    Air,
    /// Sea freight.
    Sea,
    /// Express courier.
    Express,
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Air => write!(f, "air"),
            Self::Sea => write!(f, "sea"),
            Self::Express => write!(f, "express"),
        }
    }
}

/// Per-route shipping rates, denominated in the buy-side currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRule {
    /// Rate per kilogram for air freight.
    air_per_kg: Decimal,
    /// Rate per kilogram for sea freight.
    sea_per_kg: Decimal,
    /// Rate per kilogram for express courier.
    express_per_kg: Decimal,
    /// Minimum charge regardless of weight.
    min_charge: Decimal,
}

impl ShippingRule {
    /// Creates a new shipping rule.
    #[must_use]
    pub const fn new(
        air_per_kg: Decimal,
        sea_per_kg: Decimal,
        express_per_kg: Decimal,
        min_charge: Decimal,
    ) -> Self {
        Self {
            air_per_kg,
            sea_per_kg,
            express_per_kg,
            min_charge,
        }
    }

    /// Generic cross-border fallback used for routes with no table entry.
    #[must_use]
    pub fn generic_cross_border() -> Self {
        Self::new(
            Decimal::new(950, 2),
            Decimal::new(200, 2),
            Decimal::new(1600, 2),
            Decimal::new(1200, 2),
        )
    }

    /// Returns the per-kg rate for the given method.
    #[must_use]
    pub const fn rate_per_kg(&self, method: ShippingMethod) -> Decimal {
        match method {
            ShippingMethod::Air => self.air_per_kg,
            ShippingMethod::Sea => self.sea_per_kg,
            ShippingMethod::Express => self.express_per_kg,
        }
    }

    /// Returns the minimum charge.
    #[inline]
    #[must_use]
    pub const fn min_charge(&self) -> Decimal {
        self.min_charge
    }

    /// Returns a copy with one method's rate replaced.
    #[must_use]
    pub fn with_rate(mut self, method: ShippingMethod, rate_per_kg: Decimal) -> Self {
        match method {
            ShippingMethod::Air => self.air_per_kg = rate_per_kg,
            ShippingMethod::Sea => self.sea_per_kg = rate_per_kg,
            ShippingMethod::Express => self.express_per_kg = rate_per_kg,
        }
        self
    }

    /// Returns a copy with the minimum charge replaced.
    #[must_use]
    pub fn with_min_charge(mut self, min_charge: Decimal) -> Self {
        self.min_charge = min_charge;
        self
    }
}

/// Duty calculation method for a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DutyMethod {
    /// Ad-valorem rate from the per-category table (default).
    Category,
    /// Rate from the HS chapter table, optionally overridden.
    HsCode {
        /// Caller-supplied rate replacing the chapter table lookup.
        rate_override: Option<Rate>,
    },
    /// Fixed per-unit duty amount in the buy-side currency.
    Direct {
        /// The fixed amount.
        amount: Decimal,
    },
}

/// Per-route duty assumptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyRule {
    /// How duty is computed for this route.
    method: DutyMethod,
    /// Additional trade-remedy surcharge stacked on ad-valorem methods.
    surcharge: Rate,
}

impl DutyRule {
    /// Creates a new duty rule.
    #[must_use]
    pub const fn new(method: DutyMethod, surcharge: Rate) -> Self {
        Self { method, surcharge }
    }

    /// Standard category-method rule with no surcharge.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            method: DutyMethod::Category,
            surcharge: Rate::ZERO,
        }
    }

    /// Returns the duty method.
    #[inline]
    #[must_use]
    pub const fn method(&self) -> &DutyMethod {
        &self.method
    }

    /// Returns the trade-remedy surcharge.
    #[inline]
    #[must_use]
    pub const fn surcharge(&self) -> Rate {
        self.surcharge
    }

    /// Returns the ad-valorem duty rate for a category under the category
    /// method, including the surcharge.
    #[must_use]
    pub fn category_rate(&self, category: ProductCategory) -> Rate {
        Rate::clamped(category.base_duty_rate().get() + self.surcharge.get())
    }
}

/// Per-marketplace fee assumptions. `None` fields fall back to the
/// channel's built-in defaults in the fee calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FeeRule {
    /// Marketplace referral rate override.
    pub referral_rate: Option<Rate>,
    /// Media closing fee override, listing currency.
    pub closing_fee: Option<Decimal>,
    /// Peer-marketplace per-order fee override, listing currency.
    pub per_order_fee: Option<Decimal>,
    /// Retailer commission rate override.
    pub commission_rate: Option<Rate>,
    /// Retailer payment processing rate override.
    pub payment_fee_rate: Option<Rate>,
    /// Distributor buy percentage override.
    pub buy_percent: Option<Rate>,
    /// Retailer price multiplier relative to the marketplace reference.
    pub retailer_multiplier: Option<Decimal>,
    /// Destination VAT rate override.
    pub vat_rate: Option<Rate>,
    /// Distributor minimum order quantity, enforced at allocation time.
    pub min_order_quantity: Option<u32>,
}

/// The effective assumptions for one evaluation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionSet {
    /// Version of the system defaults this set was built from.
    version: u32,
    /// Shipping rules keyed by route.
    shipping: HashMap<RouteKey, ShippingRule>,
    /// Duty rules keyed by route.
    duty: HashMap<RouteKey, DutyRule>,
    /// Fee rules keyed by marketplace.
    fees: HashMap<Marketplace, FeeRule>,
    /// Audit set of overridden field keys, e.g. `shipping.cn->uk.air`.
    overridden_fields: BTreeSet<String>,
}

impl AssumptionSet {
    /// Builds the versioned system defaults.
    ///
    /// Shipping and duty tables cover every known origin region to every
    /// destination country; fee tables seed the retailer and distributor
    /// venues with their standard terms.
    #[must_use]
    pub fn system_defaults(version: u32) -> Self {
        let origins = [
            Region::China,
            Region::Vietnam,
            Region::India,
            Region::Taiwan,
            Region::Mexico,
            Region::Eu,
            Region::Uk,
            Region::Us,
        ];

        let mut shipping = HashMap::new();
        let mut duty = HashMap::new();
        for origin in origins {
            for destination in Country::ALL {
                let route = RouteKey::new(origin, destination);
                shipping.insert(route, default_shipping_rule(origin, destination));
                duty.insert(route, default_duty_rule(origin, destination));
            }
        }

        let mut fees = HashMap::new();
        fees.insert(
            Marketplace::RetailerUs,
            FeeRule {
                commission_rate: Some(Rate::from_bps(1200)),
                payment_fee_rate: Some(Rate::from_bps(250)),
                retailer_multiplier: Some(Decimal::new(93, 2)),
                ..FeeRule::default()
            },
        );
        fees.insert(
            Marketplace::RetailerUk,
            FeeRule {
                commission_rate: Some(Rate::from_bps(1000)),
                payment_fee_rate: Some(Rate::from_bps(250)),
                retailer_multiplier: Some(Decimal::new(96, 2)),
                ..FeeRule::default()
            },
        );
        fees.insert(
            Marketplace::DistributorUs,
            FeeRule {
                buy_percent: Some(Rate::from_bps(5500)),
                min_order_quantity: Some(25),
                ..FeeRule::default()
            },
        );
        fees.insert(
            Marketplace::DistributorEu,
            FeeRule {
                buy_percent: Some(Rate::from_bps(6000)),
                min_order_quantity: Some(50),
                ..FeeRule::default()
            },
        );

        Self {
            version,
            shipping,
            duty,
            fees,
            overridden_fields: BTreeSet::new(),
        }
    }

    /// Returns the defaults version.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the shipping rule for a route, if present.
    #[must_use]
    pub fn shipping_for(&self, route: &RouteKey) -> Option<&ShippingRule> {
        self.shipping.get(route)
    }

    /// Returns the duty rule for a route, if present.
    #[must_use]
    pub fn duty_for(&self, route: &RouteKey) -> Option<&DutyRule> {
        self.duty.get(route)
    }

    /// Returns the fee rule for a marketplace, if present.
    #[must_use]
    pub fn fee_rule(&self, marketplace: Marketplace) -> Option<&FeeRule> {
        self.fees.get(&marketplace)
    }

    /// Returns the audit set of overridden field keys.
    #[must_use]
    pub fn overridden_fields(&self) -> &BTreeSet<String> {
        &self.overridden_fields
    }

    /// Returns true if any field was overridden.
    #[must_use]
    pub fn has_overrides(&self) -> bool {
        !self.overridden_fields.is_empty()
    }

    pub(crate) fn set_shipping(&mut self, route: RouteKey, rule: ShippingRule) {
        self.shipping.insert(route, rule);
    }

    pub(crate) fn set_duty(&mut self, route: RouteKey, rule: DutyRule) {
        self.duty.insert(route, rule);
    }

    pub(crate) fn set_fee_rule(&mut self, marketplace: Marketplace, rule: FeeRule) {
        self.fees.insert(marketplace, rule);
    }

    pub(crate) fn record_override(&mut self, field: String) {
        self.overridden_fields.insert(field);
    }
}

/// Returns the HS chapter duty rate, if the chapter is tabled.
#[must_use]
pub fn hs_chapter_rate(chapter: u8) -> Option<Rate> {
    let bps = match chapter {
        39 => 450, // plastics
        42 => 800, // leather goods
        49 => 0,   // printed books
        61 | 62 => 1200, // apparel
        64 => 1000, // footwear
        70 => 500, // glassware
        84 => 180, // machinery
        85 => 270, // electrical equipment
        94 => 250, // furniture
        95 => 0,   // toys
        _ => return None,
    };
    Some(Rate::from_bps(bps))
}

fn default_shipping_rule(origin: Region, destination: Country) -> ShippingRule {
    let base_air = match origin {
        Region::China => Decimal::new(650, 2),
        Region::Taiwan => Decimal::new(680, 2),
        Region::Vietnam => Decimal::new(700, 2),
        Region::India => Decimal::new(750, 2),
        Region::Mexico => Decimal::new(580, 2),
        Region::Eu => Decimal::new(450, 2),
        Region::Uk => Decimal::new(420, 2),
        Region::Us => Decimal::new(380, 2),
    };
    let dest_factor = match destination {
        Country::Us => Decimal::new(100, 2),
        Country::De => Decimal::new(108, 2),
        Country::Fr => Decimal::new(109, 2),
        Country::Uk => Decimal::new(110, 2),
        Country::Au => Decimal::new(130, 2),
    };
    let air = (base_air * dest_factor).round_dp(2);
    let sea = (air * Decimal::new(18, 2)).round_dp(2);
    let express = (air * Decimal::new(185, 2)).round_dp(2);
    let min_charge = (air * Decimal::new(125, 2)).round_dp(2);
    ShippingRule::new(air, sea, express, min_charge)
}

fn default_duty_rule(origin: Region, destination: Country) -> DutyRule {
    // Section-301-style remedy tariffs on the China -> US lane.
    let surcharge = if origin == Region::China && destination == Country::Us {
        Rate::from_bps(750)
    } else {
        Rate::ZERO
    };
    DutyRule::new(DutyMethod::Category, surcharge)
}
