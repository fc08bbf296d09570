//! # Landed Cost Calculator
//!
//! Computes the per-unit landed cost in the buy-side currency:
//! `buy_price + duty + shipping`, with import VAT tracked separately and
//! added to the basis only when it is not reclaimed.
//!
//! Duty follows the route's [`DutyMethod`]: the per-category table
//! (default), the HS chapter table with optional override rate, or a fixed
//! amount. Domestic routes attract neither duty nor import VAT.

use crate::application::error::EvaluationResult;
use crate::domain::entities::assumption_set::{
    hs_chapter_rate, AssumptionSet, DutyMethod, DutyRule, ShippingMethod, ShippingRule,
};
use crate::domain::entities::channel_evaluation::LandedCost;
use crate::domain::value_objects::arithmetic::CheckedArithmetic;
use crate::domain::value_objects::category::ProductCategory;
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::rate::Rate;
use crate::domain::value_objects::region::{Country, Region, RouteKey};
use rust_decimal::Decimal;
use tracing::debug;

/// Assumed unit weight when the caller supplies none.
pub const DEFAULT_WEIGHT_KG: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Inputs for one landed cost calculation.
#[derive(Debug, Clone)]
pub struct LandedCostInput {
    /// Wholesale buy price per unit, buy-side currency.
    pub buy_price: Money,
    /// Sourcing route.
    pub route: RouteKey,
    /// Product category, for the duty and VAT tables.
    pub category: ProductCategory,
    /// HS chapter parsed from the request's HS code, when supplied.
    pub hs_chapter: Option<u8>,
    /// Unit weight in kilograms.
    pub weight_kg: Option<Decimal>,
    /// Freight method. Defaults to air upstream.
    pub shipping_method: ShippingMethod,
    /// True when the importer reclaims import VAT.
    pub reclaim_vat: bool,
}

/// Pure landed cost calculator.
#[derive(Debug, Clone, Default)]
pub struct LandedCostCalculator;

impl LandedCostCalculator {
    /// Creates a new calculator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes the landed cost for one unit.
    ///
    /// # Errors
    ///
    /// Returns a domain error on arithmetic overflow or currency mixing.
    pub fn calculate(
        &self,
        input: &LandedCostInput,
        assumptions: &AssumptionSet,
    ) -> EvaluationResult<LandedCost> {
        let currency = input.buy_price.currency();
        let domestic = is_domestic(input.route);

        let duty = if domestic {
            Money::zero(currency)
        } else {
            let rule = assumptions
                .duty_for(&input.route)
                .cloned()
                .unwrap_or_else(DutyRule::standard);
            self.duty_for(input, &rule)?
        };

        let shipping = self.shipping_for(input, assumptions)?;

        let import_vat = if domestic {
            Money::zero(currency)
        } else {
            let vat_rate = input.category.vat_rate(input.route.destination);
            input
                .buy_price
                .safe_add(duty)?
                .safe_add(shipping)?
                .mul_decimal(vat_rate.get())?
                .round2()
        };

        let cost = LandedCost::compute(
            input.buy_price,
            duty,
            shipping,
            import_vat,
            input.reclaim_vat,
        )?;
        debug!(
            route = %input.route,
            total = %cost.total,
            duty = %cost.duty,
            shipping = %cost.shipping,
            "landed cost computed"
        );
        Ok(cost)
    }

    fn duty_for(&self, input: &LandedCostInput, rule: &DutyRule) -> EvaluationResult<Money> {
        let duty = match rule.method() {
            DutyMethod::Category => {
                let rate = rule.category_rate(input.category);
                input.buy_price.mul_decimal(rate.get())?
            }
            DutyMethod::HsCode { rate_override } => {
                let base = rate_override
                    .or_else(|| input.hs_chapter.and_then(hs_chapter_rate))
                    .unwrap_or_else(|| input.category.base_duty_rate());
                let rate = Rate::clamped(base.get().safe_add(rule.surcharge().get())?);
                input.buy_price.mul_decimal(rate.get())?
            }
            DutyMethod::Direct { amount } => Money::new(*amount, input.buy_price.currency()),
        };
        Ok(duty.round2())
    }

    fn shipping_for(
        &self,
        input: &LandedCostInput,
        assumptions: &AssumptionSet,
    ) -> EvaluationResult<Money> {
        let rule = assumptions
            .shipping_for(&input.route)
            .cloned()
            .unwrap_or_else(|| {
                debug!(route = %input.route, "no shipping rule for route, using generic rate");
                ShippingRule::generic_cross_border()
            });
        let weight = input.weight_kg.unwrap_or(DEFAULT_WEIGHT_KG);
        let by_weight = weight.safe_mul(rule.rate_per_kg(input.shipping_method))?;
        let charged = by_weight.max(rule.min_charge());
        Ok(Money::new(charged, input.buy_price.currency()).round2())
    }
}

/// True when the route never crosses a customs border.
fn is_domestic(route: RouteKey) -> bool {
    matches!(
        (route.origin, route.destination),
        (Region::Us, Country::Us)
            | (Region::Uk, Country::Uk)
            | (Region::Eu, Country::De | Country::Fr)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::currency::Currency;

    fn usd(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), Currency::Usd)
    }

    fn input(route: RouteKey) -> LandedCostInput {
        LandedCostInput {
            buy_price: usd(10000),
            route,
            category: ProductCategory::Electronics,
            hs_chapter: None,
            weight_kg: None,
            shipping_method: ShippingMethod::Air,
            reclaim_vat: true,
        }
    }

    fn assumptions() -> AssumptionSet {
        AssumptionSet::system_defaults(1)
    }

    mod duty {
        use super::*;

        #[test]
        fn category_method_uses_table() {
            let cost = LandedCostCalculator::new()
                .calculate(
                    &input(RouteKey::new(Region::China, Country::Uk)),
                    &assumptions(),
                )
                .unwrap();
            // Electronics 2% of $100.
            assert_eq!(cost.duty, usd(200));
        }

        #[test]
        fn china_us_surcharge_stacks() {
            let cost = LandedCostCalculator::new()
                .calculate(
                    &input(RouteKey::new(Region::China, Country::Us)),
                    &assumptions(),
                )
                .unwrap();
            // 2% category + 7.5% remedy surcharge.
            assert_eq!(cost.duty, usd(950));
        }

        #[test]
        fn hs_chapter_table() {
            let mut item = input(RouteKey::new(Region::China, Country::Uk));
            item.hs_chapter = Some(85);
            let mut set = assumptions();
            set.set_duty(
                item.route,
                DutyRule::new(DutyMethod::HsCode { rate_override: None }, Rate::ZERO),
            );
            let cost = LandedCostCalculator::new().calculate(&item, &set).unwrap();
            // Chapter 85 at 2.7%.
            assert_eq!(cost.duty, usd(270));
        }

        #[test]
        fn direct_amount() {
            let item = input(RouteKey::new(Region::China, Country::Uk));
            let mut set = assumptions();
            set.set_duty(
                item.route,
                DutyRule::new(
                    DutyMethod::Direct {
                        amount: Decimal::new(1234, 2),
                    },
                    Rate::ZERO,
                ),
            );
            let cost = LandedCostCalculator::new().calculate(&item, &set).unwrap();
            assert_eq!(cost.duty, usd(1234));
        }

        #[test]
        fn domestic_route_no_duty() {
            let cost = LandedCostCalculator::new()
                .calculate(&input(RouteKey::new(Region::Us, Country::Us)), &assumptions())
                .unwrap();
            assert!(cost.duty.is_zero());
            assert!(cost.import_vat.is_zero());
        }
    }

    mod shipping {
        use super::*;

        #[test]
        fn min_charge_floors_light_parcels() {
            // cn->uk air: 6.50 * 1.10 = 7.15/kg, min charge 8.94.
            // Default 0.5 kg would cost 3.58 by weight.
            let cost = LandedCostCalculator::new()
                .calculate(
                    &input(RouteKey::new(Region::China, Country::Uk)),
                    &assumptions(),
                )
                .unwrap();
            assert_eq!(cost.shipping, usd(894));
        }

        #[test]
        fn heavy_parcels_pay_by_weight() {
            let mut item = input(RouteKey::new(Region::China, Country::Uk));
            item.weight_kg = Some(Decimal::new(4, 0));
            let cost = LandedCostCalculator::new()
                .calculate(&item, &assumptions())
                .unwrap();
            // 4 kg * 7.15 = 28.60.
            assert_eq!(cost.shipping, usd(2860));
        }

        #[test]
        fn sea_freight_rate() {
            let mut item = input(RouteKey::new(Region::China, Country::Uk));
            item.shipping_method = ShippingMethod::Sea;
            item.weight_kg = Some(Decimal::new(20, 0));
            let cost = LandedCostCalculator::new()
                .calculate(&item, &assumptions())
                .unwrap();
            // Sea = 7.15 * 0.18 = 1.29/kg; 20 kg = 25.80, above the 8.94 floor.
            assert_eq!(cost.shipping, usd(2580));
        }
    }

    mod vat {
        use super::*;

        #[test]
        fn reclaimed_vat_tracked_but_excluded() {
            let cost = LandedCostCalculator::new()
                .calculate(
                    &input(RouteKey::new(Region::China, Country::Uk)),
                    &assumptions(),
                )
                .unwrap();
            // (100 + 2.00 + 8.94) * 20% = 22.19.
            assert_eq!(cost.import_vat, usd(2219));
            assert!(cost.vat_reclaimed);
            assert_eq!(cost.total, usd(11094));
        }

        #[test]
        fn unreclaimed_vat_enters_basis() {
            let mut item = input(RouteKey::new(Region::China, Country::Uk));
            item.reclaim_vat = false;
            let cost = LandedCostCalculator::new()
                .calculate(&item, &assumptions())
                .unwrap();
            assert_eq!(cost.total, usd(13313));
        }
    }

    #[test]
    fn generic_route_fallback_rates() {
        let rule = ShippingRule::generic_cross_border();
        assert_eq!(rule.rate_per_kg(ShippingMethod::Air), Decimal::new(950, 2));
        assert_eq!(rule.rate_per_kg(ShippingMethod::Sea), Decimal::new(200, 2));
        assert_eq!(rule.min_charge(), Decimal::new(1200, 2));
    }
}
