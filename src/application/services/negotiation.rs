//! # Negotiation Advisor
//!
//! Derives supplier negotiation targets from the best channel's net
//! proceeds, and alternative-sourcing suggestions from a static reference
//! table.
//!
//! With `P` the best net proceeds converted to the buy-side currency:
//! `target = P / 1.25` (the buy price at which the deal clears a 25%
//! margin) and `walk_away = P / 1.15` (15%). The advisor only runs for
//! Renegotiate and Source Elsewhere decisions.

use crate::application::error::EvaluationResult;
use crate::domain::entities::deal_evaluation::{NegotiationSupport, SourcingSuggestion};
use crate::domain::value_objects::category::ProductCategory;
use crate::domain::value_objects::currency::FxRate;
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::rate::Rate;
use crate::domain::value_objects::region::Region;
use rust_decimal::Decimal;

/// Divisor solving the buy price for a 25% margin.
const TARGET_MARGIN_DIVISOR: Decimal = Decimal::from_parts(125, 0, 0, false, 2);
/// Divisor solving the buy price for a 15% margin.
const WALK_AWAY_DIVISOR: Decimal = Decimal::from_parts(115, 0, 0, false, 2);

/// Pure negotiation advisor.
#[derive(Debug, Clone, Default)]
pub struct NegotiationAdvisor;

impl NegotiationAdvisor {
    /// Creates a new advisor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Derives negotiation targets from the best channel's net proceeds.
    ///
    /// `best_net_proceeds` is in the listing currency; `fx_to_listing` is
    /// the same rate the margin evaluator used, inverted here to bring the
    /// proceeds back into the buy-side currency.
    ///
    /// # Errors
    ///
    /// Returns a domain error on FX or arithmetic failure.
    pub fn advise(
        &self,
        current_buy_price: Money,
        quantity: u32,
        best_net_proceeds: Money,
        fx_to_listing: &FxRate,
    ) -> EvaluationResult<NegotiationSupport> {
        let to_buy_currency = fx_to_listing.invert()?;
        let proceeds = best_net_proceeds.convert(&to_buy_currency)?;

        let target_buy_price = proceeds.div_decimal(TARGET_MARGIN_DIVISOR)?.round2();
        let walk_away_price = proceeds.div_decimal(WALK_AWAY_DIVISOR)?.round2();
        let savings_per_unit = current_buy_price.safe_sub(target_buy_price)?;
        let total_savings = savings_per_unit.mul_decimal(Decimal::from(quantity))?;

        Ok(NegotiationSupport {
            target_buy_price,
            walk_away_price,
            savings_per_unit,
            total_savings,
        })
    }

    /// Returns sourcing alternatives cheaper than the current origin for
    /// this category, from the static reference table.
    ///
    /// An empty result means the current origin is already a low-cost
    /// region for the category.
    #[must_use]
    pub fn sourcing_suggestions(
        &self,
        category: ProductCategory,
        current_origin: Region,
    ) -> Vec<SourcingSuggestion> {
        let entries = sourcing_table(category);
        if entries.iter().any(|entry| entry.region == current_origin) {
            return Vec::new();
        }
        entries
            .iter()
            .map(|entry| SourcingSuggestion {
                region: entry.region,
                supplier_type: entry.supplier_type.to_string(),
                estimated_savings: Rate::from_bps(entry.savings_bps),
                note: entry.note.to_string(),
            })
            .collect()
    }

    /// True when the reference table knows a cheaper origin for this
    /// category than the current one.
    #[must_use]
    pub fn cheaper_alternative_exists(
        &self,
        category: ProductCategory,
        current_origin: Region,
    ) -> bool {
        !self.sourcing_suggestions(category, current_origin).is_empty()
    }
}

struct SourcingEntry {
    region: Region,
    supplier_type: &'static str,
    savings_bps: i64,
    note: &'static str,
}

/// Low-cost origins per category, cheapest first.
fn sourcing_table(category: ProductCategory) -> &'static [SourcingEntry] {
    match category {
        ProductCategory::Electronics => &[
            SourcingEntry {
                region: Region::China,
                supplier_type: "contract manufacturer",
                savings_bps: 3000,
                note: "Shenzhen electronics belt, high volume pricing",
            },
            SourcingEntry {
                region: Region::Taiwan,
                supplier_type: "OEM factory",
                savings_bps: 1800,
                note: "stronger QC, moderate saving",
            },
        ],
        ProductCategory::ToysGames => &[
            SourcingEntry {
                region: Region::China,
                supplier_type: "factory direct",
                savings_bps: 2800,
                note: "Guangdong toy manufacturing cluster",
            },
            SourcingEntry {
                region: Region::Vietnam,
                supplier_type: "export trading company",
                savings_bps: 2000,
                note: "lower tariff exposure than China on US-bound goods",
            },
        ],
        ProductCategory::HomeKitchen => &[
            SourcingEntry {
                region: Region::China,
                supplier_type: "factory direct",
                savings_bps: 2500,
                note: "housewares clusters in Zhejiang",
            },
            SourcingEntry {
                region: Region::India,
                supplier_type: "export house",
                savings_bps: 1800,
                note: "competitive on metal and textile housewares",
            },
        ],
        ProductCategory::SportsOutdoors => &[
            SourcingEntry {
                region: Region::Vietnam,
                supplier_type: "factory direct",
                savings_bps: 2200,
                note: "established sporting goods export base",
            },
            SourcingEntry {
                region: Region::China,
                supplier_type: "trading company",
                savings_bps: 2000,
                note: "broad catalog, fast sampling",
            },
        ],
        ProductCategory::Other => &[SourcingEntry {
            region: Region::China,
            supplier_type: "trading company",
            savings_bps: 1500,
            note: "generic cross-category sourcing",
        }],
        // Regulated or print categories have no tabled alternative.
        ProductCategory::Books | ProductCategory::Media | ProductCategory::HealthBeauty => &[],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::currency::Currency;

    fn usd(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), Currency::Usd)
    }

    mod price_targets {
        use super::*;

        #[test]
        fn documented_example() {
            // P = $143.46 -> target $114.77, walk-away $124.75.
            let support = NegotiationAdvisor::new()
                .advise(usd(13000), 100, usd(14346), &FxRate::identity(Currency::Usd))
                .unwrap();

            assert_eq!(support.target_buy_price, usd(11477));
            assert_eq!(support.walk_away_price, usd(12475));
            assert_eq!(support.savings_per_unit, usd(1523));
            assert_eq!(support.total_savings, usd(152_300));
        }

        #[test]
        fn converts_proceeds_back_to_buy_currency() {
            // Best channel nets £114.77 at USD->GBP 0.80, so $143.46 in
            // the buy currency (114.7625 / 0.8 rounds through the FX).
            let fx = FxRate::new(Currency::Usd, Currency::Gbp, Decimal::new(80, 2)).unwrap();
            let proceeds = Money::new(Decimal::new(11477, 2), Currency::Gbp);
            let support = NegotiationAdvisor::new()
                .advise(usd(13000), 50, proceeds, &fx)
                .unwrap();

            // 114.77 / 0.80 = 143.4625; / 1.25 = 114.77.
            assert_eq!(support.target_buy_price, usd(11477));
            assert_eq!(support.walk_away_price, usd(12475));
        }

        #[test]
        fn savings_can_be_negative() {
            // Asking price already below target: nothing to claw back.
            let support = NegotiationAdvisor::new()
                .advise(usd(10000), 10, usd(14346), &FxRate::identity(Currency::Usd))
                .unwrap();
            assert!(support.savings_per_unit.is_negative());
        }
    }

    mod sourcing {
        use super::*;

        #[test]
        fn electronics_from_us_suggests_asia() {
            let advisor = NegotiationAdvisor::new();
            let suggestions =
                advisor.sourcing_suggestions(ProductCategory::Electronics, Region::Us);
            assert_eq!(suggestions.len(), 2);
            assert_eq!(suggestions[0].region, Region::China);
            assert!(advisor.cheaper_alternative_exists(ProductCategory::Electronics, Region::Us));
        }

        #[test]
        fn already_low_cost_origin_has_no_suggestions() {
            let advisor = NegotiationAdvisor::new();
            assert!(advisor
                .sourcing_suggestions(ProductCategory::Electronics, Region::China)
                .is_empty());
            assert!(
                !advisor.cheaper_alternative_exists(ProductCategory::Electronics, Region::Taiwan)
            );
        }

        #[test]
        fn regulated_categories_have_no_table() {
            let advisor = NegotiationAdvisor::new();
            assert!(!advisor.cheaper_alternative_exists(ProductCategory::HealthBeauty, Region::Us));
            assert!(!advisor.cheaper_alternative_exists(ProductCategory::Books, Region::Uk));
        }
    }
}
