//! # Product Categories and Size Tiers
//!
//! [`ProductCategory`] carries the per-category constants used across the
//! calculators: the sales-rank demand coefficients, marketplace referral
//! rates, media closing fees, duty defaults and reduced VAT treatments.
//! [`SizeTier`] drives the fulfillment fee table.

use crate::domain::value_objects::rate::Rate;
use crate::domain::value_objects::region::Country;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A product category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "camelCase")]
pub enum ProductCategory {
    /// Consumer electronics and accessories.
    Electronics,
    /// Home and kitchen goods.
    HomeKitchen,
    /// Toys and games.
    ToysGames,
    /// Printed books.
    Books,
    /// Music, video and other physical media.
    Media,
    /// Health and beauty products.
    HealthBeauty,
    /// Sports and outdoors equipment.
    SportsOutdoors,
    /// Anything not covered above.
    #[default]
    Other,
}

impl ProductCategory {
    /// Returns `(coefficient, exponent)` for the sales-rank demand model
    /// `monthly_sales = coefficient / rank^exponent`, calibrated to the
    /// reference market (amazon.com).
    #[must_use]
    pub const fn demand_curve(self) -> (f64, f64) {
        match self {
            Self::Electronics => (120_000.0, 0.78),
            Self::HomeKitchen => (95_000.0, 0.76),
            Self::ToysGames => (85_000.0, 0.74),
            Self::Books => (150_000.0, 0.85),
            Self::Media => (110_000.0, 0.82),
            Self::HealthBeauty => (90_000.0, 0.75),
            Self::SportsOutdoors => (70_000.0, 0.72),
            Self::Other => (80_000.0, 0.75),
        }
    }

    /// Returns the default marketplace referral rate for this category.
    #[must_use]
    pub fn referral_rate(self) -> Rate {
        match self {
            Self::Electronics => Rate::from_bps(800),
            _ => Rate::from_bps(1500),
        }
    }

    /// Returns true for media categories that attract a closing fee.
    #[inline]
    #[must_use]
    pub const fn is_media(self) -> bool {
        matches!(self, Self::Books | Self::Media)
    }

    /// Returns the multiplier applied to the baseline mock demand estimate
    /// for channels without rank or listing signals.
    #[must_use]
    pub const fn mock_demand_multiplier(self) -> f64 {
        match self {
            Self::Electronics => 1.2,
            Self::ToysGames => 1.1,
            Self::HomeKitchen | Self::HealthBeauty => 1.0,
            Self::SportsOutdoors => 0.9,
            Self::Other => 0.8,
            Self::Books => 0.7,
            Self::Media => 0.6,
        }
    }

    /// Returns the default ad-valorem duty rate for this category.
    ///
    /// Used by the category duty method when no route-specific table entry
    /// exists.
    #[must_use]
    pub fn base_duty_rate(self) -> Rate {
        match self {
            Self::Books | Self::Media => Rate::ZERO,
            Self::Electronics => Rate::from_bps(200),
            Self::SportsOutdoors => Rate::from_bps(380),
            Self::HomeKitchen => Rate::from_bps(400),
            Self::ToysGames => Rate::from_bps(450),
            Self::Other => Rate::from_bps(500),
            Self::HealthBeauty => Rate::from_bps(650),
        }
    }

    /// Returns the destination VAT rate for this category, applying reduced
    /// rates where the destination grants them (printed books, notably).
    #[must_use]
    pub fn vat_rate(self, destination: Country) -> Rate {
        if self == Self::Books {
            return match destination {
                Country::Uk => Rate::ZERO,
                Country::De => Rate::from_bps(700),
                Country::Fr => Rate::from_bps(550),
                Country::Us | Country::Au => destination.vat_rate(),
            };
        }
        destination.vat_rate()
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Electronics => "electronics",
            Self::HomeKitchen => "home-kitchen",
            Self::ToysGames => "toys-games",
            Self::Books => "books",
            Self::Media => "media",
            Self::HealthBeauty => "health-beauty",
            Self::SportsOutdoors => "sports-outdoors",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// A fulfillment size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SizeTier {
    /// Fits in an envelope; under ~0.4 kg.
    SmallStandard,
    /// Standard parcel up to ~9 kg.
    LargeStandard,
    /// Light oversize up to ~27 kg.
    SmallOversize,
    /// Everything heavier or bulkier.
    Oversize,
}

impl SizeTier {
    /// Derives a tier from the unit weight in kilograms.
    #[must_use]
    pub fn from_weight_kg(weight_kg: Decimal) -> Self {
        if weight_kg <= Decimal::new(4, 1) {
            Self::SmallStandard
        } else if weight_kg <= Decimal::new(9, 0) {
            Self::LargeStandard
        } else if weight_kg <= Decimal::new(27, 0) {
            Self::SmallOversize
        } else {
            Self::Oversize
        }
    }

    /// Returns the base fulfillment fee for this tier, denominated in the
    /// listing currency.
    #[must_use]
    pub fn base_fulfillment_fee(self) -> Decimal {
        match self {
            Self::SmallStandard => Decimal::new(322, 2),
            Self::LargeStandard => Decimal::new(475, 2),
            Self::SmallOversize => Decimal::new(973, 2),
            Self::Oversize => Decimal::new(1905, 2),
        }
    }

    /// Returns the per-kilogram surcharge above the first half kilo.
    #[must_use]
    pub fn per_kg_surcharge(self) -> Decimal {
        match self {
            Self::SmallStandard | Self::LargeStandard => Decimal::new(45, 2),
            Self::SmallOversize | Self::Oversize => Decimal::new(38, 2),
        }
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SmallStandard => "small-standard",
            Self::LargeStandard => "large-standard",
            Self::SmallOversize => "small-oversize",
            Self::Oversize => "oversize",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn electronics_demand_curve() {
        let (coefficient, exponent) = ProductCategory::Electronics.demand_curve();
        assert!((coefficient - 120_000.0).abs() < f64::EPSILON);
        assert!((exponent - 0.78).abs() < f64::EPSILON);
    }

    #[test]
    fn referral_rates() {
        assert_eq!(
            ProductCategory::Electronics.referral_rate().get(),
            Decimal::new(8, 2)
        );
        assert_eq!(
            ProductCategory::HomeKitchen.referral_rate().get(),
            Decimal::new(15, 2)
        );
    }

    #[test]
    fn media_flag() {
        assert!(ProductCategory::Books.is_media());
        assert!(ProductCategory::Media.is_media());
        assert!(!ProductCategory::Electronics.is_media());
    }

    #[test]
    fn books_vat_reduced_in_uk() {
        assert!(ProductCategory::Books.vat_rate(Country::Uk).is_zero());
        assert_eq!(
            ProductCategory::Books.vat_rate(Country::De).get(),
            Decimal::new(7, 2)
        );
        assert_eq!(
            ProductCategory::Electronics.vat_rate(Country::Uk).get(),
            Decimal::new(20, 2)
        );
    }

    #[test]
    fn size_tier_from_weight() {
        assert_eq!(
            SizeTier::from_weight_kg(Decimal::new(3, 1)),
            SizeTier::SmallStandard
        );
        assert_eq!(
            SizeTier::from_weight_kg(Decimal::new(5, 0)),
            SizeTier::LargeStandard
        );
        assert_eq!(
            SizeTier::from_weight_kg(Decimal::new(15, 0)),
            SizeTier::SmallOversize
        );
        assert_eq!(
            SizeTier::from_weight_kg(Decimal::new(40, 0)),
            SizeTier::Oversize
        );
    }
}
