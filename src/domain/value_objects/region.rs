//! # Regions and Routes
//!
//! Supplier origin regions, destination countries, and the [`RouteKey`]
//! that keys shipping and duty assumptions.
//!
//! # Examples
//!
//! ```
//! use deal_engine::domain::value_objects::region::{Country, Region, RouteKey};
//!
//! let route = RouteKey::new(Region::China, Country::Uk);
//! assert_eq!(route.to_string(), "cn->uk");
//! ```

use crate::domain::value_objects::currency::Currency;
use crate::domain::value_objects::rate::Rate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A supplier origin region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    /// Mainland China.
    China,
    /// Vietnam.
    Vietnam,
    /// India.
    India,
    /// Taiwan.
    Taiwan,
    /// Mexico.
    Mexico,
    /// European Union.
    Eu,
    /// United Kingdom.
    Uk,
    /// United States.
    Us,
}

impl Region {
    /// Returns a short lowercase code for route keys.
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::China => "cn",
            Self::Vietnam => "vn",
            Self::India => "in",
            Self::Taiwan => "tw",
            Self::Mexico => "mx",
            Self::Eu => "eu",
            Self::Uk => "uk",
            Self::Us => "us",
        }
    }

    /// Parses a short route-key code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "cn" => Some(Self::China),
            "vn" => Some(Self::Vietnam),
            "in" => Some(Self::India),
            "tw" => Some(Self::Taiwan),
            "mx" => Some(Self::Mexico),
            "eu" => Some(Self::Eu),
            "uk" => Some(Self::Uk),
            "us" => Some(Self::Us),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A destination country where a selling channel operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Country {
    /// United States.
    Us,
    /// United Kingdom.
    Uk,
    /// Germany.
    De,
    /// France.
    Fr,
    /// Australia.
    Au,
}

impl Country {
    /// All destination countries the engine knows about.
    pub const ALL: [Self; 5] = [Self::Us, Self::Uk, Self::De, Self::Fr, Self::Au];

    /// Returns a short lowercase code for route keys.
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Uk => "uk",
            Self::De => "de",
            Self::Fr => "fr",
            Self::Au => "au",
        }
    }

    /// Parses a short route-key code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "us" => Some(Self::Us),
            "uk" => Some(Self::Uk),
            "de" => Some(Self::De),
            "fr" => Some(Self::Fr),
            "au" => Some(Self::Au),
            _ => None,
        }
    }

    /// Returns the local settlement currency.
    #[inline]
    #[must_use]
    pub const fn currency(self) -> Currency {
        match self {
            Self::Us => Currency::Usd,
            Self::Uk => Currency::Gbp,
            Self::De | Self::Fr => Currency::Eur,
            Self::Au => Currency::Aud,
        }
    }

    /// Returns the standard destination VAT/GST rate.
    ///
    /// The US has no federal VAT; sales tax is marketplace-collected and
    /// outside the seller's proceeds, so it is modelled as zero here.
    #[must_use]
    pub fn vat_rate(self) -> Rate {
        match self {
            Self::Us => Rate::ZERO,
            Self::Uk | Self::Fr => Rate::from_bps(2000),
            Self::De => Rate::from_bps(1900),
            Self::Au => Rate::from_bps(1000),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A shipping/duty route from an origin region to a destination country.
///
/// Serialized as its `"cn->uk"` display form so it can key JSON maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RouteKey {
    /// Origin region.
    pub origin: Region,
    /// Destination country.
    pub destination: Country,
}

impl RouteKey {
    /// Creates a new route key.
    #[must_use]
    pub const fn new(origin: Region, destination: Country) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.origin, self.destination)
    }
}

impl From<RouteKey> for String {
    fn from(route: RouteKey) -> Self {
        route.to_string()
    }
}

impl TryFrom<String> for RouteKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (origin, destination) = value
            .split_once("->")
            .ok_or_else(|| format!("malformed route key: {value}"))?;
        let origin =
            Region::from_code(origin).ok_or_else(|| format!("unknown origin region: {origin}"))?;
        let destination = Country::from_code(destination)
            .ok_or_else(|| format!("unknown destination country: {destination}"))?;
        Ok(Self {
            origin,
            destination,
        })
    }
}
