//! # Channels and Marketplaces
//!
//! The engine evaluates four channel shapes behind one result contract:
//! marketplaces (Amazon-like), peer marketplaces (eBay-like), retailers
//! and distributors. The [`ChannelType`] tag selects the fee formula; a
//! [`Marketplace`] pins a concrete venue to a destination country,
//! currency and relative market size.
//!
//! # Examples
//!
//! ```
//! use deal_engine::domain::value_objects::channel::{ChannelType, Marketplace};
//!
//! assert_eq!(Marketplace::EbayUk.channel_type(), ChannelType::PeerMarketplace);
//! assert_eq!(Marketplace::AmazonUs.size_factor(), 1.0);
//! ```

use crate::domain::value_objects::currency::Currency;
use crate::domain::value_objects::region::Country;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape of a selling channel, selecting its fee formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChannelType {
    /// Amazon-like marketplace: referral + fulfillment + closing fees.
    Marketplace,
    /// eBay-like peer marketplace: final-value + per-order fees.
    PeerMarketplace,
    /// Retail partner: commission + payment fee on a discounted price.
    Retailer,
    /// Wholesale distributor: buys at a percentage of reference price.
    Distributor,
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marketplace => write!(f, "marketplace"),
            Self::PeerMarketplace => write!(f, "peer-marketplace"),
            Self::Retailer => write!(f, "retailer"),
            Self::Distributor => write!(f, "distributor"),
        }
    }
}

/// A concrete selling venue in a destination market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Marketplace {
    /// amazon.com (reference market).
    AmazonUs,
    /// amazon.co.uk.
    AmazonUk,
    /// amazon.de.
    AmazonDe,
    /// amazon.fr.
    AmazonFr,
    /// amazon.com.au.
    AmazonAu,
    /// ebay.com.
    EbayUs,
    /// ebay.co.uk.
    EbayUk,
    /// US retail partner network.
    RetailerUs,
    /// UK retail partner network.
    RetailerUk,
    /// US wholesale distributor.
    DistributorUs,
    /// EU wholesale distributor.
    DistributorEu,
}

impl Marketplace {
    /// All venues the engine can evaluate.
    pub const ALL: [Self; 11] = [
        Self::AmazonUs,
        Self::AmazonUk,
        Self::AmazonDe,
        Self::AmazonFr,
        Self::AmazonAu,
        Self::EbayUs,
        Self::EbayUk,
        Self::RetailerUs,
        Self::RetailerUk,
        Self::DistributorUs,
        Self::DistributorEu,
    ];

    /// Returns the channel type of this venue.
    #[must_use]
    pub const fn channel_type(self) -> ChannelType {
        match self {
            Self::AmazonUs | Self::AmazonUk | Self::AmazonDe | Self::AmazonFr | Self::AmazonAu => {
                ChannelType::Marketplace
            }
            Self::EbayUs | Self::EbayUk => ChannelType::PeerMarketplace,
            Self::RetailerUs | Self::RetailerUk => ChannelType::Retailer,
            Self::DistributorUs | Self::DistributorEu => ChannelType::Distributor,
        }
    }

    /// Returns the destination country of this venue.
    #[must_use]
    pub const fn country(self) -> Country {
        match self {
            Self::AmazonUs | Self::EbayUs | Self::RetailerUs | Self::DistributorUs => Country::Us,
            Self::AmazonUk | Self::EbayUk | Self::RetailerUk => Country::Uk,
            Self::AmazonDe | Self::DistributorEu => Country::De,
            Self::AmazonFr => Country::Fr,
            Self::AmazonAu => Country::Au,
        }
    }

    /// Returns the listing currency of this venue.
    #[inline]
    #[must_use]
    pub const fn currency(self) -> Currency {
        self.country().currency()
    }

    /// Returns the market size factor relative to amazon.com (= 1.00),
    /// used to scale the sales-rank demand model.
    #[must_use]
    pub const fn size_factor(self) -> f64 {
        match self {
            Self::AmazonUs => 1.00,
            Self::EbayUs => 0.45,
            Self::AmazonUk => 0.35,
            Self::AmazonDe => 0.30,
            Self::EbayUk => 0.20,
            Self::AmazonFr => 0.18,
            Self::RetailerUs => 0.10,
            Self::AmazonAu => 0.08,
            Self::RetailerUk => 0.06,
            Self::DistributorUs | Self::DistributorEu => 0.05,
        }
    }

    /// Returns the venue's domain-style code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::AmazonUs => "amazon.com",
            Self::AmazonUk => "amazon.co.uk",
            Self::AmazonDe => "amazon.de",
            Self::AmazonFr => "amazon.fr",
            Self::AmazonAu => "amazon.com.au",
            Self::EbayUs => "ebay.com",
            Self::EbayUk => "ebay.co.uk",
            Self::RetailerUs => "retail.us",
            Self::RetailerUk => "retail.uk",
            Self::DistributorUs => "distributor.us",
            Self::DistributorEu => "distributor.eu",
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
