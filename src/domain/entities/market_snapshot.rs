//! # Market Snapshot
//!
//! The raw per-channel input to the engine: one venue's current price and
//! demand signals, as fetched by the external market data collaborator.
//!
//! Snapshots are read-only to the engine. Each one carries the FX rate
//! from the buy-side currency to its listing currency so the margin
//! evaluator has a single, explicit conversion point.

use crate::domain::value_objects::channel::Marketplace;
use crate::domain::value_objects::currency::FxRate;
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::rate::Rate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance of a snapshot's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Fetched from the live venue API.
    Live,
    /// Mocked for channels without a data feed.
    Mock,
    /// Derived from another channel's data.
    Estimated,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Mock => write!(f, "mock"),
            Self::Estimated => write!(f, "estimated"),
        }
    }
}

/// One venue's market state for a product at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    /// The venue this snapshot describes.
    pub marketplace: Marketplace,
    /// Current listing price in the venue's currency. For retailer
    /// channels this is the marketplace reference price the retailer
    /// price is derived from.
    pub sell_price: Money,
    /// Sales rank (BSR), when the venue exposes one.
    pub sales_rank: Option<u32>,
    /// Number of active competing listings.
    pub active_listings: Option<u32>,
    /// Number of FBA sellers on the listing.
    pub fba_seller_count: Option<u32>,
    /// Observed 90-day price stability, 1.0 = perfectly stable.
    pub price_stability: Option<Rate>,
    /// Where this snapshot came from.
    pub data_source: DataSource,
    /// FX rate from the buy-side currency to the listing currency.
    pub fx_to_listing: FxRate,
}

impl MarketSnapshot {
    /// Returns the competing seller count, preferring the FBA figure and
    /// falling back to active listings.
    #[must_use]
    pub fn competitor_count(&self) -> Option<u32> {
        self.fba_seller_count.or(self.active_listings)
    }
}
