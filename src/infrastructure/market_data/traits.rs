//! # Market Data Provider Port
//!
//! Port definition for the market data collaborator.
//!
//! A provider answers one question: what does venue X currently show for
//! barcode Y? The answer is a raw [`VenueListing`] in the venue's own
//! currency; the [`SnapshotCollector`](super::collector::SnapshotCollector)
//! attaches FX and provenance to turn it into a
//! [`MarketSnapshot`](crate::domain::entities::market_snapshot::MarketSnapshot).

use crate::domain::value_objects::channel::Marketplace;
use crate::domain::value_objects::ids::Ean;
use crate::domain::value_objects::rate::Rate;
use crate::infrastructure::market_data::error::MarketDataResult;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One venue's raw listing data, as the venue's API reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueListing {
    /// Current listing price in the venue's currency.
    pub price: Decimal,
    /// Sales rank, when the venue exposes one.
    #[serde(default)]
    pub sales_rank: Option<u32>,
    /// Number of active competing listings.
    #[serde(default)]
    pub active_listings: Option<u32>,
    /// Number of FBA sellers on the listing.
    #[serde(default)]
    pub fba_seller_count: Option<u32>,
    /// Observed 90-day price stability, 1.0 = perfectly stable.
    #[serde(default)]
    pub price_stability: Option<Rate>,
}

/// Trait defining the interface for market data providers.
///
/// Implementations wrap a venue API (or a fixture set, in tests) and map
/// venue-specific failures onto
/// [`MarketDataError`](super::error::MarketDataError) variants.
#[async_trait]
pub trait MarketDataProvider: Send + Sync + fmt::Debug {
    /// The venues this provider can answer for.
    fn marketplaces(&self) -> &[Marketplace];

    /// Fetches the current listing for one venue.
    ///
    /// # Errors
    ///
    /// - `MarketDataError::NotFound` - the venue has no listing
    /// - `MarketDataError::Http` / `Timeout` - transport failure
    /// - `MarketDataError::Deserialize` - unparsable response
    async fn fetch(&self, ean: &Ean, marketplace: Marketplace) -> MarketDataResult<VenueListing>;
}
