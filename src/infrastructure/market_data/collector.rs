//! # Snapshot Collector
//!
//! Fans out to the market data provider for every venue concurrently,
//! attaches FX rates, and assembles the [`MarketSnapshot`] slice the
//! evaluation engine consumes.
//!
//! Per-venue failures are tolerated: a venue that times out, errors or
//! has no listing is simply absent from the result. Deciding whether the
//! surviving set is sufficient is the engine's job.
//!
//! Retailer and distributor venues have no public listing API. When
//! derivation is enabled, the collector synthesizes their snapshots from
//! a marketplace snapshot in the same country, marked
//! [`DataSource::Estimated`].

use crate::domain::entities::market_snapshot::{DataSource, MarketSnapshot};
use crate::domain::value_objects::channel::{ChannelType, Marketplace};
use crate::domain::value_objects::currency::Currency;
use crate::domain::value_objects::ids::Ean;
use crate::domain::value_objects::money::Money;
use crate::infrastructure::fx::FxRateProvider;
use crate::infrastructure::market_data::error::{MarketDataError, MarketDataResult};
use crate::infrastructure::market_data::traits::{MarketDataProvider, VenueListing};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Configuration for snapshot collection.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Per-venue fetch timeout in milliseconds.
    pub per_venue_timeout_ms: u64,
    /// Whether to synthesize retailer and distributor snapshots from
    /// marketplace data.
    pub derive_offline_channels: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            per_venue_timeout_ms: 5000,
            derive_offline_channels: true,
        }
    }
}

/// Collects per-venue market snapshots concurrently.
#[derive(Debug)]
pub struct SnapshotCollector {
    provider: Arc<dyn MarketDataProvider>,
    fx: Arc<dyn FxRateProvider>,
    config: CollectorConfig,
}

impl SnapshotCollector {
    /// Creates a collector with the default configuration.
    #[must_use]
    pub fn new(provider: Arc<dyn MarketDataProvider>, fx: Arc<dyn FxRateProvider>) -> Self {
        Self::with_config(provider, fx, CollectorConfig::default())
    }

    /// Creates a collector with an explicit configuration.
    #[must_use]
    pub fn with_config(
        provider: Arc<dyn MarketDataProvider>,
        fx: Arc<dyn FxRateProvider>,
        config: CollectorConfig,
    ) -> Self {
        Self {
            provider,
            fx,
            config,
        }
    }

    /// Fetches snapshots for every venue the provider covers.
    ///
    /// The result may be empty; the engine turns an empty marketplace set
    /// into its no-market-data failure.
    ///
    /// # Errors
    ///
    /// Returns an error only when an FX rate for a surviving venue cannot
    /// be resolved at all.
    pub async fn collect(
        &self,
        ean: &Ean,
        buy_currency: Currency,
    ) -> MarketDataResult<Vec<MarketSnapshot>> {
        let venues: Vec<Marketplace> = self
            .provider
            .marketplaces()
            .iter()
            .copied()
            .filter(|venue| {
                !self.config.derive_offline_channels
                    || matches!(
                        venue.channel_type(),
                        ChannelType::Marketplace | ChannelType::PeerMarketplace
                    )
            })
            .collect();

        let per_venue = Duration::from_millis(self.config.per_venue_timeout_ms);
        let mut handles = Vec::with_capacity(venues.len());
        for venue in venues {
            let provider = Arc::clone(&self.provider);
            let ean = ean.clone();
            let handle = tokio::spawn(async move {
                let result = match timeout(per_venue, provider.fetch(&ean, venue)).await {
                    Ok(result) => result,
                    Err(_) => Err(MarketDataError::timeout(
                        format!("{venue} did not answer"),
                        Some(per_venue.as_millis() as u64),
                    )),
                };
                (venue, result)
            });
            handles.push(handle);
        }

        let mut snapshots = Vec::new();
        for joined in futures::future::join_all(handles).await {
            let Ok((venue, result)) = joined else {
                warn!("snapshot task panicked");
                continue;
            };
            match result {
                Ok(listing) => {
                    let snapshot = self
                        .build_snapshot(venue, &listing, buy_currency, DataSource::Live)
                        .await?;
                    snapshots.push(snapshot);
                }
                Err(error) if error.is_not_found() => {
                    debug!(marketplace = %venue, "no listing, skipping venue");
                }
                Err(error) => {
                    warn!(marketplace = %venue, %error, "venue fetch failed, skipping");
                }
            }
        }

        if self.config.derive_offline_channels {
            let derived = self.derive_offline_channels(&snapshots, buy_currency).await?;
            snapshots.extend(derived);
        }
        Ok(snapshots)
    }

    async fn build_snapshot(
        &self,
        venue: Marketplace,
        listing: &VenueListing,
        buy_currency: Currency,
        data_source: DataSource,
    ) -> MarketDataResult<MarketSnapshot> {
        let fx_to_listing = self.fx.rate(buy_currency, venue.currency()).await?;
        Ok(MarketSnapshot {
            marketplace: venue,
            sell_price: Money::new(listing.price, venue.currency()),
            sales_rank: listing.sales_rank,
            active_listings: listing.active_listings,
            fba_seller_count: listing.fba_seller_count,
            price_stability: listing.price_stability,
            data_source,
            fx_to_listing,
        })
    }

    /// Synthesizes retailer and distributor snapshots from a marketplace
    /// reference in the same country. The reference price is carried
    /// through unchanged; the fee calculator applies the channel's own
    /// price shaping.
    async fn derive_offline_channels(
        &self,
        collected: &[MarketSnapshot],
        buy_currency: Currency,
    ) -> MarketDataResult<Vec<MarketSnapshot>> {
        let offline = [
            Marketplace::RetailerUs,
            Marketplace::RetailerUk,
            Marketplace::DistributorUs,
            Marketplace::DistributorEu,
        ];
        let mut derived = Vec::new();
        for venue in offline {
            if collected.iter().any(|snap| snap.marketplace == venue) {
                continue;
            }
            let Some(reference) = collected.iter().find(|snap| {
                snap.marketplace.channel_type() == ChannelType::Marketplace
                    && snap.marketplace.country() == venue.country()
            }) else {
                continue;
            };
            let listing = VenueListing {
                price: reference.sell_price.amount(),
                sales_rank: None,
                active_listings: None,
                fba_seller_count: None,
                price_stability: None,
            };
            let snapshot = self
                .build_snapshot(venue, &listing, buy_currency, DataSource::Estimated)
                .await?;
            debug!(
                marketplace = %venue,
                reference = %reference.marketplace,
                "derived offline channel snapshot"
            );
            derived.push(snapshot);
        }
        Ok(derived)
    }
}
