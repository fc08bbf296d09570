//! # HTTP Market Data Provider
//!
//! A [`MarketDataProvider`] backed by the listing aggregator's REST API.
//!
//! One GET per venue: `{base}/v1/listings/{venue}/{ean}` returning a
//! [`VenueListing`] JSON document. A 404 maps to
//! [`MarketDataError::NotFound`], which the collector treats as "this
//! venue simply does not carry the product".

use crate::domain::value_objects::channel::Marketplace;
use crate::domain::value_objects::ids::Ean;
use crate::infrastructure::market_data::error::{MarketDataError, MarketDataResult};
use crate::infrastructure::market_data::traits::{MarketDataProvider, VenueListing};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Default per-request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// REST-backed market data provider.
#[derive(Debug, Clone)]
pub struct HttpMarketDataProvider {
    client: Client,
    base_url: String,
    timeout_ms: u64,
    marketplaces: Vec<Marketplace>,
}

impl HttpMarketDataProvider {
    /// Creates a provider for all known venues with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `MarketDataError::Configuration` if the HTTP client cannot
    /// be built.
    pub fn new(base_url: impl Into<String>) -> MarketDataResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_MS)
    }

    /// Creates a provider with an explicit per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `MarketDataError::Configuration` if the HTTP client cannot
    /// be built.
    pub fn with_timeout(base_url: impl Into<String>, timeout_ms: u64) -> MarketDataResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                MarketDataError::configuration(format!("failed to build http client: {e}"))
            })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms,
            marketplaces: Marketplace::ALL.to_vec(),
        })
    }

    /// Restricts the provider to a subset of venues.
    #[must_use]
    pub fn with_marketplaces(mut self, marketplaces: Vec<Marketplace>) -> Self {
        self.marketplaces = marketplaces;
        self
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    fn listing_url(&self, ean: &Ean, marketplace: Marketplace) -> String {
        format!("{}/v1/listings/{}/{}", self.base_url, marketplace, ean)
    }

    fn map_reqwest_error(&self, error: &reqwest::Error) -> MarketDataError {
        if error.is_timeout() {
            MarketDataError::timeout("request timed out", Some(self.timeout_ms))
        } else {
            MarketDataError::http(format!("request failed: {error}"))
        }
    }
}

#[async_trait]
impl MarketDataProvider for HttpMarketDataProvider {
    fn marketplaces(&self) -> &[Marketplace] {
        &self.marketplaces
    }

    async fn fetch(&self, ean: &Ean, marketplace: Marketplace) -> MarketDataResult<VenueListing> {
        let url = self.listing_url(ean, marketplace);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(&e))?;

        match response.status() {
            status if status.is_success() => response
                .json::<VenueListing>()
                .await
                .map_err(|e| MarketDataError::deserialize(format!("bad listing payload: {e}"))),
            StatusCode::NOT_FOUND => Err(MarketDataError::not_found(marketplace, ean.as_str())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(MarketDataError::http(format!("{status}: {body}")))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ean() -> Ean {
        Ean::new("5012345678900").unwrap()
    }

    #[tokio::test]
    async fn fetches_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/listings/ebay.co.uk/5012345678900"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "price": "132.65",
                "activeListings": 40
            })))
            .mount(&server)
            .await;

        let provider = HttpMarketDataProvider::new(server.uri()).unwrap();
        let listing = provider.fetch(&ean(), Marketplace::EbayUk).await.unwrap();
        assert_eq!(listing.price, rust_decimal::Decimal::new(13265, 2));
        assert_eq!(listing.active_listings, Some(40));
    }

    #[tokio::test]
    async fn maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider = HttpMarketDataProvider::new(server.uri()).unwrap();
        let err = provider
            .fetch(&ean(), Marketplace::AmazonUs)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn maps_server_error_to_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let provider = HttpMarketDataProvider::new(server.uri()).unwrap();
        let err = provider
            .fetch(&ean(), Marketplace::AmazonUs)
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn rejects_garbage_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let provider = HttpMarketDataProvider::new(server.uri()).unwrap();
        let err = provider
            .fetch(&ean(), Marketplace::AmazonUs)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketDataError::Deserialize { .. }));
    }
}
