//! # FX Rate Providers
//!
//! Port and adapters for buy-to-listing currency conversion rates.
//!
//! The [`SnapshotCollector`](crate::infrastructure::market_data::collector::SnapshotCollector)
//! asks an [`FxRateProvider`] for one rate per listing currency and pins
//! it into each snapshot, so a whole evaluation sees a consistent rate
//! even if the market moves mid-collection.
//!
//! [`StaticFxProvider`] serves a fixed reference table (also the fallback
//! when a live feed fails); [`CachingFxProvider`] wraps any provider with
//! a TTL cache so repeated evaluations do not hammer the feed.

use crate::domain::value_objects::currency::{Currency, FxRate};
use crate::infrastructure::market_data::error::{MarketDataError, MarketDataResult};
use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Default cache TTL: one hour.
const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Trait defining the interface for FX rate sources.
#[async_trait]
pub trait FxRateProvider: Send + Sync + fmt::Debug {
    /// Returns the current rate converting `from` into `to`.
    ///
    /// # Errors
    ///
    /// Returns a market data error if the pair is unknown or the feed is
    /// unreachable.
    async fn rate(&self, from: Currency, to: Currency) -> MarketDataResult<FxRate>;
}

/// Units of each currency one US dollar buys, reference table.
fn per_usd(currency: Currency) -> Decimal {
    match currency {
        Currency::Usd => Decimal::ONE,
        Currency::Gbp => Decimal::new(80, 2),
        Currency::Eur => Decimal::new(92, 2),
        Currency::Aud => Decimal::new(152, 2),
        Currency::Cad => Decimal::new(136, 2),
        Currency::Jpy => Decimal::new(14800, 2),
        Currency::Cny => Decimal::new(720, 2),
    }
}

/// Computes a cross rate through USD from the reference table.
///
/// # Errors
///
/// Returns a domain error only if the computed rate is non-positive,
/// which the table rules out.
pub fn static_rate(from: Currency, to: Currency) -> MarketDataResult<FxRate> {
    if from == to {
        return Ok(FxRate::identity(from));
    }
    let rate = (per_usd(to) / per_usd(from)).round_dp(6);
    FxRate::new(from, to, rate)
        .map_err(|e| MarketDataError::configuration(format!("bad static fx rate: {e}")))
}

/// FX provider serving the fixed reference table.
#[derive(Debug, Clone, Default)]
pub struct StaticFxProvider;

impl StaticFxProvider {
    /// Creates a new static provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FxRateProvider for StaticFxProvider {
    async fn rate(&self, from: Currency, to: Currency) -> MarketDataResult<FxRate> {
        static_rate(from, to)
    }
}

struct CachedRate {
    rate: FxRate,
    fetched_at: Instant,
}

/// TTL cache over another FX provider, with static-table fallback.
///
/// When the inner provider fails, the last cached rate is served even if
/// stale; with no cached rate the static table stands in, with a warning.
pub struct CachingFxProvider {
    inner: Arc<dyn FxRateProvider>,
    cache: DashMap<(Currency, Currency), CachedRate>,
    ttl: Duration,
}

impl fmt::Debug for CachingFxProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingFxProvider")
            .field("ttl", &self.ttl)
            .field("cached_pairs", &self.cache.len())
            .finish()
    }
}

impl CachingFxProvider {
    /// Wraps a provider with the default one-hour TTL.
    #[must_use]
    pub fn new(inner: Arc<dyn FxRateProvider>) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    /// Wraps a provider with an explicit TTL.
    #[must_use]
    pub fn with_ttl(inner: Arc<dyn FxRateProvider>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
            ttl,
        }
    }

    fn cached(&self, pair: (Currency, Currency), max_age: Option<Duration>) -> Option<FxRate> {
        let entry = self.cache.get(&pair)?;
        match max_age {
            Some(limit) if entry.fetched_at.elapsed() > limit => None,
            _ => Some(entry.rate),
        }
    }
}

#[async_trait]
impl FxRateProvider for CachingFxProvider {
    async fn rate(&self, from: Currency, to: Currency) -> MarketDataResult<FxRate> {
        let pair = (from, to);
        if let Some(rate) = self.cached(pair, Some(self.ttl)) {
            return Ok(rate);
        }
        match self.inner.rate(from, to).await {
            Ok(rate) => {
                self.cache.insert(
                    pair,
                    CachedRate {
                        rate,
                        fetched_at: Instant::now(),
                    },
                );
                Ok(rate)
            }
            Err(error) => {
                // Stale beats absent; the static table beats nothing.
                if let Some(stale) = self.cached(pair, None) {
                    warn!(%from, %to, %error, "fx feed failed, serving stale rate");
                    return Ok(stale);
                }
                warn!(%from, %to, %error, "fx feed failed, serving static fallback");
                static_rate(from, to)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn static_table_usd_gbp() {
        let rate = static_rate(Currency::Usd, Currency::Gbp).unwrap();
        assert_eq!(rate.rate(), Decimal::new(80, 2));
    }

    #[test]
    fn static_cross_rate_through_usd() {
        // GBP -> EUR = 0.92 / 0.80 = 1.15.
        let rate = static_rate(Currency::Gbp, Currency::Eur).unwrap();
        assert_eq!(rate.rate(), Decimal::new(115, 2));
    }

    #[test]
    fn identity_pair() {
        let rate = static_rate(Currency::Eur, Currency::Eur).unwrap();
        assert_eq!(rate.rate(), Decimal::ONE);
    }

    #[derive(Debug)]
    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl FxRateProvider for CountingProvider {
        async fn rate(&self, from: Currency, to: Currency) -> MarketDataResult<FxRate> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(MarketDataError::http("feed down"))
            } else {
                static_rate(from, to)
            }
        }
    }

    #[tokio::test]
    async fn caches_within_ttl() {
        let inner = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let provider = CachingFxProvider::new(Arc::clone(&inner) as Arc<dyn FxRateProvider>);

        let first = provider.rate(Currency::Usd, Currency::Gbp).await.unwrap();
        let second = provider.rate(Currency::Usd, Currency::Gbp).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn falls_back_to_static_table() {
        let inner = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let provider = CachingFxProvider::new(inner as Arc<dyn FxRateProvider>);

        let rate = provider.rate(Currency::Usd, Currency::Aud).await.unwrap();
        assert_eq!(rate.rate(), Decimal::new(152, 2));
    }
}
