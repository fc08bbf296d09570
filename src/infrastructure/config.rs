//! # Engine Settings
//!
//! Deployment configuration for the collaborators around the engine,
//! loaded from environment variables with sensible defaults.
//!
//! Variables use the `DEAL_ENGINE_` prefix with `__` separating levels,
//! e.g. `DEAL_ENGINE_MARKET_DATA__TIMEOUT_MS=8000`.
//!
//! # Examples
//!
//! ```
//! use deal_engine::infrastructure::config::EngineSettings;
//!
//! let settings = EngineSettings::load().unwrap_or_default();
//! assert!(settings.market_data.timeout_ms > 0);
//! ```

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Market data collaborator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketDataSettings {
    /// Listing aggregator base URL.
    pub base_url: String,
    /// Per-request HTTP timeout in milliseconds.
    pub timeout_ms: u64,
    /// Per-venue collection timeout in milliseconds.
    pub per_venue_timeout_ms: u64,
    /// Whether to synthesize retailer and distributor snapshots.
    pub derive_offline_channels: bool,
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: 5000,
            per_venue_timeout_ms: 5000,
            derive_offline_channels: true,
        }
    }
}

/// FX collaborator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FxSettings {
    /// Rate cache TTL in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for FxSettings {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 3600,
        }
    }
}

/// Top-level engine settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Market data collaborator settings.
    pub market_data: MarketDataSettings,
    /// FX collaborator settings.
    pub fx: FxSettings,
    /// Assumption defaults version to seed stores with.
    pub assumption_version: Option<u32>,
}

impl EngineSettings {
    /// Loads settings from `DEAL_ENGINE_`-prefixed environment variables,
    /// falling back to the defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a variable is present but unparsable.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("DEAL_ENGINE").separator("__"))
            .build()?
            .try_deserialize()
    }
}
