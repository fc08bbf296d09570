//! Market data collection: provider port, HTTP adapter and the
//! concurrent snapshot collector.

pub mod collector;
pub mod error;
pub mod http_provider;
pub mod traits;

pub use collector::{CollectorConfig, SnapshotCollector};
pub use error::{MarketDataError, MarketDataResult};
pub use http_provider::HttpMarketDataProvider;
pub use traits::{MarketDataProvider, VenueListing};
