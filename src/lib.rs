//! # Deal Engine
//!
//! A deal evaluation engine for cross-border e-commerce arbitrage.
//!
//! Given a supplier offer (barcode, quantity, unit price, origin), the
//! engine evaluates resale across marketplace, peer-marketplace, retailer
//! and distributor channels: it computes the landed cost per destination,
//! itemizes each channel's selling fees, converts currencies at a single
//! explicit point, estimates demand and absorption, plans an inventory
//! allocation, and condenses everything into a 0-100 score with a
//! Buy / Renegotiate / Source Elsewhere / Pass decision. Renegotiation
//! targets and alternative sourcing suggestions ride along when the
//! decision calls for them.
//!
//! # Architecture
//!
//! - `domain` - value objects (money, rates, routes, venues) and the
//!   entities the evaluation produces
//! - `application` - the pure calculators and the orchestrating
//!   [`DealEvaluationEngine`](application::services::DealEvaluationEngine)
//! - `infrastructure` - market data collection, FX providers,
//!   persistence adapters and deployment settings
//!
//! The engine itself is synchronous and deterministic; all I/O lives in
//! the infrastructure collaborators that feed it.
//!
//! # Examples
//!
//! ```
//! use deal_engine::application::services::evaluation::{
//!     DealEvaluationEngine, EvaluationRequest,
//! };
//! use deal_engine::domain::entities::assumption_set::ShippingMethod;
//! use deal_engine::domain::entities::market_snapshot::{DataSource, MarketSnapshot};
//! use deal_engine::domain::value_objects::category::ProductCategory;
//! use deal_engine::domain::value_objects::channel::Marketplace;
//! use deal_engine::domain::value_objects::currency::{Currency, FxRate};
//! use deal_engine::domain::value_objects::ids::Ean;
//! use deal_engine::domain::value_objects::money::Money;
//! use deal_engine::domain::value_objects::region::Region;
//! use rust_decimal::Decimal;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = EvaluationRequest {
//!     ean: Ean::new("5012345678900")?,
//!     quantity: 100,
//!     buy_price: Decimal::new(10000, 2),
//!     currency: Currency::Usd,
//!     supplier_region: Region::China,
//!     hs_code: Some("85171200".to_string()),
//!     product_category: Some(ProductCategory::Electronics),
//!     weight_kg: Some(Decimal::new(20, 1)),
//!     shipping_method: ShippingMethod::Air,
//!     reclaim_vat: true,
//!     listing_prices: None,
//!     assumption_overrides: None,
//! };
//!
//! let snapshot = MarketSnapshot {
//!     marketplace: Marketplace::EbayUk,
//!     sell_price: Money::new(Decimal::new(13265, 2), Currency::Gbp),
//!     sales_rank: None,
//!     active_listings: Some(40),
//!     fba_seller_count: None,
//!     price_stability: None,
//!     data_source: DataSource::Live,
//!     fx_to_listing: FxRate::new(Currency::Usd, Currency::Gbp, Decimal::new(80, 2))?,
//! };
//!
//! let engine = DealEvaluationEngine::new();
//! let evaluation = engine.evaluate(&request, &[snapshot])?;
//! println!("{}: {}", evaluation.score.overall, evaluation.decision);
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use application::services::evaluation::{DealEvaluationEngine, EvaluationRequest};
pub use application::{EvaluationError, EvaluationResult};
pub use domain::entities::deal_evaluation::DealEvaluation;
pub use domain::errors::{DomainError, DomainResult};
