//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Numeric Types
//!
//! - [`Money`]: decimal amount tagged with its currency, checked arithmetic
//! - [`Rate`]: fractional value in `[0, 1]` with clamping and strict modes
//! - [`FxRate`]: directional exchange rate
//!
//! ## Identity Types
//!
//! - [`DealId`]: UUID-based evaluation identifier
//! - [`Ean`]: validated product barcode
//!
//! ## Domain Enums
//!
//! - [`ChannelType`] / [`Marketplace`]: selling channel taxonomy
//! - [`Region`] / [`Country`] / [`RouteKey`]: sourcing geography
//! - [`ProductCategory`] / [`SizeTier`]: product taxonomy constants
//! - [`ConfidenceLevel`], [`ChannelRecommendation`], [`DealDecision`]

pub mod arithmetic;
pub mod category;
pub mod channel;
pub mod confidence;
pub mod currency;
pub mod decision;
pub mod ids;
pub mod money;
pub mod rate;
pub mod region;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic};
pub use category::{ProductCategory, SizeTier};
pub use channel::{ChannelType, Marketplace};
pub use confidence::ConfidenceLevel;
pub use currency::{Currency, FxRate};
pub use decision::{ChannelRecommendation, DealDecision};
pub use ids::{DealId, Ean};
pub use money::Money;
pub use rate::Rate;
pub use region::{Country, Region, RouteKey};
