//! Market data access.
//!
//! Price histories come from a [`providers::MarketDataProvider`]; the
//! simulation crates only ever see the validated `PriceSeries` it returns.

pub mod error;
pub mod providers;

pub use error::DataError;
pub use providers::{CachedProvider, InMemoryProvider, JsonFileProvider, MarketDataProvider};
