//! Price history providers.
//!
//! Every provider returns a chronologically ordered, duplicate-free series of
//! positive closes starting on or after the requested date, or
//! [`DataError::NotFound`] when it has nothing for the symbol.

mod cached;
mod in_memory;
mod json_file;

pub use cached::{CachedProvider, DEFAULT_TTL};
pub use in_memory::InMemoryProvider;
pub use json_file::{JsonFileProvider, PriceRecord};

use crate::error::DataError;
use async_trait::async_trait;
use chrono::NaiveDate;
use lsdca_domain::entities::PriceSeries;

/// Source of daily closing prices.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Closes for `symbol` from `start` onwards.
    ///
    /// # Errors
    /// Returns [`DataError::NotFound`] when no closes exist, or a read or
    /// parse error from the underlying source.
    async fn price_history(&self, symbol: &str, start: NaiveDate) -> Result<PriceSeries, DataError>;
}

#[async_trait]
impl<P> MarketDataProvider for std::sync::Arc<P>
where
    P: MarketDataProvider + ?Sized,
{
    async fn price_history(&self, symbol: &str, start: NaiveDate) -> Result<PriceSeries, DataError> {
        (**self).price_history(symbol, start).await
    }
}
