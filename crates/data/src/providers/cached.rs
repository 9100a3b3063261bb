//! Time-to-live cache in front of another provider.

use super::MarketDataProvider;
use crate::error::DataError;
use async_trait::async_trait;
use chrono::NaiveDate;
use lsdca_domain::entities::PriceSeries;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// One hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct CacheEntry {
    series: PriceSeries,
    fetched_at: Instant,
}

/// Caches successful lookups per `(symbol, start)` for a fixed duration.
///
/// Errors are never cached.
#[derive(Debug, Clone)]
pub struct CachedProvider<P> {
    inner: P,
    ttl: Duration,
    entries: Arc<RwLock<HashMap<(String, NaiveDate), CacheEntry>>>,
}

impl<P> CachedProvider<P> {
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    #[must_use]
    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Drops every cached series.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of cached series, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl<P> MarketDataProvider for CachedProvider<P>
where
    P: MarketDataProvider,
{
    async fn price_history(&self, symbol: &str, start: NaiveDate) -> Result<PriceSeries, DataError> {
        let key = (symbol.to_uppercase(), start);
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&key) {
                if entry.fetched_at.elapsed() < self.ttl {
                    debug!(symbol, %start, "price cache hit");
                    return Ok(entry.series.clone());
                }
            }
        }

        debug!(symbol, %start, "price cache miss");
        let series = self.inner.price_history(symbol, start).await?;
        self.entries.write().await.insert(
            key,
            CacheEntry {
                series: series.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(series)
    }
}
