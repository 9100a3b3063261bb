use super::MarketDataProvider;
use crate::error::DataError;
use async_trait::async_trait;
use chrono::NaiveDate;
use lsdca_domain::entities::PriceSeries;
use std::collections::HashMap;

/// Fixed set of series keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the series for a symbol (case-insensitive).
    #[must_use]
    pub fn with_series(mut self, symbol: &str, series: PriceSeries) -> Self {
        self.insert(symbol, series);
        self
    }

    pub fn insert(&mut self, symbol: &str, series: PriceSeries) {
        self.series.insert(symbol.to_uppercase(), series);
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryProvider {
    async fn price_history(&self, symbol: &str, start: NaiveDate) -> Result<PriceSeries, DataError> {
        let not_found = || DataError::NotFound {
            symbol: symbol.to_string(),
            start,
        };
        let series = self.series.get(&symbol.to_uppercase()).ok_or_else(not_found)?;
        let points: Vec<_> = series
            .points()
            .iter()
            .filter(|p| p.date >= start)
            .copied()
            .collect();
        if points.is_empty() {
            return Err(not_found());
        }
        Ok(PriceSeries::new(points)?)
    }
}
