//! Price histories stored as one JSON file per symbol.

use super::MarketDataProvider;
use crate::error::DataError;
use async_trait::async_trait;
use chrono::NaiveDate;
use lsdca_domain::entities::{PricePoint, PriceSeries};
use lsdca_domain::value_objects::price::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One row of a price file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// Reads `<dir>/<SYMBOL>.json` holding `[{"date": "YYYY-MM-DD", "close": 1.0}, ...]`.
///
/// Rows may be unordered and may contain gaps. Rows before the start date,
/// non-positive closes and repeated dates (first one wins) are dropped.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    dir: PathBuf,
}

impl JsonFileProvider {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File holding the closes for a symbol.
    #[must_use]
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.json", symbol.to_uppercase()))
    }

    /// Writes records in the format this provider reads.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub async fn store(&self, symbol: &str, records: &[PriceRecord]) -> Result<PathBuf, DataError> {
        let path = self.path_for(symbol);
        let json = serde_json::to_string_pretty(records).map_err(|source| DataError::Parse {
            path: path.clone(),
            source,
        })?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|source| DataError::Io {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

/// Turns raw rows into the points of a valid series.
fn clean(mut records: Vec<PriceRecord>, start: NaiveDate, path: &Path) -> Vec<PricePoint> {
    let total = records.len();
    records.retain(|r| r.date >= start);
    let in_range = records.len();
    records.retain(|r| r.close > Decimal::ZERO);
    if records.len() < in_range {
        warn!(
            path = %path.display(),
            dropped = in_range - records.len(),
            "dropping non-positive closes"
        );
    }
    records.sort_by_key(|r| r.date);
    records.dedup_by_key(|r| r.date);
    debug!(path = %path.display(), total, kept = records.len(), "price file loaded");
    records
        .into_iter()
        .map(|r| PricePoint::new(r.date, Price::new(r.close)))
        .collect()
}

#[async_trait]
impl MarketDataProvider for JsonFileProvider {
    async fn price_history(&self, symbol: &str, start: NaiveDate) -> Result<PriceSeries, DataError> {
        let path = self.path_for(symbol);
        let not_found = || DataError::NotFound {
            symbol: symbol.to_string(),
            start,
        };

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(source) => return Err(DataError::Io { path, source }),
        };
        let records: Vec<PriceRecord> =
            serde_json::from_str(&contents).map_err(|source| DataError::Parse {
                path: path.clone(),
                source,
            })?;

        let points = clean(records, start, &path);
        if points.is_empty() {
            return Err(not_found());
        }
        Ok(PriceSeries::new(points)?)
    }
}
