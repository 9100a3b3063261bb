//! Validated, chronologically ordered closing prices.
//!
//! Index position is the unit of "trading day": the simulation never looks at
//! calendar gaps except to measure elapsed time for CAGR.

use crate::entities::price_candle::PricePoint;
use crate::error::DomainError;
use crate::metrics::growth::DAYS_PER_YEAR;
use crate::value_objects::price::Price;
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An immutable, non-empty series of positive closes with strictly
/// increasing dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a series, rejecting empty, unordered or non-positive input.
    ///
    /// # Errors
    /// Returns the first precondition the points violate.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, DomainError> {
        if points.is_empty() {
            return Err(DomainError::EmptyPriceSeries);
        }
        for (index, point) in points.iter().enumerate() {
            if !point.close.is_positive() {
                return Err(DomainError::NonPositivePrice {
                    index,
                    price: point.close.value,
                });
            }
            if index > 0 && point.date <= points[index - 1].date {
                return Err(DomainError::NonMonotonicTimestamps { index });
            }
        }
        Ok(Self { points })
    }

    /// Builds a series of consecutive calendar days starting at `start`.
    ///
    /// # Errors
    /// Same as [`PriceSeries::new`]; also rejects dates past the calendar range.
    pub fn from_daily_closes(start: NaiveDate, closes: &[Decimal]) -> Result<Self, DomainError> {
        let mut points = Vec::with_capacity(closes.len());
        for (offset, close) in closes.iter().enumerate() {
            let date = start
                .checked_add_days(Days::new(offset as u64))
                .ok_or(DomainError::NonMonotonicTimestamps { index: offset })?;
            points.push(PricePoint::new(date, Price::new(*close)));
        }
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for the `len` convention.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    pub fn closes(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.points.iter().map(|p| p.close.value)
    }

    /// Calendar days between the first and last close.
    pub fn elapsed_days(&self) -> i64 {
        (self.last().date - self.first().date).num_days()
    }

    /// Elapsed time in years of 365.25 days.
    pub fn elapsed_years(&self) -> f64 {
        self.elapsed_days() as f64 / DAYS_PER_YEAR
    }

    /// The first `len` points (the whole series when `len` exceeds it).
    ///
    /// A zero `len` still keeps the first point so the result stays valid.
    pub fn head(&self, len: usize) -> PriceSeries {
        let len = len.clamp(1, self.points.len());
        PriceSeries {
            points: self.points[..len].to_vec(),
        }
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = DomainError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rejects_empty_series() {
        assert_eq!(PriceSeries::new(vec![]), Err(DomainError::EmptyPriceSeries));
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let points = vec![
            PricePoint::new(date(2024, 1, 1), Price::new(dec!(10))),
            PricePoint::new(date(2024, 1, 2), Price::new(dec!(0))),
        ];
        assert_eq!(
            PriceSeries::new(points),
            Err(DomainError::NonPositivePrice {
                index: 1,
                price: dec!(0)
            })
        );
    }

    #[test]
    fn test_rejects_unordered_or_duplicate_dates() {
        let points = vec![
            PricePoint::new(date(2024, 1, 2), Price::new(dec!(10))),
            PricePoint::new(date(2024, 1, 2), Price::new(dec!(11))),
        ];
        assert_eq!(
            PriceSeries::new(points),
            Err(DomainError::NonMonotonicTimestamps { index: 1 })
        );
    }

    #[test]
    fn test_daily_closes_and_elapsed_time() {
        let closes = vec![dec!(100); 366];
        let series = PriceSeries::from_daily_closes(date(2023, 1, 1), &closes).unwrap();
        assert_eq!(series.len(), 366);
        assert_eq!(series.elapsed_days(), 365);
        assert!((series.elapsed_years() - 365.0 / 365.25).abs() < 1e-12);
        assert_eq!(series.last().date, date(2024, 1, 1));
    }

    #[test]
    fn test_head_clamps() {
        let closes = vec![dec!(1), dec!(2), dec!(3)];
        let series = PriceSeries::from_daily_closes(date(2024, 1, 1), &closes).unwrap();
        assert_eq!(series.head(2).len(), 2);
        assert_eq!(series.head(10).len(), 3);
        assert_eq!(series.head(0).len(), 1);
    }
}
