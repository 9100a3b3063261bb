use crate::value_objects::price::Price;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Price,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: Price) -> Self {
        Self { date, close }
    }
}
