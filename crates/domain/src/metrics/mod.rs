//! Risk and return metrics over value time series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod drawdown;
pub mod growth;

pub use drawdown::{DrawdownReport, max_drawdown};
pub use growth::{cagr, simple_return};

/// A dated portfolio value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuePoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

impl ValuePoint {
    pub fn new(date: NaiveDate, value: Decimal) -> Self {
        Self { date, value }
    }
}
