use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A closing price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price {
    pub value: Decimal,
}

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    /// Number of shares a net amount buys at this price.
    pub fn shares_for(&self, amount: Decimal) -> Decimal {
        if self.value.is_zero() {
            return Decimal::ZERO;
        }
        amount / self.value
    }
}
