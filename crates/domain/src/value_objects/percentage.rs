use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fraction stored as a decimal (0.01 = 1%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    pub const ZERO: Percentage = Percentage(Decimal::ZERO);

    /// Builds a fraction from a human percentage (`0.1` -> 0.001).
    pub fn from_percent(percent: Decimal) -> Self {
        Self(percent / Decimal::ONE_HUNDRED)
    }

    /// The fraction expressed as a human percentage.
    pub fn as_percent(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    pub fn fraction(&self) -> Decimal {
        self.0
    }
}
