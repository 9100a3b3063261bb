use crate::error::DomainError;
use crate::value_objects::percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Commission and slippage applied to every buy and to the final sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostParameters {
    /// Fraction of transaction value paid as commission.
    pub commission_rate: Percentage,
    /// Fraction of transaction value lost to slippage.
    pub slippage_rate: Percentage,
}

/// Cost split of a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionCost {
    pub commission: Decimal,
    pub slippage: Decimal,
}

impl TransactionCost {
    pub fn total(&self) -> Decimal {
        self.commission + self.slippage
    }
}

impl CostParameters {
    /// Creates validated cost parameters.
    ///
    /// # Errors
    /// Returns an error if either rate is negative or their sum reaches 100%.
    pub fn new(commission_rate: Percentage, slippage_rate: Percentage) -> Result<Self, DomainError> {
        let costs = Self {
            commission_rate,
            slippage_rate,
        };
        costs.validate()?;
        Ok(costs)
    }

    /// No commission, no slippage.
    #[must_use]
    pub fn frictionless() -> Self {
        Self::default()
    }

    /// Checks the rate invariants.
    ///
    /// # Errors
    /// Returns an error if either rate is negative or their sum reaches 100%.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.commission_rate.fraction() < Decimal::ZERO {
            return Err(DomainError::NegativeCostRate {
                name: "commission",
                rate: self.commission_rate.fraction(),
            });
        }
        if self.slippage_rate.fraction() < Decimal::ZERO {
            return Err(DomainError::NegativeCostRate {
                name: "slippage",
                rate: self.slippage_rate.fraction(),
            });
        }
        let combined = self.combined_rate();
        if combined >= Decimal::ONE {
            return Err(DomainError::CostRateTooHigh(combined));
        }
        Ok(())
    }

    /// Commission plus slippage as a single fraction.
    #[must_use]
    pub fn combined_rate(&self) -> Decimal {
        self.commission_rate.fraction() + self.slippage_rate.fraction()
    }

    /// Costs charged on a transaction of the given value.
    #[must_use]
    pub fn cost_of(&self, value: Decimal) -> TransactionCost {
        TransactionCost {
            commission: value * self.commission_rate.fraction(),
            slippage: value * self.slippage_rate.fraction(),
        }
    }

    /// Value left after paying costs on it.
    #[must_use]
    pub fn net_of_costs(&self, value: Decimal) -> (Decimal, TransactionCost) {
        let cost = self.cost_of(value);
        (value - cost.total(), cost)
    }
}
