use rust_decimal::Decimal;
use thiserror::Error;

/// Caller contract violations.
///
/// Financial degeneracies (zero gain, truncated schedules, flat series) are
/// never reported through this type; they are absorbed into the result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("price series is empty")]
    EmptyPriceSeries,

    #[error("price series timestamps are not strictly increasing at index {index}")]
    NonMonotonicTimestamps { index: usize },

    #[error("price at index {index} is not positive: {price}")]
    NonPositivePrice { index: usize, price: Decimal },

    #[error("capital must be positive, got {0}")]
    NonPositiveCapital(Decimal),

    #[error("installment count must be at least 1")]
    InvalidInstallmentCount,

    #[error("{name} rate must not be negative, got {rate}")]
    NegativeCostRate { name: &'static str, rate: Decimal },

    #[error("commission plus slippage must stay below 100%, got {0}")]
    CostRateTooHigh(Decimal),

    #[error("risk-free rate must not be negative, got {0}")]
    NegativeRiskFreeRate(Decimal),

    #[error("trading days per month must be at least 1")]
    InvalidMonthLength,

    #[error("invalid tax schedule: {0}")]
    InvalidTaxSchedule(String),
}
