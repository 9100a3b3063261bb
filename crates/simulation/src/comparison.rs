//! Head-to-head comparison of two simulation results.

use lsdca_domain::enums::StrategyKind;
use lsdca_domain::value_objects::simulation_result::SimulationResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which of the two compared results came out ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    First,
    Second,
}

/// Differences are always `first - second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub first: StrategyKind,
    pub second: StrategyKind,
    pub winner: Winner,
    pub rentability_difference: Decimal,
    pub net_value_difference: Decimal,
    /// Commissions, slippage and tax.
    pub cost_difference: Decimal,
    pub drawdown_difference: Decimal,
    pub operation_difference: i64,
}

impl StrategyComparison {
    /// Strategy of the winning result.
    #[must_use]
    pub fn winning_strategy(&self) -> StrategyKind {
        match self.winner {
            Winner::First => self.first,
            Winner::Second => self.second,
        }
    }

    /// Absolute rentability gap between the two.
    #[must_use]
    pub fn margin(&self) -> Decimal {
        self.rentability_difference.abs()
    }
}

/// Compares two results by rentability.
///
/// `first` wins only if its rentability is strictly greater.
#[must_use]
pub fn compare(first: &SimulationResult, second: &SimulationResult) -> StrategyComparison {
    let winner = if first.rentability > second.rentability {
        Winner::First
    } else {
        Winner::Second
    };
    StrategyComparison {
        first: first.strategy,
        second: second.strategy,
        winner,
        rentability_difference: first.rentability - second.rentability,
        net_value_difference: first.net_value - second.net_value,
        cost_difference: first.total_costs() - second.total_costs(),
        drawdown_difference: first.drawdown.max_drawdown - second.drawdown.max_drawdown,
        operation_difference: i64::from(first.operation_count) - i64::from(second.operation_count),
    }
}
