use serde::{Deserialize, Serialize};
use std::fmt;

/// Which execution strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Whole capital deployed on the first trading day.
    LumpSum,
    /// Capital held upfront, deployed in installments, idle cash earns interest.
    DcaFunded,
    /// Installments arrive as external contributions, no idle cash.
    DcaContributory,
}

impl StrategyKind {
    /// Short human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::LumpSum => "Lump Sum",
            StrategyKind::DcaFunded => "DCA (pre-funded)",
            StrategyKind::DcaContributory => "DCA (periodic contributions)",
        }
    }

    /// Whether the strategy buys in more than one installment.
    #[must_use]
    pub fn is_dca(&self) -> bool {
        !matches!(self, StrategyKind::LumpSum)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// When inside each month an installment is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContributionTiming {
    /// First trading day of the month: installment `i` at `i * month_len`.
    #[default]
    MonthStart,
    /// Last trading day of the month: installment `i` at `(i + 1) * month_len`.
    MonthEnd,
}

impl ContributionTiming {
    /// Offset, in months, applied to every installment index.
    #[must_use]
    pub fn month_offset(&self) -> usize {
        match self {
            ContributionTiming::MonthStart => 0,
            ContributionTiming::MonthEnd => 1,
        }
    }
}

/// Phase of a simulated position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionPhase {
    /// No installment executed yet.
    NotStarted,
    /// Some but not all installments executed.
    Accumulating,
    /// Every scheduled installment executed.
    FullyInvested,
    /// All shares liquidated at the final index.
    Sold,
}
