use super::{ContributionSchedule, Installment, ScheduleContext, require_positive_capital};
use lsdca_domain::DomainError;
use lsdca_domain::enums::StrategyKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whole capital invested at the first close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LumpSum {
    pub capital: Decimal,
}

impl LumpSum {
    #[must_use]
    pub fn new(capital: Decimal) -> Self {
        Self { capital }
    }
}

impl ContributionSchedule for LumpSum {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LumpSum
    }

    fn validate(&self) -> Result<(), DomainError> {
        require_positive_capital(self.capital)
    }

    fn installment_count(&self) -> u32 {
        1
    }

    fn installment(&self, number: u32, _context: &ScheduleContext) -> Installment {
        Installment {
            number,
            index: 0,
            amount: self.capital,
            idle_months_before: 0,
        }
    }

    fn planned_capital(&self) -> Decimal {
        self.capital
    }

    fn committed_capital(&self, _deployed: Decimal) -> Decimal {
        self.capital
    }
}
