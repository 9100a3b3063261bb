use super::{
    ContributionSchedule, Installment, ScheduleContext, require_installments,
    require_positive_capital,
};
use lsdca_domain::DomainError;
use lsdca_domain::enums::StrategyKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// DCA funded by a fixed external contribution each month.
///
/// Capital does not exist before its month arrives, so nothing sits idle and
/// returns are measured against the contributions actually made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributoryDca {
    pub installment_amount: Decimal,
    pub installments: u32,
}

impl ContributoryDca {
    #[must_use]
    pub fn new(installment_amount: Decimal, installments: u32) -> Self {
        Self {
            installment_amount,
            installments,
        }
    }
}

impl ContributionSchedule for ContributoryDca {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DcaContributory
    }

    fn validate(&self) -> Result<(), DomainError> {
        require_positive_capital(self.installment_amount)?;
        require_installments(self.installments)
    }

    fn installment_count(&self) -> u32 {
        self.installments
    }

    fn installment(&self, number: u32, context: &ScheduleContext) -> Installment {
        Installment {
            number,
            index: context.position_of(number),
            amount: self.installment_amount,
            idle_months_before: 0,
        }
    }

    /// Saturates at `Decimal::MAX` for counts no series could cover.
    fn planned_capital(&self) -> Decimal {
        self.installment_amount
            .checked_mul(Decimal::from(self.installments))
            .unwrap_or(Decimal::MAX)
    }

    fn committed_capital(&self, deployed: Decimal) -> Decimal {
        deployed
    }
}
