use super::{
    ContributionSchedule, Installment, ScheduleContext, require_installments,
    require_positive_capital,
};
use lsdca_domain::DomainError;
use lsdca_domain::enums::{ContributionTiming, StrategyKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// DCA over capital that is available upfront.
///
/// The not-yet-invested balance earns `monthly_risk_free_rate` for each month
/// it waits. With month-start timing the first installment is bought
/// immediately, so interest accrues before every installment but the first;
/// with month-end timing it accrues before all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundedDca {
    pub total_capital: Decimal,
    pub installments: u32,
    pub monthly_risk_free_rate: Decimal,
}

impl FundedDca {
    #[must_use]
    pub fn new(total_capital: Decimal, installments: u32, monthly_risk_free_rate: Decimal) -> Self {
        Self {
            total_capital,
            installments,
            monthly_risk_free_rate,
        }
    }

    #[must_use]
    pub fn with_annual_rate(total_capital: Decimal, installments: u32, annual_rate: Decimal) -> Self {
        Self::new(total_capital, installments, annual_rate / Decimal::from(12))
    }

    /// Equal share of the total; the last installment absorbs rounding so the
    /// amounts always add up to the total.
    fn amount_of(&self, number: u32) -> Decimal {
        let each = self.total_capital / Decimal::from(self.installments);
        if number + 1 == self.installments {
            self.total_capital - each * Decimal::from(self.installments - 1)
        } else {
            each
        }
    }
}

impl ContributionSchedule for FundedDca {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DcaFunded
    }

    fn validate(&self) -> Result<(), DomainError> {
        require_positive_capital(self.total_capital)?;
        require_installments(self.installments)?;
        if self.monthly_risk_free_rate < Decimal::ZERO {
            return Err(DomainError::NegativeRiskFreeRate(
                self.monthly_risk_free_rate,
            ));
        }
        Ok(())
    }

    fn installment_count(&self) -> u32 {
        self.installments
    }

    fn installment(&self, number: u32, context: &ScheduleContext) -> Installment {
        let waits = number > 0 || context.timing == ContributionTiming::MonthEnd;
        Installment {
            number,
            index: context.position_of(number),
            amount: self.amount_of(number),
            idle_months_before: u32::from(waits),
        }
    }

    fn planned_capital(&self) -> Decimal {
        self.total_capital
    }

    fn initial_cash(&self) -> Decimal {
        self.total_capital
    }

    fn monthly_rate(&self) -> Option<Decimal> {
        Some(self.monthly_risk_free_rate)
    }

    fn committed_capital(&self, _deployed: Decimal) -> Decimal {
        self.total_capital
    }
}
