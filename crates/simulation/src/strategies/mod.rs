//! Cash-flow models.
//!
//! Every strategy is reduced to a contribution schedule: which trading day
//! each installment is bought on, how much it invests, and how many months of
//! idle-cash interest accrue right before it. The simulator runs the same
//! accumulate-then-sell pipeline for all of them.

mod contributory;
mod funded;
mod lump_sum;

pub use contributory::ContributoryDca;
pub use funded::FundedDca;
pub use lump_sum::LumpSum;

use lsdca_domain::DomainError;
use lsdca_domain::enums::{ContributionTiming, StrategyKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trading days approximating one calendar month.
pub const TRADING_DAYS_PER_MONTH: usize = 21;

/// Inputs a schedule needs besides its own parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleContext {
    /// Spacing between consecutive installments.
    pub trading_days_per_month: usize,
    /// Start or end of each month.
    pub timing: ContributionTiming,
}

impl Default for ScheduleContext {
    fn default() -> Self {
        Self {
            trading_days_per_month: TRADING_DAYS_PER_MONTH,
            timing: ContributionTiming::MonthStart,
        }
    }
}

impl ScheduleContext {
    /// Series position of the installment with the given 0-based number.
    ///
    /// Positions that do not fit in `usize` saturate to `usize::MAX`, which is
    /// past the end of any series.
    #[must_use]
    pub fn position_of(&self, number: u32) -> usize {
        (number as usize)
            .checked_add(self.timing.month_offset())
            .and_then(|months| months.checked_mul(self.trading_days_per_month))
            .unwrap_or(usize::MAX)
    }
}

/// One planned purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 0-based installment number.
    pub number: u32,
    /// Position in the price series; may lie past its end.
    pub index: usize,
    /// Gross amount spent, before costs.
    pub amount: Decimal,
    /// Months the pending cash earns interest before this purchase.
    pub idle_months_before: u32,
}

/// Produces the contribution plan of a cash-flow model.
pub trait ContributionSchedule {
    /// Which result kind this schedule produces.
    fn kind(&self) -> StrategyKind;

    /// Checks the model parameters.
    ///
    /// # Errors
    /// Returns the violated precondition.
    fn validate(&self) -> Result<(), DomainError>;

    /// Number of installments requested, whether or not the data covers them.
    fn installment_count(&self) -> u32;

    /// The installment with the given 0-based number.
    fn installment(&self, number: u32, context: &ScheduleContext) -> Installment;

    /// Sum of every requested installment.
    fn planned_capital(&self) -> Decimal;

    /// Installments that land inside a series of `series_len` closes, in
    /// execution order.
    ///
    /// Generation stops at the first position past the end, so the plan never
    /// holds more than `series_len / trading_days_per_month + 1` entries.
    fn plan(&self, context: &ScheduleContext, series_len: usize) -> Vec<Installment> {
        (0..self.installment_count())
            .map(|number| self.installment(number, context))
            .take_while(|installment| installment.index < series_len)
            .collect()
    }

    /// Cash held before the first purchase.
    fn initial_cash(&self) -> Decimal {
        Decimal::ZERO
    }

    /// Monthly rate paid on pending cash, if the model holds any.
    fn monthly_rate(&self) -> Option<Decimal> {
        None
    }

    /// Capital returns are measured against, given what was invested.
    fn committed_capital(&self, deployed: Decimal) -> Decimal;
}

/// Tagged cash-flow model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashFlowModel {
    /// Everything invested on the first day.
    LumpSum(LumpSum),
    /// Capital held upfront, invested monthly, idle cash earns interest.
    DcaFunded(FundedDca),
    /// Fixed monthly contributions from outside, nothing idle.
    DcaContributory(ContributoryDca),
}

impl CashFlowModel {
    #[must_use]
    pub fn lump_sum(capital: Decimal) -> Self {
        Self::LumpSum(LumpSum::new(capital))
    }

    /// Pre-funded DCA with an annual risk-free rate (paid monthly at `rate / 12`).
    #[must_use]
    pub fn dca_funded(total_capital: Decimal, installments: u32, annual_rate: Decimal) -> Self {
        Self::DcaFunded(FundedDca::with_annual_rate(
            total_capital,
            installments,
            annual_rate,
        ))
    }

    #[must_use]
    pub fn dca_contributory(installment_amount: Decimal, installments: u32) -> Self {
        Self::DcaContributory(ContributoryDca::new(installment_amount, installments))
    }

    fn inner(&self) -> &dyn ContributionSchedule {
        match self {
            CashFlowModel::LumpSum(s) => s,
            CashFlowModel::DcaFunded(s) => s,
            CashFlowModel::DcaContributory(s) => s,
        }
    }
}

impl ContributionSchedule for CashFlowModel {
    fn kind(&self) -> StrategyKind {
        self.inner().kind()
    }

    fn validate(&self) -> Result<(), DomainError> {
        self.inner().validate()
    }

    fn installment_count(&self) -> u32 {
        self.inner().installment_count()
    }

    fn installment(&self, number: u32, context: &ScheduleContext) -> Installment {
        self.inner().installment(number, context)
    }

    fn planned_capital(&self) -> Decimal {
        self.inner().planned_capital()
    }

    fn plan(&self, context: &ScheduleContext, series_len: usize) -> Vec<Installment> {
        self.inner().plan(context, series_len)
    }

    fn initial_cash(&self) -> Decimal {
        self.inner().initial_cash()
    }

    fn monthly_rate(&self) -> Option<Decimal> {
        self.inner().monthly_rate()
    }

    fn committed_capital(&self, deployed: Decimal) -> Decimal {
        self.inner().committed_capital(deployed)
    }
}

fn require_positive_capital(capital: Decimal) -> Result<(), DomainError> {
    if capital <= Decimal::ZERO {
        return Err(DomainError::NonPositiveCapital(capital));
    }
    Ok(())
}

fn require_installments(installments: u32) -> Result<(), DomainError> {
    if installments == 0 {
        return Err(DomainError::InvalidInstallmentCount);
    }
    Ok(())
}
