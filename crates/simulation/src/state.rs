//! Simulation configuration.
//!
//! Everything a run needs besides the price series and the cash-flow model:
//! frictions, the tax schedule, installment timing and the trading-day month.

use crate::strategies::{ScheduleContext, TRADING_DAYS_PER_MONTH};
use lsdca_domain::DomainError;
use lsdca_domain::enums::ContributionTiming;
use lsdca_domain::tax::TaxSchedule;
use lsdca_domain::value_objects::cost_parameters::CostParameters;
use lsdca_domain::value_objects::percentage::Percentage;
use rust_decimal::Decimal;

/// Trading days approximating one calendar year.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Commission and slippage per transaction.
    pub costs: CostParameters,
    /// Schedule applied to both the capital gain and idle-cash interest.
    pub tax_schedule: TaxSchedule,
    /// Start or end of each month for DCA installments.
    pub timing: ContributionTiming,
    /// Trading days between installments.
    pub trading_days_per_month: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            costs: CostParameters::default(),
            tax_schedule: TaxSchedule::default(),
            timing: ContributionTiming::default(),
            trading_days_per_month: TRADING_DAYS_PER_MONTH,
        }
    }
}

impl SimulationConfig {
    /// Creates a config with the given costs and default everything else.
    #[must_use]
    pub fn new(costs: CostParameters) -> Self {
        Self {
            costs,
            ..Self::default()
        }
    }

    /// Sets the transaction costs.
    #[must_use]
    pub fn with_costs(mut self, costs: CostParameters) -> Self {
        self.costs = costs;
        self
    }

    /// Sets commission and slippage from human percentages (`0.1` = 0.1%).
    ///
    /// # Errors
    /// Returns an error if the resulting rates are invalid.
    pub fn with_cost_percentages(
        self,
        commission_pct: Decimal,
        slippage_pct: Decimal,
    ) -> Result<Self, DomainError> {
        let costs = CostParameters::new(
            Percentage::from_percent(commission_pct),
            Percentage::from_percent(slippage_pct),
        )?;
        Ok(self.with_costs(costs))
    }

    /// Sets the tax schedule.
    #[must_use]
    pub fn with_tax_schedule(mut self, schedule: TaxSchedule) -> Self {
        self.tax_schedule = schedule;
        self
    }

    /// Sets the installment timing.
    #[must_use]
    pub fn with_timing(mut self, timing: ContributionTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Sets the number of trading days between installments.
    #[must_use]
    pub fn with_trading_days_per_month(mut self, days: usize) -> Self {
        self.trading_days_per_month = days;
        self
    }

    /// Checks the cost rates and the month length.
    ///
    /// # Errors
    /// Returns the violated precondition.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.costs.validate()?;
        if self.trading_days_per_month == 0 {
            return Err(DomainError::InvalidMonthLength);
        }
        Ok(())
    }

    /// Schedule inputs derived from this config.
    #[must_use]
    pub fn schedule_context(&self) -> ScheduleContext {
        ScheduleContext {
            trading_days_per_month: self.trading_days_per_month,
            timing: self.timing,
        }
    }
}
