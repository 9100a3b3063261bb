use crate::enums::{PositionPhase, StrategyKind};
use crate::metrics::ValuePoint;
use crate::metrics::drawdown::DrawdownReport;
use crate::tax::TaxAssessment;
use crate::value_objects::cost_parameters::TransactionCost;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Position value on one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationPoint {
    pub date: NaiveDate,
    pub price: Decimal,
    /// Shares held at the close, after any purchase that day.
    pub shares: Decimal,
    /// `shares * price`.
    pub value: Decimal,
}

impl ValuationPoint {
    pub fn as_value_point(&self) -> ValuePoint {
        ValuePoint::new(self.date, self.value)
    }
}

/// Commission and slippage split between the buy side and the final sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub buy: TransactionCost,
    pub sell: TransactionCost,
}

impl CostBreakdown {
    pub fn total_commission(&self) -> Decimal {
        self.buy.commission + self.sell.commission
    }

    pub fn total_slippage(&self) -> Decimal {
        self.buy.slippage + self.sell.slippage
    }

    pub fn total(&self) -> Decimal {
        self.total_commission() + self.total_slippage()
    }
}

/// Interest earned by pre-funded capital while it waited to be invested.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdleCashInterest {
    pub earned: Decimal,
    /// Assessed on its own, as if no other gain filled the brackets.
    pub tax: TaxAssessment,
}

/// Outcome of one strategy simulation. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub strategy: StrategyKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub elapsed_years: f64,

    /// One entry per input price, same index domain.
    pub valuation: Vec<ValuationPoint>,

    /// Value of all shares at the last close, before selling.
    pub gross_final_value: Decimal,
    /// Gross final value minus sale commission and slippage.
    pub post_sale_value: Decimal,
    /// Post-sale value plus idle-cash interest minus every tax.
    pub net_value: Decimal,

    /// Capital the returns are measured against: the full pre-funded amount
    /// for lump sum and pre-funded DCA, the contributions made for
    /// contributory DCA.
    pub capital_committed: Decimal,
    /// Sum of installments actually executed; the cost basis.
    pub capital_deployed: Decimal,
    /// Pre-funded capital left in cash because the schedule ran past the data.
    ///
    /// This cash is reported here only. It is not part of `net_value`, so a
    /// truncated pre-funded run shows a rentability far below what the
    /// investor actually holds.
    pub undeployed_capital: Decimal,

    /// Post-sale value minus cost basis.
    pub realized_gain: Decimal,
    pub capital_gains_tax: TaxAssessment,
    /// Present only for the pre-funded DCA model.
    pub idle_cash_interest: Option<IdleCashInterest>,
    pub total_tax: Decimal,

    pub costs: CostBreakdown,
    /// Executed buys plus the final sale.
    pub operation_count: u32,
    pub planned_installments: u32,
    pub executed_installments: u32,
    pub total_shares: Decimal,
    /// Volume-weighted average purchase price.
    pub average_purchase_price: Decimal,

    /// `net_value / capital_committed - 1`.
    ///
    /// `undeployed_capital` is excluded from the numerator but stays in the
    /// denominator. Add it back to `net_value` to see the return on the whole
    /// pre-funded amount.
    pub rentability: Decimal,
    pub cagr: Decimal,
    pub drawdown: DrawdownReport,
    pub phase: PositionPhase,
}

impl SimulationResult {
    /// Total tax over total positive gain (capital gain plus interest).
    #[must_use]
    pub fn effective_tax_rate(&self) -> Decimal {
        let interest = self
            .idle_cash_interest
            .as_ref()
            .map_or(Decimal::ZERO, |i| i.earned.max(Decimal::ZERO));
        let taxable = self.realized_gain.max(Decimal::ZERO) + interest;
        if taxable.is_zero() {
            return Decimal::ZERO;
        }
        self.total_tax / taxable
    }

    /// Commissions, slippage and taxes together.
    #[must_use]
    pub fn total_costs(&self) -> Decimal {
        self.costs.total() + self.total_tax
    }

    /// Idle-cash interest earned, zero when not applicable.
    #[must_use]
    pub fn interest_earned(&self) -> Decimal {
        self.idle_cash_interest
            .as_ref()
            .map_or(Decimal::ZERO, |i| i.earned)
    }

    /// Whether fewer installments ran than were planned.
    #[must_use]
    pub fn was_truncated(&self) -> bool {
        self.executed_installments < self.planned_installments
    }
}
