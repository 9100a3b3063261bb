//! Simulation events for tracking what happens during a backtest.
//!
//! Every purchase, interest accrual, dropped installment and the final sale
//! is recorded with the series index and date it happened on.

use chrono::NaiveDate;
use lsdca_domain::value_objects::cost_parameters::TransactionCost;
use lsdca_domain::value_objects::price::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Types of events that can occur during simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEventType {
    /// An installment was bought.
    Purchase,
    /// Pending cash earned a month of interest.
    InterestAccrued,
    /// The price series ended before the remaining installments.
    ScheduleTruncated,
    /// All shares were sold at the last close.
    Sale,
}

/// A simulation event with full context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Series index when the event occurred.
    pub step: usize,
    /// Trading date, when the step lies inside the series.
    pub date: Option<NaiveDate>,
    /// Type of event.
    pub event_type: SimulationEventType,
    /// Close at the time of the event.
    pub price: Option<Price>,
    /// Additional event-specific data.
    pub data: EventData,
}

/// Event-specific data payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventData {
    /// Purchase data.
    Purchase {
        /// 0-based installment number.
        installment: u32,
        /// Gross amount spent.
        amount: Decimal,
        /// Commission and slippage paid.
        cost: TransactionCost,
        /// Shares bought with the net amount.
        shares: Decimal,
        /// Shares held after the purchase.
        total_shares: Decimal,
    },
    /// Interest accrual data.
    InterestAccrued {
        /// Pending balance the interest was paid on.
        balance: Decimal,
        /// Interest for the month.
        interest: Decimal,
        /// Interest accumulated so far.
        cumulative: Decimal,
    },
    /// Truncation data.
    ScheduleTruncated {
        /// First installment that could not run.
        first_skipped: u32,
        /// Number of installments dropped.
        skipped: u32,
        /// Gross amount they would have invested.
        amount: Decimal,
    },
    /// Sale data.
    Sale {
        /// Shares sold.
        shares: Decimal,
        /// Value before costs.
        gross_value: Decimal,
        /// Commission and slippage paid.
        cost: TransactionCost,
        /// Value received.
        proceeds: Decimal,
    },
}

impl SimulationEvent {
    /// Creates a purchase event.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn purchase(
        step: usize,
        date: NaiveDate,
        price: Price,
        installment: u32,
        amount: Decimal,
        cost: TransactionCost,
        shares: Decimal,
        total_shares: Decimal,
    ) -> Self {
        Self {
            step,
            date: Some(date),
            event_type: SimulationEventType::Purchase,
            price: Some(price),
            data: EventData::Purchase {
                installment,
                amount,
                cost,
                shares,
                total_shares,
            },
        }
    }

    /// Creates an interest accrual event.
    #[must_use]
    pub fn interest_accrued(
        step: usize,
        date: NaiveDate,
        balance: Decimal,
        interest: Decimal,
        cumulative: Decimal,
    ) -> Self {
        Self {
            step,
            date: Some(date),
            event_type: SimulationEventType::InterestAccrued,
            price: None,
            data: EventData::InterestAccrued {
                balance,
                interest,
                cumulative,
            },
        }
    }

    /// Creates a truncation event at the index the first dropped installment
    /// was scheduled for.
    #[must_use]
    pub fn schedule_truncated(step: usize, first_skipped: u32, skipped: u32, amount: Decimal) -> Self {
        Self {
            step,
            date: None,
            event_type: SimulationEventType::ScheduleTruncated,
            price: None,
            data: EventData::ScheduleTruncated {
                first_skipped,
                skipped,
                amount,
            },
        }
    }

    /// Creates a sale event.
    #[must_use]
    pub fn sale(
        step: usize,
        date: NaiveDate,
        price: Price,
        shares: Decimal,
        gross_value: Decimal,
        cost: TransactionCost,
    ) -> Self {
        Self {
            step,
            date: Some(date),
            event_type: SimulationEventType::Sale,
            price: Some(price),
            data: EventData::Sale {
                shares,
                gross_value,
                cost,
                proceeds: gross_value - cost.total(),
            },
        }
    }
}

/// Event log for collecting all events during simulation.
#[derive(Debug, Default)]
pub struct EventLog {
    /// All recorded events.
    events: Vec<SimulationEvent>,
}

impl EventLog {
    /// Creates a new empty event log.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Records an event.
    pub fn record(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    /// Returns all events.
    #[must_use]
    pub fn events(&self) -> &[SimulationEvent] {
        &self.events
    }

    /// Returns the count of events by type.
    #[must_use]
    pub fn count_by_type(&self, event_type: SimulationEventType) -> usize {
        self.events
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }

    /// Consumes the log, returning the events in recording order.
    #[must_use]
    pub fn into_events(self) -> Vec<SimulationEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_event_log_record_and_query() {
        let mut log = EventLog::new();
        let price = Price::new(dec!(100));

        log.record(SimulationEvent::purchase(
            0,
            day(1),
            price,
            0,
            dec!(1000),
            TransactionCost::default(),
            dec!(10),
            dec!(10),
        ));
        log.record(SimulationEvent::interest_accrued(
            21,
            day(22),
            dec!(1000),
            dec!(2),
            dec!(2),
        ));
        log.record(SimulationEvent::purchase(
            21,
            day(22),
            price,
            1,
            dec!(1000),
            TransactionCost::default(),
            dec!(10),
            dec!(20),
        ));
        log.record(SimulationEvent::schedule_truncated(42, 2, 1, dec!(1000)));

        assert_eq!(log.events().len(), 4);
        assert_eq!(log.count_by_type(SimulationEventType::Purchase), 2);
        assert_eq!(
            log.count_by_type(SimulationEventType::ScheduleTruncated),
            1
        );
        assert_eq!(log.events()[1].event_type, SimulationEventType::InterestAccrued);
    }

    #[test]
    fn test_sale_event_proceeds() {
        let cost = TransactionCost {
            commission: dec!(2),
            slippage: dec!(1),
        };
        let event = SimulationEvent::sale(10, day(11), Price::new(dec!(50)), dec!(20), dec!(1000), cost);

        assert_eq!(event.event_type, SimulationEventType::Sale);
        match event.data {
            EventData::Sale { proceeds, .. } => assert_eq!(proceeds, dec!(997)),
            other => panic!("unexpected payload {other:?}"),
        }
    }
}
