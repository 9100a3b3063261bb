//! Strategy simulator.
//!
//! Lump sum and both DCA cash-flow models run through one pipeline: walk the
//! price series, buy each installment on its scheduled index, value the
//! accumulated shares at every close, then sell everything at the last close
//! and tax what was realized.

use crate::error::SimulationError;
use crate::event::{EventLog, SimulationEvent, SimulationEventType};
use crate::state::SimulationConfig;
use crate::strategies::{CashFlowModel, ContributionSchedule, FundedDca};
use lsdca_domain::entities::PriceSeries;
use lsdca_domain::enums::{ContributionTiming, PositionPhase};
use lsdca_domain::metrics::drawdown::{DrawdownReport, max_drawdown};
use lsdca_domain::metrics::growth::{cagr, simple_return};
use lsdca_domain::value_objects::cost_parameters::{CostParameters, TransactionCost};
use lsdca_domain::value_objects::simulation_result::{
    CostBreakdown, IdleCashInterest, SimulationResult, ValuationPoint,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Result of a strategy simulation together with what happened along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySimulationResult {
    /// Final result record.
    pub result: SimulationResult,
    /// Events in the order they happened.
    pub events: Vec<SimulationEvent>,
}

/// Running totals while the schedule is being executed.
#[derive(Debug, Default)]
struct Accumulation {
    shares: Decimal,
    deployed: Decimal,
    pending_cash: Decimal,
    interest: Decimal,
    /// Sum of `price * shares` over purchases.
    weighted_cost: Decimal,
    buy_costs: TransactionCost,
    executed: u32,
}

impl Accumulation {
    fn average_purchase_price(&self) -> Decimal {
        if self.shares.is_zero() {
            return Decimal::ZERO;
        }
        self.weighted_cost / self.shares
    }
}

/// Simulates a cash-flow model over a price series.
///
/// # Errors
/// Returns [`SimulationError::Precondition`] for invalid model parameters or
/// an invalid config. Data insufficiency is not an error: installments past
/// the end of the series are dropped and reported in the result.
pub fn simulate<S>(
    prices: &PriceSeries,
    model: &S,
    config: &SimulationConfig,
) -> Result<SimulationResult, SimulationError>
where
    S: ContributionSchedule + ?Sized,
{
    simulate_with_events(prices, model, config).map(|r| r.result)
}

/// Like [`simulate`], also returning the event log.
///
/// # Errors
/// See [`simulate`].
pub fn simulate_with_events<S>(
    prices: &PriceSeries,
    model: &S,
    config: &SimulationConfig,
) -> Result<StrategySimulationResult, SimulationError>
where
    S: ContributionSchedule + ?Sized,
{
    config.validate()?;
    model.validate()?;

    let strategy = model.kind();
    let context = config.schedule_context();
    let planned = model.installment_count();
    let executable = model.plan(&context, prices.len());
    let monthly_rate = model.monthly_rate();

    let mut log = EventLog::new();
    let mut acc = Accumulation {
        pending_cash: model.initial_cash(),
        ..Accumulation::default()
    };
    let mut phase = PositionPhase::NotStarted;
    let mut valuation = Vec::with_capacity(prices.len());
    let mut schedule = executable.iter().peekable();

    for (step, point) in prices.points().iter().enumerate() {
        while let Some(installment) = schedule.next_if(|i| i.index == step) {
            if let Some(rate) = monthly_rate {
                for _ in 0..installment.idle_months_before {
                    let accrued = acc.pending_cash * rate;
                    acc.interest += accrued;
                    debug!(step, balance = %acc.pending_cash, %accrued, "interest accrued");
                    log.record(SimulationEvent::interest_accrued(
                        step,
                        point.date,
                        acc.pending_cash,
                        accrued,
                        acc.interest,
                    ));
                }
            }

            let (net, cost) = config.costs.net_of_costs(installment.amount);
            let bought = point.close.shares_for(net);
            acc.shares += bought;
            acc.deployed += installment.amount;
            acc.pending_cash = (acc.pending_cash - installment.amount).max(Decimal::ZERO);
            acc.weighted_cost += point.close.value * bought;
            acc.buy_costs.commission += cost.commission;
            acc.buy_costs.slippage += cost.slippage;
            acc.executed += 1;

            debug!(
                step,
                installment = installment.number,
                amount = %installment.amount,
                price = %point.close.value,
                shares = %bought,
                "installment executed"
            );
            log.record(SimulationEvent::purchase(
                step,
                point.date,
                point.close,
                installment.number,
                installment.amount,
                cost,
                bought,
                acc.shares,
            ));

            phase = if acc.executed == planned {
                PositionPhase::FullyInvested
            } else {
                PositionPhase::Accumulating
            };
        }

        valuation.push(ValuationPoint {
            date: point.date,
            price: point.close.value,
            shares: acc.shares,
            value: acc.shares * point.close.value,
        });
    }

    if acc.executed < planned {
        let first_skipped = acc.executed;
        let first_index = context.position_of(first_skipped);
        let skipped = planned - acc.executed;
        let amount = model.planned_capital() - acc.deployed;
        warn!(
            %strategy,
            executed = acc.executed,
            planned,
            first_skipped_index = first_index,
            series_len = prices.len(),
            "price series too short for installment schedule, truncating"
        );
        log.record(SimulationEvent::schedule_truncated(
            first_index,
            first_skipped,
            skipped,
            amount,
        ));
    }

    let last_step = prices.len() - 1;
    let last = prices.last();
    let gross_final_value = acc.shares * last.close.value;
    let (post_sale_value, sell_cost) = if acc.shares > Decimal::ZERO {
        let (proceeds, cost) = config.costs.net_of_costs(gross_final_value);
        log.record(SimulationEvent::sale(
            last_step,
            last.date,
            last.close,
            acc.shares,
            gross_final_value,
            cost,
        ));
        (proceeds, cost)
    } else {
        (Decimal::ZERO, TransactionCost::default())
    };
    debug!(?phase, "position liquidated");

    let realized_gain = post_sale_value - acc.deployed;
    let capital_gains_tax = config.tax_schedule.assess(realized_gain);
    let idle_cash_interest = monthly_rate.map(|_| IdleCashInterest {
        earned: acc.interest,
        tax: config.tax_schedule.assess(acc.interest),
    });
    let interest_tax = idle_cash_interest
        .as_ref()
        .map_or(Decimal::ZERO, |i| i.tax.tax);
    let total_tax = capital_gains_tax.tax + interest_tax;
    let net_value = post_sale_value + acc.interest - total_tax;

    let capital_committed = model.committed_capital(acc.deployed);
    let elapsed_years = prices.elapsed_years();
    let undeployed_capital = (model.initial_cash() - acc.deployed).max(Decimal::ZERO);

    let result = SimulationResult {
        strategy,
        start_date: prices.first().date,
        end_date: last.date,
        elapsed_years,
        drawdown: invested_drawdown(&valuation),
        valuation,
        gross_final_value,
        post_sale_value,
        net_value,
        capital_committed,
        capital_deployed: acc.deployed,
        undeployed_capital,
        realized_gain,
        capital_gains_tax,
        idle_cash_interest,
        total_tax,
        costs: CostBreakdown {
            buy: acc.buy_costs,
            sell: sell_cost,
        },
        operation_count: acc.executed + u32::from(acc.shares > Decimal::ZERO),
        planned_installments: planned,
        executed_installments: acc.executed,
        total_shares: acc.shares,
        average_purchase_price: acc.average_purchase_price(),
        rentability: simple_return(capital_committed, net_value),
        cagr: cagr(capital_committed, net_value, elapsed_years),
        phase: PositionPhase::Sold,
    };

    info!(
        strategy = %result.strategy,
        operations = result.operation_count,
        purchases = log.count_by_type(SimulationEventType::Purchase),
        net_value = %result.net_value,
        rentability = %result.rentability,
        "simulation complete"
    );

    Ok(StrategySimulationResult {
        result,
        events: log.into_events(),
    })
}

/// Drawdown over the part of the series where shares are held.
///
/// Indices in the report refer to the full series.
fn invested_drawdown(valuation: &[ValuationPoint]) -> DrawdownReport {
    let series: Vec<_> = valuation.iter().map(ValuationPoint::as_value_point).collect();
    let Some(first) = valuation.iter().position(|v| v.shares > Decimal::ZERO) else {
        return max_drawdown(&series);
    };
    let mut report = max_drawdown(&series[first..]);
    report.peak_index += first;
    report.trough_index += first;
    report
}

fn timing_of(contribute_at_month_start: bool) -> ContributionTiming {
    if contribute_at_month_start {
        ContributionTiming::MonthStart
    } else {
        ContributionTiming::MonthEnd
    }
}

/// Invests `capital` at the first close and sells at the last.
///
/// # Errors
/// Returns an error for non-positive capital or invalid costs.
pub fn simulate_lump_sum(
    prices: &PriceSeries,
    capital: Decimal,
    costs: CostParameters,
) -> Result<SimulationResult, SimulationError> {
    simulate(
        prices,
        &CashFlowModel::lump_sum(capital),
        &SimulationConfig::new(costs),
    )
}

/// Splits `total_capital` into `installments` monthly purchases; the pending
/// balance earns `monthly_risk_free_rate` while it waits.
///
/// # Errors
/// Returns an error for non-positive capital, zero installments, a negative
/// rate or invalid costs.
pub fn simulate_dca_funded(
    prices: &PriceSeries,
    total_capital: Decimal,
    installments: u32,
    costs: CostParameters,
    monthly_risk_free_rate: Decimal,
    contribute_at_month_start: bool,
) -> Result<SimulationResult, SimulationError> {
    let model = CashFlowModel::DcaFunded(FundedDca::new(
        total_capital,
        installments,
        monthly_risk_free_rate,
    ));
    let config = SimulationConfig::new(costs).with_timing(timing_of(contribute_at_month_start));
    simulate(prices, &model, &config)
}

/// Buys `installment_amount` every month from external contributions.
///
/// # Errors
/// Returns an error for a non-positive amount, zero installments or invalid
/// costs.
pub fn simulate_dca_contributory(
    prices: &PriceSeries,
    installment_amount: Decimal,
    installments: u32,
    costs: CostParameters,
    contribute_at_month_start: bool,
) -> Result<SimulationResult, SimulationError> {
    let model = CashFlowModel::dca_contributory(installment_amount, installments);
    let config = SimulationConfig::new(costs).with_timing(timing_of(contribute_at_month_start));
    simulate(prices, &model, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lsdca_domain::DomainError;
    use lsdca_domain::enums::StrategyKind;
    use lsdca_domain::tax::TaxSchedule;
    use lsdca_domain::value_objects::percentage::Percentage;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    }

    fn series(closes: &[Decimal]) -> PriceSeries {
        PriceSeries::from_daily_closes(start(), closes).unwrap()
    }

    fn flat(len: usize, price: Decimal) -> PriceSeries {
        series(&vec![price; len])
    }

    fn ramp(len: usize) -> PriceSeries {
        let closes: Vec<Decimal> = (0..len).map(|i| Decimal::from(100 + i as i64)).collect();
        series(&closes)
    }

    fn retail_costs() -> CostParameters {
        CostParameters::new(Percentage(dec!(0.001)), Percentage(dec!(0.0005))).unwrap()
    }

    #[test]
    fn test_lump_sum_flat_frictionless_returns_capital() {
        for len in [1, 2, 30, 400] {
            let result =
                simulate_lump_sum(&flat(len, dec!(37)), dec!(10000), CostParameters::frictionless())
                    .unwrap();
            assert_eq!(result.net_value, dec!(10000));
            assert_eq!(result.total_tax, Decimal::ZERO);
            assert_eq!(result.costs.total(), Decimal::ZERO);
            assert_eq!(result.rentability, Decimal::ZERO);
            assert_eq!(result.operation_count, 2);
        }
    }

    #[test]
    fn test_lump_sum_price_doubling_after_a_year() {
        let mut closes = vec![dec!(100); 252];
        closes.extend(vec![dec!(200); 10]);
        let result =
            simulate_lump_sum(&series(&closes), dec!(10000), CostParameters::frictionless())
                .unwrap();

        assert_eq!(result.gross_final_value, dec!(20000));
        assert_eq!(result.realized_gain, dec!(10000));
        assert_eq!(result.capital_gains_tax.tax, dec!(1980));
        assert_eq!(result.net_value, dec!(18020));
        assert_eq!(result.rentability, dec!(0.802));
        assert_eq!(result.drawdown.max_drawdown, Decimal::ZERO);
        assert!(result.cagr > Decimal::ZERO);
        assert_eq!(result.strategy, StrategyKind::LumpSum);
        assert_eq!(result.phase, PositionPhase::Sold);
    }

    #[test]
    fn test_lump_sum_costs_on_both_sides() {
        let result = simulate_lump_sum(&flat(10, dec!(100)), dec!(10000), retail_costs()).unwrap();
        assert_eq!(result.costs.buy.commission, dec!(10));
        assert_eq!(result.costs.buy.slippage, dec!(5));
        assert_eq!(result.total_shares, dec!(99.85));
        assert_eq!(result.gross_final_value, dec!(9985));
        // 9985 * 0.0015
        assert_eq!(result.costs.sell.total(), dec!(14.9775));
        assert_eq!(result.net_value, dec!(9970.0225));
        assert_eq!(result.total_tax, Decimal::ZERO);
        assert_eq!(result.total_costs(), result.costs.total());
    }

    #[test]
    fn test_single_installment_dca_matches_lump_sum() {
        let prices = ramp(300);
        let lump = simulate_lump_sum(&prices, dec!(5000), retail_costs()).unwrap();
        let funded =
            simulate_dca_funded(&prices, dec!(5000), 1, retail_costs(), dec!(0.01), true).unwrap();
        let contributory =
            simulate_dca_contributory(&prices, dec!(5000), 1, retail_costs(), true).unwrap();

        for dca in [&funded, &contributory] {
            assert_eq!(dca.valuation, lump.valuation);
            assert_eq!(dca.gross_final_value, lump.gross_final_value);
            assert_eq!(dca.post_sale_value, lump.post_sale_value);
            assert_eq!(dca.net_value, lump.net_value);
            assert_eq!(dca.capital_gains_tax, lump.capital_gains_tax);
            assert_eq!(dca.costs, lump.costs);
            assert_eq!(dca.rentability, lump.rentability);
            assert_eq!(dca.cagr, lump.cagr);
            assert_eq!(dca.drawdown, lump.drawdown);
            assert_eq!(dca.operation_count, 2);
        }
        assert_eq!(funded.interest_earned(), Decimal::ZERO);
    }

    #[test]
    fn test_dca_valuation_follows_share_steps() {
        let prices = ramp(120);
        let result =
            simulate_dca_contributory(&prices, dec!(1000), 3, CostParameters::frictionless(), false)
                .unwrap();

        // Month-end timing: purchases at 21, 42 and 63.
        for point in &result.valuation[..21] {
            assert_eq!(point.value, Decimal::ZERO);
            assert_eq!(point.shares, Decimal::ZERO);
        }
        let after_first = result.valuation[21].shares;
        assert_eq!(after_first, dec!(1000) / dec!(121));
        for (i, point) in result.valuation.iter().enumerate().take(42).skip(21) {
            assert_eq!(point.shares, after_first);
            assert_eq!(point.value, after_first * prices.points()[i].close.value);
        }
        assert!(result.valuation[42].shares > after_first);
        let final_shares = result.valuation[63].shares;
        assert!(result.valuation[63..].iter().all(|p| p.shares == final_shares));
        assert!(result.valuation.windows(2).all(|w| w[0].shares <= w[1].shares));
    }

    #[test]
    fn test_average_purchase_price_within_executed_range() {
        let closes: Vec<Decimal> = (0..260)
            .map(|i| Decimal::from(50 + (i * 37) % 91))
            .collect();
        let prices = series(&closes);
        let result =
            simulate_dca_funded(&prices, dec!(12000), 12, retail_costs(), dec!(0), true).unwrap();

        let executed: Vec<Decimal> = (0..12).map(|i| closes[i * 21]).collect();
        let min = executed.iter().min().copied().unwrap();
        let max = executed.iter().max().copied().unwrap();
        assert!(result.average_purchase_price >= min);
        assert!(result.average_purchase_price <= max);
    }

    #[test]
    fn test_funded_dca_flat_market_loses_only_costs() {
        let result =
            simulate_dca_funded(&flat(260, dec!(100)), dec!(12000), 12, retail_costs(), dec!(0), true)
                .unwrap();

        assert_eq!(result.executed_installments, 12);
        assert_eq!(result.interest_earned(), Decimal::ZERO);
        assert_eq!(result.total_tax, Decimal::ZERO);
        assert_eq!(result.costs.buy.total(), dec!(18));
        assert_eq!(result.costs.sell.total(), dec!(17.973));
        assert_eq!(result.net_value, dec!(12000) - result.costs.total());
        assert_eq!(result.net_value, dec!(11964.027));
        assert_eq!(result.operation_count, 13);
        assert_eq!(result.undeployed_capital, Decimal::ZERO);
    }

    #[test]
    fn test_funded_interest_accrues_on_pending_balance() {
        let prices = flat(80, dec!(10));
        let month_start =
            simulate_dca_funded(&prices, dec!(3000), 3, CostParameters::frictionless(), dec!(0.01), true)
                .unwrap();
        // 2000 * 1% before the second purchase, 1000 * 1% before the third.
        let interest = month_start.idle_cash_interest.as_ref().unwrap();
        assert_eq!(interest.earned, dec!(30));
        assert_eq!(interest.tax.tax, dec!(5.7));
        assert_eq!(month_start.total_tax, dec!(5.7));
        assert_eq!(month_start.net_value, dec!(3024.3));
        assert_eq!(month_start.capital_committed, dec!(3000));

        let month_end =
            simulate_dca_funded(&prices, dec!(3000), 3, CostParameters::frictionless(), dec!(0.01), false)
                .unwrap();
        assert_eq!(month_end.interest_earned(), dec!(60));
    }

    #[test]
    fn test_interest_and_gain_are_taxed_separately() {
        let mut closes = vec![dec!(100); 50];
        closes.extend(vec![dec!(200); 10]);
        let prices = series(&closes);
        let result = simulate_dca_funded(
            &prices,
            dec!(20000),
            2,
            CostParameters::frictionless(),
            dec!(0.01),
            true,
        )
        .unwrap();

        // Both streams start from the lowest bracket.
        assert_eq!(result.realized_gain, dec!(20000));
        assert_eq!(result.capital_gains_tax.tax, dec!(4080));
        assert_eq!(result.interest_earned(), dec!(100));
        assert_eq!(result.idle_cash_interest.as_ref().unwrap().tax.tax, dec!(19));
        assert_eq!(result.total_tax, dec!(4099));
    }

    #[test]
    fn test_schedule_truncated_by_short_series() {
        let prices = flat(100, dec!(50));
        let output = simulate_with_events(
            &prices,
            &CashFlowModel::dca_funded(dec!(12000), 12, dec!(0)),
            &SimulationConfig::default(),
        )
        .unwrap();
        let result = &output.result;

        // Indices 0, 21, 42, 63 and 84 fit in 100 closes.
        assert_eq!(result.planned_installments, 12);
        assert_eq!(result.executed_installments, 5);
        assert!(result.was_truncated());
        assert_eq!(result.capital_deployed, dec!(5000));
        assert_eq!(result.undeployed_capital, dec!(7000));
        assert_eq!(result.capital_committed, dec!(12000));
        assert_eq!(result.net_value, dec!(5000));
        assert_eq!(result.phase, PositionPhase::Sold);
        // The idle 7000 is outside net_value but inside the denominator.
        assert_eq!(
            result.net_value + result.undeployed_capital,
            result.capital_committed
        );
        assert!(result.rentability < dec!(-0.58));

        let truncations: Vec<_> = output
            .events
            .iter()
            .filter(|e| e.event_type == SimulationEventType::ScheduleTruncated)
            .collect();
        assert_eq!(truncations.len(), 1);
        assert_eq!(truncations[0].step, 105);
    }

    #[test]
    fn test_contributory_measures_against_contributions_made() {
        let prices = flat(50, dec!(20));
        let result =
            simulate_dca_contributory(&prices, dec!(500), 12, CostParameters::frictionless(), true)
                .unwrap();
        assert_eq!(result.executed_installments, 3);
        assert_eq!(result.capital_committed, dec!(1500));
        assert_eq!(result.rentability, Decimal::ZERO);
        assert!(result.idle_cash_interest.is_none());
        assert_eq!(result.undeployed_capital, Decimal::ZERO);
    }

    #[test]
    fn test_nothing_executed_still_reaches_sold() {
        let prices = flat(10, dec!(20));
        let result =
            simulate_dca_contributory(&prices, dec!(500), 4, CostParameters::frictionless(), false)
                .unwrap();
        assert_eq!(result.executed_installments, 0);
        assert_eq!(result.operation_count, 0);
        assert_eq!(result.net_value, Decimal::ZERO);
        assert_eq!(result.rentability, Decimal::ZERO);
        assert_eq!(result.average_purchase_price, Decimal::ZERO);
        assert_eq!(result.drawdown.max_drawdown, Decimal::ZERO);
        assert_eq!(result.drawdown.peak_date, Some(prices.first().date));
        assert_eq!(result.phase, PositionPhase::Sold);
    }

    #[test]
    fn test_drawdown_ignores_pre_investment_region() {
        let mut closes = vec![dec!(100); 21];
        closes.extend([dec!(100), dec!(80), dec!(60), dec!(90), dec!(120)]);
        let prices = series(&closes);
        let result =
            simulate_dca_contributory(&prices, dec!(1000), 1, CostParameters::frictionless(), false)
                .unwrap();

        assert_eq!(result.drawdown.max_drawdown, dec!(-0.4));
        assert_eq!(result.drawdown.peak_index, 21);
        assert_eq!(result.drawdown.trough_index, 23);
        assert_eq!(result.drawdown.trough_date, Some(prices.points()[23].date));
    }

    #[test]
    fn test_events_in_execution_order() {
        let output = simulate_with_events(
            &flat(60, dec!(10)),
            &CashFlowModel::dca_funded(dec!(2000), 2, dec!(0.024)),
            &SimulationConfig::default(),
        )
        .unwrap();
        let kinds: Vec<_> = output.events.iter().map(|e| e.event_type).collect();
        assert_eq!(
            kinds,
            vec![
                SimulationEventType::Purchase,
                SimulationEventType::InterestAccrued,
                SimulationEventType::Purchase,
                SimulationEventType::Sale,
            ]
        );
        assert_eq!(output.result.interest_earned(), dec!(2));
    }

    #[test]
    fn test_custom_month_length() {
        let config = SimulationConfig::default().with_trading_days_per_month(5);
        let result = simulate(
            &ramp(30),
            &CashFlowModel::dca_contributory(dec!(100), 4),
            &config,
        )
        .unwrap();
        let buys: Vec<usize> = result
            .valuation
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[1].shares > w[0].shares)
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(buys, vec![5, 10, 15]);
        assert!(result.valuation[0].shares > Decimal::ZERO);
    }

    #[test]
    fn test_preconditions_fail_fast() {
        let prices = flat(30, dec!(10));
        assert_eq!(
            simulate_lump_sum(&prices, dec!(0), CostParameters::frictionless()),
            Err(SimulationError::Precondition(DomainError::NonPositiveCapital(dec!(0))))
        );
        assert_eq!(
            simulate_dca_funded(&prices, dec!(100), 0, CostParameters::frictionless(), dec!(0), true),
            Err(SimulationError::Precondition(DomainError::InvalidInstallmentCount))
        );
        assert_eq!(
            simulate_dca_contributory(&prices, dec!(-5), 3, CostParameters::frictionless(), true),
            Err(SimulationError::Precondition(DomainError::NonPositiveCapital(dec!(-5))))
        );
        let ruinous = CostParameters {
            commission_rate: Percentage(dec!(0.9)),
            slippage_rate: Percentage(dec!(0.1)),
        };
        assert_eq!(
            simulate_lump_sum(&prices, dec!(100), ruinous),
            Err(SimulationError::Precondition(DomainError::CostRateTooHigh(dec!(1.0))))
        );
    }

    #[test]
    fn test_huge_installment_count_truncates_instead_of_planning_everything() {
        let output = simulate_with_events(
            &flat(100, dec!(10)),
            &CashFlowModel::dca_contributory(dec!(1), u32::MAX),
            &SimulationConfig::default(),
        )
        .unwrap();
        let result = &output.result;

        assert_eq!(result.planned_installments, u32::MAX);
        assert_eq!(result.executed_installments, 5);
        assert!(result.was_truncated());
        assert_eq!(result.capital_deployed, dec!(5));

        let truncation = output
            .events
            .iter()
            .find(|e| e.event_type == SimulationEventType::ScheduleTruncated)
            .unwrap();
        assert_eq!(truncation.step, 105);
    }

    #[test]
    fn test_month_length_overflow_is_past_the_end() {
        let config = SimulationConfig::default().with_trading_days_per_month(usize::MAX / 2);
        let result = simulate(
            &flat(30, dec!(10)),
            &CashFlowModel::dca_contributory(dec!(100), 4),
            &config,
        )
        .unwrap();
        assert_eq!(result.executed_installments, 1);
        assert_eq!(result.capital_deployed, dec!(100));
        assert!(result.was_truncated());

        let month_end = config.with_timing(ContributionTiming::MonthEnd);
        let result = simulate(
            &flat(30, dec!(10)),
            &CashFlowModel::dca_contributory(dec!(100), 4),
            &month_end,
        )
        .unwrap();
        assert_eq!(result.executed_installments, 0);
    }

    #[test]
    fn test_custom_tax_schedule_applies_to_gain_and_interest() {
        let flat_ten = TaxSchedule::flat(Percentage(dec!(0.10))).unwrap();
        let config = SimulationConfig::default().with_tax_schedule(flat_ten);

        let mut closes = vec![dec!(100); 252];
        closes.extend(vec![dec!(200); 10]);
        let lump = simulate(&series(&closes), &CashFlowModel::lump_sum(dec!(10000)), &config).unwrap();
        assert_eq!(lump.capital_gains_tax.tax, dec!(1000));
        assert_eq!(lump.net_value, dec!(19000));
        assert_eq!(lump.rentability, dec!(0.9));

        let mut closes = vec![dec!(100); 50];
        closes.extend(vec![dec!(200); 10]);
        let funded = simulate(
            &series(&closes),
            &CashFlowModel::DcaFunded(FundedDca::new(dec!(20000), 2, dec!(0.01))),
            &config,
        )
        .unwrap();
        assert_eq!(funded.capital_gains_tax.tax, dec!(2000));
        assert_eq!(funded.interest_earned(), dec!(100));
        assert_eq!(funded.idle_cash_interest.as_ref().unwrap().tax.tax, dec!(10));
        assert_eq!(funded.total_tax, dec!(2010));
    }

    #[test]
    fn test_legacy_schedule_caps_top_rate_at_27_percent() {
        let mut closes = vec![dec!(100); 252];
        closes.extend(vec![dec!(500); 10]);
        let prices = series(&closes);
        let model = CashFlowModel::lump_sum(dec!(100000));

        let current = simulate(&prices, &model, &SimulationConfig::default()).unwrap();
        let legacy = simulate(
            &prices,
            &model,
            &SimulationConfig::default().with_tax_schedule(TaxSchedule::spain_savings_legacy()),
        )
        .unwrap();

        // 400000 of gain: the top 100000 pays 28% now and 27% before.
        assert_eq!(current.realized_gain, dec!(400000));
        assert_eq!(current.total_tax, dec!(99880));
        assert_eq!(legacy.total_tax, dec!(98880));
    }
}
