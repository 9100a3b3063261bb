//! Table rendering for simulation results.

use lsdca_domain::tax::TaxAssessment;
use lsdca_domain::value_objects::simulation_result::SimulationResult;
use lsdca_simulation::comparison::StrategyComparison;
use lsdca_simulation::horizon::HorizonReport;
use prettytable::{Table, row};
use rust_decimal::Decimal;

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn pct(fraction: Decimal) -> String {
    format!("{:.2}%", fraction * Decimal::ONE_HUNDRED)
}

pub fn print_horizon(years: u32, report: &HorizonReport) {
    if report.truncated {
        println!(
            "⚠️  Only {} of {} trading days available for a {}-year horizon",
            report.effective_days, report.requested_days, years
        );
    }
}

pub fn print_result(result: &SimulationResult) {
    println!("\n📊 {}", result.strategy);
    let mut table = Table::new();
    table.add_row(row!["Period", format!("{} → {}", result.start_date, result.end_date)]);
    table.add_row(row!["Years", format!("{:.2}", result.elapsed_years)]);
    if result.strategy.is_dca() {
        table.add_row(row![
            "Installments",
            format!("{}/{}", result.executed_installments, result.planned_installments)
        ]);
    }
    table.add_row(row!["Operations", result.operation_count]);
    table.add_row(row!["Capital committed", money(result.capital_committed)]);
    table.add_row(row!["Capital deployed", money(result.capital_deployed)]);
    if result.undeployed_capital > Decimal::ZERO {
        table.add_row(row!["Never deployed", money(result.undeployed_capital)]);
    }
    table.add_row(row!["Average purchase price", money(result.average_purchase_price)]);
    table.add_row(row!["Gross final value", money(result.gross_final_value)]);
    table.add_row(row!["After sale costs", money(result.post_sale_value)]);
    table.add_row(row!["Realized gain", money(result.realized_gain)]);
    table.add_row(row!["Commissions", money(result.costs.total_commission())]);
    table.add_row(row!["Slippage", money(result.costs.total_slippage())]);
    table.add_row(row!["Capital gains tax", money(result.capital_gains_tax.tax)]);
    if let Some(interest) = &result.idle_cash_interest {
        table.add_row(row!["Idle-cash interest", money(interest.earned)]);
        table.add_row(row!["Interest tax", money(interest.tax.tax)]);
    }
    table.add_row(row!["Total costs", money(result.total_costs())]);
    table.add_row(row!["Effective tax rate", pct(result.effective_tax_rate())]);
    table.add_row(row!["Net value", money(result.net_value)]);
    table.add_row(row!["Rentability", pct(result.rentability)]);
    table.add_row(row!["CAGR", pct(result.cagr)]);
    let drawdown = &result.drawdown;
    let peak = drawdown.peak_date.map(|d| d.to_string()).unwrap_or_default();
    let trough = drawdown.trough_date.map(|d| d.to_string()).unwrap_or_default();
    table.add_row(row![
        "Max drawdown",
        format!("{} ({} → {})", pct(drawdown.max_drawdown), peak, trough)
    ]);
    table.printstd();
}

pub fn print_tax(assessment: &TaxAssessment) {
    println!("\n🧾 Tax on a gain of {}", money(assessment.gain));
    if assessment.breakdown.is_empty() {
        println!("No tax due.");
        return;
    }
    let mut table = Table::new();
    table.add_row(row!["Bracket", "Base", "Tax"]);
    for slice in &assessment.breakdown {
        table.add_row(row![
            slice.label,
            money(slice.base_in_bracket),
            money(slice.tax_in_bracket)
        ]);
    }
    table.add_row(row!["Total", money(assessment.gain), money(assessment.tax)]);
    table.printstd();
    println!("Effective rate: {}", pct(assessment.effective_rate()));
}

pub fn print_comparison(cmp: &StrategyComparison) {
    println!("\n🏁 {} vs {}", cmp.first, cmp.second);
    let mut table = Table::new();
    table.add_row(row!["Winner", cmp.winning_strategy()]);
    table.add_row(row!["Rentability difference", pct(cmp.rentability_difference)]);
    table.add_row(row!["Net value difference", money(cmp.net_value_difference)]);
    table.add_row(row!["Cost difference", money(cmp.cost_difference)]);
    table.add_row(row!["Drawdown difference", pct(cmp.drawdown_difference)]);
    table.add_row(row!["Operation difference", cmp.operation_difference]);
    table.printstd();
}
