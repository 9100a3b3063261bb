use super::ValuePoint;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deepest peak-to-trough decline of a value series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawdownReport {
    /// Non-positive fraction, e.g. `-0.5` for a 50% decline.
    pub max_drawdown: Decimal,
    /// High-water mark in effect at the trough.
    pub peak_index: usize,
    pub peak_date: Option<NaiveDate>,
    pub trough_index: usize,
    pub trough_date: Option<NaiveDate>,
}

impl DrawdownReport {
    fn degenerate(start: Option<NaiveDate>) -> Self {
        Self {
            max_drawdown: Decimal::ZERO,
            peak_index: 0,
            peak_date: start,
            trough_index: 0,
            trough_date: start,
        }
    }
}

/// Calculates the maximum drawdown of a value series.
///
/// Drawdown at each point is `(value - running_max) / running_max`. The
/// result is the most negative drawdown, the date it occurred and the date
/// of the high-water mark in effect at that point. The earliest trough wins
/// ties.
///
/// A series with fewer than two positive values has no meaningful drawdown
/// and yields zero, with both dates at the start of the series.
#[must_use]
pub fn max_drawdown(series: &[ValuePoint]) -> DrawdownReport {
    let start = series.first().map(|p| p.date);
    let positives = series.iter().filter(|p| p.value > Decimal::ZERO).count();
    if positives < 2 {
        return DrawdownReport::degenerate(start);
    }

    let mut report = DrawdownReport::degenerate(start);
    let mut running_max = Decimal::ZERO;
    let mut running_max_index = 0;

    for (i, point) in series.iter().enumerate() {
        if point.value > running_max {
            running_max = point.value;
            running_max_index = i;
        }
        if running_max.is_zero() {
            continue;
        }
        let drawdown = (point.value - running_max) / running_max;
        if drawdown < report.max_drawdown {
            report.max_drawdown = drawdown;
            report.trough_index = i;
            report.trough_date = Some(point.date);
            report.peak_index = running_max_index;
            report.peak_date = Some(series[running_max_index].date);
        }
    }

    report
}
