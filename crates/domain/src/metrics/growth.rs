use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Calendar days per year used to turn elapsed days into years.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Compound annual growth rate between two values.
///
/// Returns zero when `initial_value <= 0` or `years <= 0`, and `-1` when the
/// final value is wiped out. `(final / initial)^(1 / years) - 1` otherwise.
#[must_use]
pub fn cagr(initial_value: Decimal, final_value: Decimal, years: f64) -> Decimal {
    if initial_value <= Decimal::ZERO || years <= 0.0 || !years.is_finite() {
        return Decimal::ZERO;
    }
    if final_value <= Decimal::ZERO {
        return Decimal::NEGATIVE_ONE;
    }

    // Fractional exponent: go through f64 as the rest of the metrics do.
    let Some(ratio) = (final_value / initial_value).to_f64() else {
        return Decimal::ZERO;
    };
    let growth = ratio.powf(1.0 / years) - 1.0;
    Decimal::from_f64(growth).unwrap_or(Decimal::ZERO)
}

/// Total return `final / initial - 1`, zero for a non-positive base.
#[must_use]
pub fn simple_return(initial_value: Decimal, final_value: Decimal) -> Decimal {
    if initial_value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    final_value / initial_value - Decimal::ONE
}
