use crate::tax::schedule::TaxSchedule;
use crate::value_objects::percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The part of a gain that fell inside one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlice {
    /// Bounds and rate, e.g. `6000-50000 @ 21%`.
    pub label: String,
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Percentage,
    pub base_in_bracket: Decimal,
    pub tax_in_bracket: Decimal,
}

/// Tax owed on one gain stream.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxAssessment {
    pub gain: Decimal,
    pub tax: Decimal,
    /// Ascending by bracket; empty when the gain is not positive.
    pub breakdown: Vec<BracketSlice>,
}

impl TaxAssessment {
    /// Tax over gain, zero for non-positive gains.
    #[must_use]
    pub fn effective_rate(&self) -> Decimal {
        if self.gain <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.tax / self.gain
    }
}

/// Applies a progressive schedule to a realized gain.
///
/// Losses are neither taxed nor credited: a gain `<= 0` yields zero tax and an
/// empty breakdown. Otherwise every bracket, lowest first, takes
/// `min(remaining, width)` of the gain at its marginal rate until the gain is
/// fully allocated.
#[must_use]
pub fn compute_tax(gain: Decimal, schedule: &TaxSchedule) -> TaxAssessment {
    if gain <= Decimal::ZERO {
        return TaxAssessment {
            gain,
            tax: Decimal::ZERO,
            breakdown: Vec::new(),
        };
    }

    let mut remaining = gain;
    let mut tax = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for (lower, bracket) in schedule.bands() {
        let slice = match bracket.upper_bound {
            Some(upper) => remaining.min(upper - lower),
            None => remaining,
        };
        if slice > Decimal::ZERO {
            let slice_tax = slice * bracket.rate.fraction();
            tax += slice_tax;
            breakdown.push(BracketSlice {
                label: bracket_label(lower, bracket.upper_bound, bracket.rate),
                lower_bound: lower,
                upper_bound: bracket.upper_bound,
                rate: bracket.rate,
                base_in_bracket: slice,
                tax_in_bracket: slice_tax,
            });
            remaining -= slice;
        }
        if remaining <= Decimal::ZERO {
            break;
        }
    }

    TaxAssessment {
        gain,
        tax,
        breakdown,
    }
}

impl TaxSchedule {
    /// Shorthand for [`compute_tax`] against this schedule.
    #[must_use]
    pub fn assess(&self, gain: Decimal) -> TaxAssessment {
        compute_tax(gain, self)
    }
}

fn bracket_label(lower: Decimal, upper: Option<Decimal>, rate: Percentage) -> String {
    let rate = rate.as_percent().normalize();
    match upper {
        Some(upper) => format!("{}-{} @ {}%", lower.normalize(), upper.normalize(), rate),
        None => format!("{}+ @ {}%", lower.normalize(), rate),
    }
}
