use crate::error::DomainError;
use crate::value_objects::percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One band of a progressive schedule.
///
/// The band starts where the previous one ends (zero for the first) and runs
/// up to `upper_bound`; `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<Decimal>,
    pub rate: Percentage,
}

impl TaxBracket {
    pub fn bounded(upper_bound: Decimal, rate: Decimal) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate: Percentage(rate),
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate: Percentage(rate),
        }
    }
}

/// An ordered set of brackets partitioning `[0, inf)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Creates a schedule after checking it partitions the gain axis.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidTaxSchedule`] when the list is empty,
    /// bounds are not strictly increasing and positive, a bracket other than
    /// the last is unbounded, the last is bounded, or a rate lies outside
    /// `[0, 1]`.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, DomainError> {
        if brackets.is_empty() {
            return Err(DomainError::InvalidTaxSchedule(
                "at least one bracket is required".to_string(),
            ));
        }

        let last = brackets.len() - 1;
        let mut previous = Decimal::ZERO;
        for (i, bracket) in brackets.iter().enumerate() {
            let rate = bracket.rate.fraction();
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(DomainError::InvalidTaxSchedule(format!(
                    "bracket {i} has rate {rate} outside [0, 1]"
                )));
            }
            match bracket.upper_bound {
                Some(upper) if i == last => {
                    return Err(DomainError::InvalidTaxSchedule(format!(
                        "last bracket must be unbounded, found limit {upper}"
                    )));
                }
                Some(upper) if upper <= previous => {
                    return Err(DomainError::InvalidTaxSchedule(format!(
                        "bracket {i} upper bound {upper} does not exceed previous bound {previous}"
                    )));
                }
                Some(upper) => previous = upper,
                None if i != last => {
                    return Err(DomainError::InvalidTaxSchedule(format!(
                        "bracket {i} is unbounded but is not the last one"
                    )));
                }
                None => {}
            }
        }

        Ok(Self { brackets })
    }

    /// Spanish savings-income schedule (IRPF base del ahorro), 2023 onwards.
    #[must_use]
    pub fn spain_savings() -> Self {
        Self {
            brackets: vec![
                TaxBracket::bounded(Decimal::from(6_000), Decimal::new(19, 2)),
                TaxBracket::bounded(Decimal::from(50_000), Decimal::new(21, 2)),
                TaxBracket::bounded(Decimal::from(200_000), Decimal::new(23, 2)),
                TaxBracket::bounded(Decimal::from(300_000), Decimal::new(27, 2)),
                TaxBracket::unbounded(Decimal::new(28, 2)),
            ],
        }
    }

    /// Four-bracket savings schedule in force before the 28% band existed.
    #[must_use]
    pub fn spain_savings_legacy() -> Self {
        Self {
            brackets: vec![
                TaxBracket::bounded(Decimal::from(6_000), Decimal::new(19, 2)),
                TaxBracket::bounded(Decimal::from(50_000), Decimal::new(21, 2)),
                TaxBracket::bounded(Decimal::from(200_000), Decimal::new(23, 2)),
                TaxBracket::unbounded(Decimal::new(27, 2)),
            ],
        }
    }

    /// A single unbounded bracket.
    ///
    /// # Errors
    /// Returns an error when `rate` lies outside `[0, 1]`.
    pub fn flat(rate: Percentage) -> Result<Self, DomainError> {
        Self::new(vec![TaxBracket {
            upper_bound: None,
            rate,
        }])
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Iterates `(lower_bound, bracket)` pairs in ascending order.
    pub fn bands(&self) -> impl Iterator<Item = (Decimal, &TaxBracket)> + '_ {
        let lowers = std::iter::once(Decimal::ZERO)
            .chain(self.brackets.iter().filter_map(|b| b.upper_bound));
        lowers.zip(self.brackets.iter())
    }
}

impl Default for TaxSchedule {
    fn default() -> Self {
        Self::spain_savings()
    }
}

impl TryFrom<Vec<TaxBracket>> for TaxSchedule {
    type Error = DomainError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<TaxSchedule> for Vec<TaxBracket> {
    fn from(schedule: TaxSchedule) -> Self {
        schedule.brackets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builtin_schedules_are_valid() {
        for schedule in [TaxSchedule::spain_savings(), TaxSchedule::spain_savings_legacy()] {
            let rebuilt = TaxSchedule::new(schedule.brackets().to_vec()).unwrap();
            assert_eq!(rebuilt, schedule);
        }
    }

    #[test]
    fn test_bands_carry_lower_bounds() {
        let schedule = TaxSchedule::spain_savings();
        let lowers: Vec<Decimal> = schedule.bands().map(|(lower, _)| lower).collect();
        assert_eq!(
            lowers,
            vec![dec!(0), dec!(6000), dec!(50000), dec!(200000), dec!(300000)]
        );
    }

    #[test]
    fn test_rejects_empty_schedule() {
        assert!(matches!(
            TaxSchedule::new(vec![]),
            Err(DomainError::InvalidTaxSchedule(_))
        ));
    }

    #[test]
    fn test_rejects_bounded_last_bracket() {
        let brackets = vec![TaxBracket::bounded(dec!(1000), dec!(0.1))];
        assert!(TaxSchedule::new(brackets).is_err());
    }

    #[test]
    fn test_rejects_unbounded_middle_bracket() {
        let brackets = vec![
            TaxBracket::unbounded(dec!(0.1)),
            TaxBracket::unbounded(dec!(0.2)),
        ];
        assert!(TaxSchedule::new(brackets).is_err());
    }

    #[test]
    fn test_rejects_non_increasing_bounds() {
        let brackets = vec![
            TaxBracket::bounded(dec!(1000), dec!(0.1)),
            TaxBracket::bounded(dec!(1000), dec!(0.2)),
            TaxBracket::unbounded(dec!(0.3)),
        ];
        assert!(TaxSchedule::new(brackets).is_err());
    }

    #[test]
    fn test_rejects_rate_out_of_range() {
        assert!(TaxSchedule::flat(Percentage(dec!(1.5))).is_err());
        assert!(TaxSchedule::flat(Percentage(dec!(-0.1))).is_err());
        assert!(TaxSchedule::flat(Percentage(dec!(0.25))).is_ok());
    }
}
