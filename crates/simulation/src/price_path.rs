//! Synthetic price paths for demos and property tests.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use lsdca_domain::DomainError;
use lsdca_domain::entities::{PricePoint, PriceSeries};
use lsdca_domain::value_objects::price::Price;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// One year of trading days as a GBM time step.
pub const DAILY_TIME_STEP: f64 = 1.0 / 252.0;

pub trait PricePathGenerator {
    /// Initial close followed by `steps` generated closes.
    fn generate(&mut self, steps: usize) -> Vec<Price>;
}

pub struct GeometricBrownianMotion {
    pub initial_price: Decimal,
    pub drift: f64,      // annualized drift (mu)
    pub volatility: f64, // annualized volatility (sigma)
    pub time_step: f64,  // time step in years (dt), 1/252 for trading days
    rng: StdRng,
}

impl GeometricBrownianMotion {
    pub fn new(initial_price: Decimal, drift: f64, volatility: f64, time_step: f64) -> Self {
        Self {
            initial_price,
            drift,
            volatility,
            time_step,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible paths for a given seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl PricePathGenerator for GeometricBrownianMotion {
    fn generate(&mut self, steps: usize) -> Vec<Price> {
        let mut prices = Vec::with_capacity(steps + 1);
        prices.push(Price::new(self.initial_price));

        let dt = self.time_step;
        let drift_term = (self.drift - 0.5 * self.volatility.powi(2)) * dt;
        let vol_term = self.volatility * dt.sqrt();

        let mut current_price = self.initial_price.to_f64().unwrap_or(0.0);
        let mut last = self.initial_price;

        for _ in 0..steps {
            let z: f64 = StandardNormal.sample(&mut self.rng);
            current_price *= (drift_term + vol_term * z).exp();

            // Keep the previous close if the f64 value does not survive the
            // trip back, so the path stays strictly positive.
            let p = Decimal::from_f64(current_price)
                .map(|p| p.round_dp(6))
                .filter(|p| *p > Decimal::ZERO)
                .unwrap_or(last);
            last = p;
            prices.push(Price::new(p));
        }

        prices
    }
}

pub struct DeterministicPricePath {
    pub prices: Vec<Price>,
}

impl DeterministicPricePath {
    pub fn from_closes(closes: &[Decimal]) -> Self {
        Self {
            prices: closes.iter().copied().map(Price::new).collect(),
        }
    }
}

impl PricePathGenerator for DeterministicPricePath {
    fn generate(&mut self, steps: usize) -> Vec<Price> {
        self.prices.iter().take(steps + 1).copied().collect()
    }
}

/// Next weekday on or after `date`.
fn roll_to_weekday(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.checked_add_days(Days::new(2)),
        Weekday::Sun => date.checked_add_days(Days::new(1)),
        _ => Some(date),
    }
}

/// Dates closes on consecutive weekdays starting at `start` (rolled forward
/// to a weekday).
///
/// # Errors
/// Returns an error for an empty or non-positive path.
pub fn trading_day_series(start: NaiveDate, prices: &[Price]) -> Result<PriceSeries, DomainError> {
    let mut points = Vec::with_capacity(prices.len());
    let mut date = roll_to_weekday(start);
    for (index, price) in prices.iter().enumerate() {
        let day = date.ok_or(DomainError::NonMonotonicTimestamps { index })?;
        points.push(PricePoint::new(day, *price));
        date = day
            .checked_add_days(Days::new(1))
            .and_then(roll_to_weekday);
    }
    PriceSeries::new(points)
}

/// Generates `steps` closes after the initial one and dates them on weekdays.
///
/// # Errors
/// See [`trading_day_series`].
pub fn generate_series<G>(
    generator: &mut G,
    start: NaiveDate,
    steps: usize,
) -> Result<PriceSeries, DomainError>
where
    G: PricePathGenerator + ?Sized,
{
    trading_day_series(start, &generator.generate(steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_gbm_generation() {
        let initial = Decimal::from(100);
        let mut gbm = GeometricBrownianMotion::new(initial, 0.0, 0.2, DAILY_TIME_STEP);
        let path = gbm.generate(10);

        assert_eq!(path.len(), 11); // initial + 10 steps
        assert_eq!(path[0].value, initial);
        assert!(path.iter().all(Price::is_positive));
        assert!(!path.iter().all(|p| p.value == initial));
    }

    #[test]
    fn test_gbm_seed_is_reproducible() {
        let a = GeometricBrownianMotion::new(dec!(50), 0.07, 0.3, DAILY_TIME_STEP)
            .with_seed(42)
            .generate(100);
        let b = GeometricBrownianMotion::new(dec!(50), 0.07, 0.3, DAILY_TIME_STEP)
            .with_seed(42)
            .generate(100);
        let c = GeometricBrownianMotion::new(dec!(50), 0.07, 0.3, DAILY_TIME_STEP)
            .with_seed(7)
            .generate(100);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_volatility_without_drift_is_flat() {
        let path = GeometricBrownianMotion::new(dec!(10), 0.0, 0.0, DAILY_TIME_STEP)
            .with_seed(1)
            .generate(5);
        assert!(path.iter().all(|p| p.value == dec!(10)));
    }

    #[test]
    fn test_trading_days_skip_weekends() {
        // 2024-01-05 is a Friday.
        let start = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let mut path = DeterministicPricePath::from_closes(&[dec!(1), dec!(2), dec!(3)]);
        let series = generate_series(&mut path, start, 2).unwrap();
        let dates: Vec<_> = series.dates().collect();
        assert_eq!(
            dates,
            vec![
                start,
                NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
            ]
        );
    }

    #[test]
    fn test_weekend_start_rolls_forward() {
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let series = trading_day_series(saturday, &[Price::new(dec!(5))]).unwrap();
        assert_eq!(series.first().date.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_deterministic_path_truncates_to_steps() {
        let mut path = DeterministicPricePath::from_closes(&[dec!(1), dec!(2), dec!(3), dec!(4)]);
        assert_eq!(path.generate(1).len(), 2);
        assert_eq!(path.generate(10).len(), 4);
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            trading_day_series(start, &[]),
            Err(DomainError::EmptyPriceSeries)
        );
    }
}
