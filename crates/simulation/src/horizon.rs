//! Investment horizon trimming.
//!
//! A horizon of `n` years keeps the starting close plus `n * 252` trading
//! days. When the history is shorter the whole series is used and the
//! shortfall is reported rather than treated as an error.

use crate::error::SimulationError;
use crate::state::TRADING_DAYS_PER_YEAR;
use lsdca_domain::entities::PriceSeries;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Requested investment horizon in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonWindow {
    pub years: u32,
}

/// What a horizon trim actually kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonReport {
    /// Trading days the horizon asks for.
    pub requested_days: usize,
    /// Trading days available after the starting close.
    pub effective_days: usize,
    pub truncated: bool,
}

impl HorizonWindow {
    #[must_use]
    pub fn new(years: u32) -> Self {
        Self { years }
    }

    /// Trading days the horizon spans.
    #[must_use]
    pub fn trading_days(&self) -> usize {
        self.years as usize * TRADING_DAYS_PER_YEAR
    }

    /// Keeps the first `trading_days() + 1` closes, or everything if fewer.
    #[must_use]
    pub fn apply(&self, series: &PriceSeries) -> (PriceSeries, HorizonReport) {
        let requested_days = self.trading_days();
        let trimmed = series.head(requested_days + 1);
        let effective_days = trimmed.len() - 1;
        let truncated = effective_days < requested_days;
        if truncated {
            warn!(
                years = self.years,
                requested_days, effective_days, "price history shorter than horizon"
            );
        }
        (
            trimmed,
            HorizonReport {
                requested_days,
                effective_days,
                truncated,
            },
        )
    }

    /// Like [`HorizonWindow::apply`] but refuses a history shorter than the
    /// horizon.
    ///
    /// # Errors
    /// Returns [`SimulationError::InsufficientHistory`] when fewer than
    /// `trading_days()` closes exist.
    pub fn apply_strict(&self, series: &PriceSeries) -> Result<PriceSeries, SimulationError> {
        let required = self.trading_days();
        if series.len() < required {
            return Err(SimulationError::InsufficientHistory {
                required,
                available: series.len(),
            });
        }
        Ok(series.head(required + 1))
    }
}
