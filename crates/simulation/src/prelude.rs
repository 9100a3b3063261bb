//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use lsdca_simulation::prelude::*;
//! ```

// Comparison
pub use crate::comparison::{StrategyComparison, Winner, compare};

// Errors
pub use crate::error::SimulationError;

// Events
pub use crate::event::{EventData, EventLog, SimulationEvent, SimulationEventType};

// Horizon
pub use crate::horizon::{HorizonReport, HorizonWindow};

// Price path generators
pub use crate::price_path::{
    DAILY_TIME_STEP, DeterministicPricePath, GeometricBrownianMotion, PricePathGenerator,
    generate_series, trading_day_series,
};

// Configuration
pub use crate::state::{SimulationConfig, TRADING_DAYS_PER_YEAR};

// Cash-flow models
pub use crate::strategies::{
    CashFlowModel, ContributionSchedule, ContributoryDca, FundedDca, Installment, LumpSum,
    ScheduleContext, TRADING_DAYS_PER_MONTH,
};

// Strategy simulator
pub use crate::strategy_simulator::{
    StrategySimulationResult, simulate, simulate_dca_contributory, simulate_dca_funded,
    simulate_lump_sum, simulate_with_events,
};
