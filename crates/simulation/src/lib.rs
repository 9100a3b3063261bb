//! Strategy simulation for lump sum and dollar-cost averaging.
//!
//! The simulator is synchronous and side-effect free: every call is a pure
//! function of the price series, the cash-flow model and the config.

pub mod comparison;
pub mod error;
pub mod event;
pub mod horizon;
pub mod prelude;
pub mod price_path;
pub mod state;
pub mod strategies;
pub mod strategy_simulator;

pub use error::SimulationError;
