//! Domain model for the lump sum vs dollar-cost averaging backtester.
//!
//! This crate holds everything the simulation engine computes with but
//! nothing that drives a simulation:
//! - Price series and cost parameters
//! - Progressive capital-gains tax schedules and the tax calculator
//! - Risk metrics (maximum drawdown, CAGR)
//! - The immutable simulation result record

/// Shared enumerations.
pub mod enums;
/// Price series entities.
pub mod entities;
/// Precondition errors.
pub mod error;
/// Drawdown and growth metrics.
pub mod metrics;
/// Progressive tax schedules.
pub mod tax;
/// Value objects.
pub mod value_objects;

pub use error::DomainError;
