pub mod cost_parameters;
pub mod percentage;
pub mod price;
pub mod simulation_result;

pub use cost_parameters::{CostParameters, TransactionCost};
pub use percentage::Percentage;
pub use price::Price;
pub use simulation_result::{CostBreakdown, IdleCashInterest, SimulationResult, ValuationPoint};
