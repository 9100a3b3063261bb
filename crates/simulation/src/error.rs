use lsdca_domain::DomainError;
use thiserror::Error;

/// Errors a simulation can fail with before it starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error(transparent)]
    Precondition(#[from] DomainError),

    #[error("price history too short: {required} trading days required, {available} available")]
    InsufficientHistory { required: usize, available: usize },
}
