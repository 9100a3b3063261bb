//! Progressive capital-gains taxation.

pub mod calculator;
pub mod schedule;

pub use calculator::{BracketSlice, TaxAssessment, compute_tax};
pub use schedule::{TaxBracket, TaxSchedule};
