//! Linear systems.

pub mod solver;
pub mod substitution;

pub use crate::errors::{InconsistentSystemError, SolveError, UnderdeterminedSystemError};
pub use solver::{reduce_system, solve, ReducedSystem};
pub use substitution::back_substitute;
