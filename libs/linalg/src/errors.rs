//! Crate errors.

use crate::matrix::MatrixError;
use thiserror::Error;

/// Echelon reduction error.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum ReductionError {
    /// The reduction loop ran out of iterations before reaching echelon form.
    #[error("reduction did not reach echelon form after {iterations} iterations")]
    Stalled {
        /// Iterations performed.
        iterations: usize,
    },

    /// Matrix error.
    #[error("matrix error: {0}")]
    Matrix(#[from] MatrixError),
}

/// Log replay error.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum ReplayError {
    /// The log was already consumed by a previous replay.
    #[error("row operation log already exhausted")]
    Exhausted,

    /// Replay must start from the first record.
    #[error("row operation log already consumed up to record {0}")]
    PartiallyConsumed(usize),

    /// The vector doesn't have one entry per matrix row.
    #[error("vector has {actual} entries but the log was recorded for {expected} rows")]
    LengthMismatch {
        /// Rows of the reduced matrix.
        expected: usize,
        /// Length of the given vector.
        actual: usize,
    },

    /// Matrix error.
    #[error("matrix error: {0}")]
    Matrix(#[from] MatrixError),
}

/// Back-substitution error.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum SubstitutionError {
    /// A row's leading entry is not on the diagonal.
    #[error("row {row} has no pivot on the diagonal")]
    NotTriangular {
        /// Offending row.
        row: usize,
    },

    /// Matrix error.
    #[error("matrix error: {0}")]
    Matrix(#[from] MatrixError),
}

/// The system has no solution.
#[derive(Error, Debug, Eq, PartialEq)]
#[error("inconsistent system: coefficient rank {coefficient_rank} differs from augmented rank {augmented_rank}")]
pub struct InconsistentSystemError {
    /// Rank of the coefficient matrix.
    pub coefficient_rank: usize,

    /// Rank of the coefficient matrix augmented with the right-hand side.
    pub augmented_rank: usize,
}

/// The system has infinitely many solutions.
#[derive(Error, Debug, Eq, PartialEq)]
#[error("underdetermined system: rank {rank} is lower than the {unknowns} unknowns")]
pub struct UnderdeterminedSystemError {
    /// Rank of the coefficient matrix.
    pub rank: usize,

    /// Number of unknowns.
    pub unknowns: usize,
}

/// Linear system error.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum SolveError {
    /// The right-hand side doesn't have one entry per equation.
    #[error("right-hand side has {actual} entries, expected {expected}")]
    DimensionMismatch {
        /// Rows of the coefficient matrix.
        expected: usize,
        /// Length of the right-hand side.
        actual: usize,
    },

    /// No solution.
    #[error(transparent)]
    Inconsistent(#[from] InconsistentSystemError),

    /// Infinitely many solutions.
    #[error(transparent)]
    Underdetermined(#[from] UnderdeterminedSystemError),

    /// Reduction error.
    #[error("reduction error: {0}")]
    Reduction(#[from] ReductionError),

    /// Replay error.
    #[error("replay error: {0}")]
    Replay(#[from] ReplayError),

    /// Back-substitution error.
    #[error("substitution error: {0}")]
    Substitution(#[from] SubstitutionError),
}
