//! Linear system solver.

use crate::{
    echelon::{reduce, replay},
    errors::{InconsistentSystemError, SolveError, UnderdeterminedSystemError},
    matrix::{is_null, Matrix, Real},
    rank::echelon_rank,
    systems::substitution::back_substitute,
};
use tracing::debug;

/// A linear system after echelon reduction: the reduced coefficients and the right-hand side transformed by the
/// same row operations.
#[derive(Clone, Debug, PartialEq)]
pub struct ReducedSystem<T: Real> {
    coefficients: Matrix<T>,
    rhs: Vec<T>,
}

impl<T: Real> ReducedSystem<T> {
    /// Reduced coefficient matrix.
    pub fn coefficients(&self) -> &Matrix<T> {
        &self.coefficients
    }

    /// Transformed right-hand side.
    pub fn rhs(&self) -> &[T] {
        &self.rhs
    }

    /// Consumes the system returning the coefficients and right-hand side.
    pub fn into_parts(self) -> (Matrix<T>, Vec<T>) {
        (self.coefficients, self.rhs)
    }

    /// Rank of the coefficient matrix.
    pub fn coefficient_rank(&self) -> usize {
        echelon_rank(&self.coefficients)
    }

    /// Rank of the coefficient matrix augmented with the right-hand side.
    ///
    /// Null coefficient rows are all at the bottom, so the extra column only adds to the rank when one of them
    /// carries a nonzero right-hand side.
    pub fn augmented_rank(&self) -> usize {
        let mut null_rows = self.coefficients.rows().zip(&self.rhs).filter(|(row, _)| is_null(row));
        let extra = null_rows.any(|(_, value)| *value != T::zero());
        self.coefficient_rank().saturating_add(usize::from(extra))
    }

    /// Whether the system has at least one solution.
    pub fn is_consistent(&self) -> bool {
        self.coefficient_rank() == self.augmented_rank()
    }
}

/// Reduces the coefficient matrix to echelon form and replays its log on the right-hand side.
pub fn reduce_system<T: Real>(coefficients: &Matrix<T>, rhs: &[T]) -> Result<ReducedSystem<T>, SolveError> {
    if rhs.len() != coefficients.nrows() {
        return Err(SolveError::DimensionMismatch { expected: coefficients.nrows(), actual: rhs.len() });
    }
    let mut reduced = reduce(coefficients)?;
    let rhs = replay(&mut reduced.log, rhs)?;
    Ok(ReducedSystem { coefficients: reduced.matrix, rhs })
}

/// Solves `coefficients * x = rhs`.
///
/// Fails when the system has no solution or infinitely many, it never returns a partial solution.
pub fn solve<T: Real>(coefficients: &Matrix<T>, rhs: &[T]) -> Result<Vec<T>, SolveError> {
    let system = reduce_system(coefficients, rhs)?;
    let coefficient_rank = system.coefficient_rank();
    let augmented_rank = system.augmented_rank();
    let unknowns = coefficients.ncols();
    debug!(coefficient_rank, augmented_rank, unknowns, "linear system reduced");

    if coefficient_rank != augmented_rank {
        return Err(InconsistentSystemError { coefficient_rank, augmented_rank }.into());
    }
    if coefficient_rank < unknowns {
        return Err(UnderdeterminedSystemError { rank: coefficient_rank, unknowns }.into());
    }
    Ok(back_substitute(&system.coefficients, &system.rhs)?)
}
