//! Matrix rank.

use crate::{
    echelon::reduce,
    errors::ReductionError,
    matrix::{is_null, Matrix, Real},
};

/// Rank of a matrix already in echelon form: its number of non-null rows.
pub fn echelon_rank<T: Real>(matrix: &Matrix<T>) -> usize {
    matrix.rows().filter(|row| !is_null(row)).count()
}

/// Rank of any matrix, reducing it to echelon form first.
pub fn rank<T: Real>(matrix: &Matrix<T>) -> Result<usize, ReductionError> {
    let reduced = reduce(matrix)?;
    Ok(echelon_rank(&reduced.matrix))
}
