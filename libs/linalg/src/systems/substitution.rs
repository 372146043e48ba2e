//! Back-substitution.

use crate::{
    errors::SubstitutionError,
    matrix::{is_null, leading_index, Matrix, MatrixError, Real},
};

/// Solves an echelon system whose first `ncols` rows form an upper triangular block, bottom row first.
///
/// Pivots are divided out explicitly, they don't need to be normalized to one. Rows below the triangular block
/// must be null.
pub fn back_substitute<T: Real>(matrix: &Matrix<T>, rhs: &[T]) -> Result<Vec<T>, SubstitutionError> {
    let unknowns = matrix.ncols();
    if rhs.len() != matrix.nrows() {
        return Err(MatrixError::DimensionMismatch(matrix.nrows(), rhs.len()).into());
    }
    if matrix.nrows() < unknowns {
        return Err(SubstitutionError::NotTriangular { row: matrix.nrows() });
    }
    for row in unknowns..matrix.nrows() {
        if !is_null(matrix.row(row)?) {
            return Err(SubstitutionError::NotTriangular { row });
        }
    }

    let mut solution = vec![T::zero(); unknowns];
    for row in (0..unknowns).rev() {
        let coefficients = matrix.row(row)?;
        if leading_index(coefficients) != Some(row) {
            return Err(SubstitutionError::NotTriangular { row });
        }
        let pivot = *coefficients.get(row).ok_or(MatrixError::IndexNotFound)?;
        let known = coefficients.iter().zip(solution.iter()).skip(row.saturating_add(1));
        let value = known.fold(*rhs.get(row).ok_or(MatrixError::IndexNotFound)?, |acc, (a, x)| acc - *a * *x);
        *solution.get_mut(row).ok_or(MatrixError::IndexNotFound)? = value / pivot;
    }
    Ok(solution)
}
