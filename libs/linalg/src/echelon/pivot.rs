//! Pivot selection.

use crate::matrix::{Matrix, MatrixError, Real};

/// Finds the row that should hold the pivot for `column`, scanning rows `from_row..`.
///
/// A candidate with absolute value exactly one is taken right away. Otherwise the candidate with the smallest
/// nonzero absolute value wins, the first one on ties. `None` means the column is zero from `from_row` down.
pub fn select_pivot_row<T: Real>(
    matrix: &Matrix<T>,
    from_row: usize,
    column: usize,
) -> Result<Option<usize>, MatrixError> {
    let mut best: Option<(usize, T)> = None;
    for row in from_row..matrix.nrows() {
        let value = matrix.entry(row, column)?.abs();
        if value == T::one() {
            return Ok(Some(row));
        }
        if value == T::zero() {
            continue;
        }
        match best {
            Some((_, minimum)) if minimum <= value => {}
            _ => best = Some((row, value)),
        }
    }
    Ok(best.map(|(row, _)| row))
}
