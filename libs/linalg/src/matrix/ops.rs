//! Matrix Operations

use crate::matrix::{Matrix, MatrixError, Real};
use std::ops::Mul;

/// Elementary row operations.
///
/// Implemented both for [Matrix], where a row is a row of the matrix, and for `Vec<T>`, where a row is a single
/// entry. Reduction applies operations to the matrix and replay applies the very same operations to a right-hand
/// side vector, so both sides go through the same arithmetic.
pub trait RowOperand<T: Real> {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Exchange rows `i` and `j`.
    fn swap_rows(&mut self, i: usize, j: usize) -> Result<(), MatrixError>;

    /// Replace row `i` with `row_j * k + row_i`.
    fn scale_add_row(&mut self, i: usize, j: usize, k: T) -> Result<(), MatrixError>;

    /// Replace row `i` with `row_i + row_j`.
    fn sum_rows(&mut self, i: usize, j: usize) -> Result<(), MatrixError>;

    /// Remove the rows at `indices` and append them at the bottom, in the order given.
    fn move_rows_to_bottom(&mut self, indices: &[usize]) -> Result<(), MatrixError>;
}

/// Computes the row order after moving `indices` to the bottom of `len` rows.
fn bottom_order(len: usize, indices: &[usize]) -> Result<Vec<usize>, MatrixError> {
    let mut moved = vec![false; len];
    for &index in indices {
        let flag = moved.get_mut(index).ok_or(MatrixError::IndexNotFound)?;
        if *flag {
            return Err(MatrixError::DuplicateIndex(index));
        }
        *flag = true;
    }
    let kept = moved.iter().enumerate().filter(|(_, moved)| !**moved).map(|(index, _)| index);
    Ok(kept.chain(indices.iter().copied()).collect())
}

impl<T: Real> RowOperand<T> for Matrix<T> {
    fn row_count(&self) -> usize {
        self.nrows()
    }

    fn swap_rows(&mut self, i: usize, j: usize) -> Result<(), MatrixError> {
        let (low, high) = (i.min(j), i.max(j));
        let low = self.row_range(low)?;
        let high = self.row_range(high)?;
        if low == high {
            return Ok(());
        }
        let (head, tail) = self.data_mut().split_at_mut(high.start);
        let upper = head.get_mut(low).ok_or(MatrixError::IndexNotFound)?;
        let lower = tail.get_mut(..high.len()).ok_or(MatrixError::IndexNotFound)?;
        upper.swap_with_slice(lower);
        Ok(())
    }

    fn scale_add_row(&mut self, i: usize, j: usize, k: T) -> Result<(), MatrixError> {
        let source = self.row(j)?.to_vec();
        for (target, source) in self.row_mut(i)?.iter_mut().zip(source) {
            *target = source * k + *target;
        }
        Ok(())
    }

    fn sum_rows(&mut self, i: usize, j: usize) -> Result<(), MatrixError> {
        let source = self.row(j)?.to_vec();
        for (target, source) in self.row_mut(i)?.iter_mut().zip(source) {
            *target = *target + source;
        }
        Ok(())
    }

    fn move_rows_to_bottom(&mut self, indices: &[usize]) -> Result<(), MatrixError> {
        let order = bottom_order(self.nrows(), indices)?;
        let mut data = Vec::with_capacity(self.data().len());
        for row in order {
            data.extend_from_slice(self.row(row)?);
        }
        *self.data_mut() = data;
        Ok(())
    }
}

impl<T: Real> RowOperand<T> for Vec<T> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn swap_rows(&mut self, i: usize, j: usize) -> Result<(), MatrixError> {
        if i >= self.len() || j >= self.len() {
            return Err(MatrixError::IndexNotFound);
        }
        self.swap(i, j);
        Ok(())
    }

    fn scale_add_row(&mut self, i: usize, j: usize, k: T) -> Result<(), MatrixError> {
        let source = *self.get(j).ok_or(MatrixError::IndexNotFound)?;
        let target = self.get_mut(i).ok_or(MatrixError::IndexNotFound)?;
        *target = source * k + *target;
        Ok(())
    }

    fn sum_rows(&mut self, i: usize, j: usize) -> Result<(), MatrixError> {
        let source = *self.get(j).ok_or(MatrixError::IndexNotFound)?;
        let target = self.get_mut(i).ok_or(MatrixError::IndexNotFound)?;
        *target = *target + source;
        Ok(())
    }

    fn move_rows_to_bottom(&mut self, indices: &[usize]) -> Result<(), MatrixError> {
        let order = bottom_order(self.len(), indices)?;
        let reordered = order
            .into_iter()
            .map(|index| self.get(index).copied().ok_or(MatrixError::IndexNotFound))
            .collect::<Result<Vec<_>, _>>()?;
        *self = reordered;
        Ok(())
    }
}

impl<T: Real> Mul<&Matrix<T>> for Matrix<T> {
    type Output = Result<Matrix<T>, MatrixError>;

    /// Naive matrix multiplication, A: MxK * B: KxN -> C: MxN, O(KMN).
    fn mul(self, other: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        if self.ncols() != other.nrows() {
            return Err(MatrixError::DimensionMismatch(self.ncols(), other.nrows()));
        }
        let mut out = Matrix::<T>::zero(self.nrows(), other.ncols());
        for row in 0..self.nrows() {
            for col in 0..other.ncols() {
                let oi = out.entry_mut(row, col)?;
                for i in 0..self.ncols() {
                    let li = self.entry(row, i)?;
                    let ri = other.entry(i, col)?;
                    *oi = *oi + *ri * *li;
                }
            }
        }
        Ok(out)
    }
}
