//! Matrix.

use num_traits::Float;
use std::{fmt::Debug, ops::Range};
use thiserror::Error;

/// Real scalar type a [Matrix] can hold.
pub trait Real: Float + Debug {}

impl<T: Float + Debug> Real for T {}

/// Returns the index of the first nonzero entry in a row, or `None` for a null row.
pub fn leading_index<T: Real>(row: &[T]) -> Option<usize> {
    row.iter().position(|value| *value != T::zero())
}

/// Whether every entry in a row is exactly zero.
pub fn is_null<T: Real>(row: &[T]) -> bool {
    leading_index(row).is_none()
}

/// Dense row-major matrix of real numbers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "Vec<Vec<T>>",
        into = "Vec<Vec<T>>",
        bound(serialize = "T: serde::Serialize", deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct Matrix<T: Real> {
    /// Matrix entries, row after row.
    data: Vec<T>,

    /// Number of rows.
    nrows: usize,

    /// Number of columns.
    ncols: usize,
}

impl<T: Real> Matrix<T> {
    /// New matrix from row-major data.
    pub fn new(data: Vec<T>, nrows: usize, ncols: usize) -> Result<Matrix<T>, MatrixError> {
        let n = nrows.checked_mul(ncols).ok_or(MatrixError::Arithmetic)?;
        if n != data.len() {
            return Err(MatrixError::Build(data.len(), n));
        }
        if let Some(index) = data.iter().position(|value| !value.is_finite()) {
            return Err(MatrixError::NonFinite(index));
        }
        Ok(Matrix { data, nrows, ncols })
    }

    /// New matrix from a list of equally sized rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Matrix<T>, MatrixError> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or_default();
        let mut data = Vec::with_capacity(nrows.saturating_mul(ncols));
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(MatrixError::Ragged { row: index, expected: ncols, actual: row.len() });
            }
            data.extend(row);
        }
        Matrix::new(data, nrows, ncols)
    }

    /// Zero matrix.
    pub fn zero(nrows: usize, ncols: usize) -> Matrix<T> {
        Matrix { data: vec![T::zero(); nrows.saturating_mul(ncols)], nrows, ncols }
    }

    /// Identity matrix.
    pub fn identity(n: usize) -> Result<Matrix<T>, MatrixError> {
        let mut m = Matrix::zero(n, n);
        for i in 0..n {
            *m.entry_mut(i, i)? = T::one();
        }
        Ok(m)
    }

    /// Returns the reference to data.
    pub fn data(&self) -> &Vec<T> {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut Vec<T> {
        &mut self.data
    }

    /// Returns the data as a Vec consuming the matrix.
    pub fn to_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns a copy of the matrix as a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        if row >= self.nrows || col >= self.ncols {
            return Err(MatrixError::IndexNotFound);
        }
        row.checked_mul(self.ncols).and_then(|start| start.checked_add(col)).ok_or(MatrixError::Arithmetic)
    }

    pub(crate) fn row_range(&self, row: usize) -> Result<Range<usize>, MatrixError> {
        if row >= self.nrows {
            return Err(MatrixError::IndexNotFound);
        }
        let start = row.checked_mul(self.ncols).ok_or(MatrixError::Arithmetic)?;
        let end = start.checked_add(self.ncols).ok_or(MatrixError::Arithmetic)?;
        Ok(start..end)
    }

    /// Get the matrix entry `M[row,col]`.
    pub fn entry(&self, row: usize, col: usize) -> Result<&T, MatrixError> {
        let index = self.offset(row, col)?;
        self.data.get(index).ok_or(MatrixError::IndexNotFound)
    }

    /// Get the matrix entry `M[row,col]`.
    pub fn entry_mut(&mut self, row: usize, col: usize) -> Result<&mut T, MatrixError> {
        let index = self.offset(row, col)?;
        self.data.get_mut(index).ok_or(MatrixError::IndexNotFound)
    }

    /// Get a row of the matrix.
    pub fn row(&self, row: usize) -> Result<&[T], MatrixError> {
        let range = self.row_range(row)?;
        self.data.get(range).ok_or(MatrixError::IndexNotFound)
    }

    /// Get a mutable row of the matrix.
    pub fn row_mut(&mut self, row: usize) -> Result<&mut [T], MatrixError> {
        let range = self.row_range(row)?;
        self.data.get_mut(range).ok_or(MatrixError::IndexNotFound)
    }

    /// Iterate over the rows of the matrix, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.nrows).filter_map(move |row| self.row(row).ok())
    }

    /// Whether the given row is null.
    pub fn is_null_row(&self, row: usize) -> Result<bool, MatrixError> {
        Ok(is_null(self.row(row)?))
    }

    /// Index of the first nonzero entry of the given row.
    pub fn leading_index(&self, row: usize) -> Result<Option<usize>, MatrixError> {
        Ok(leading_index(self.row(row)?))
    }

    /// Indices of every null row, in ascending order.
    pub fn null_rows(&self) -> Vec<usize> {
        self.rows().enumerate().filter(|(_, row)| is_null(row)).map(|(index, _)| index).collect()
    }

    /// Multiplies the matrix by a column vector.
    pub fn mul_vector(&self, vector: &[T]) -> Result<Vec<T>, MatrixError> {
        if vector.len() != self.ncols {
            return Err(MatrixError::DimensionMismatch(self.ncols, vector.len()));
        }
        Ok(self.rows().map(|row| row.iter().zip(vector).fold(T::zero(), |acc, (a, b)| acc + *a * *b)).collect())
    }
}

impl<T: Real> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(rows)
    }
}

impl<T: Real> From<Matrix<T>> for Vec<Vec<T>> {
    fn from(matrix: Matrix<T>) -> Self {
        matrix.to_rows()
    }
}

/// Matrix Error.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum MatrixError {
    /// Index not found error.
    #[error("index not found")]
    IndexNotFound,

    /// Integer overflow or underflow.
    #[error("integer overflow/underflow")]
    Arithmetic,

    /// Error building matrix.
    #[error("error building matrix, given data has {0} entries which does not match nrows x ncols = {1}")]
    Build(usize, usize),

    /// Rows of different lengths.
    #[error("row {row} has {actual} entries, expected {expected}")]
    Ragged {
        /// Offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },

    /// NaN or infinite entry.
    #[error("entry {0} is not a finite number")]
    NonFinite(usize),

    /// Operand dimensions don't agree.
    #[error("dimension mismatch, expected {0} entries but got {1}")]
    DimensionMismatch(usize, usize),

    /// The same row was named twice in a reordering.
    #[error("row {0} named more than once")]
    DuplicateIndex(usize),
}
