//! Row operation log.

use crate::matrix::{MatrixError, Real, RowOperand};
use std::fmt;

/// A row operation performed during echelon reduction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(tag = "action"))]
pub enum OperationRecord<T> {
    /// Rows `i` and `j` were exchanged.
    Swap {
        /// First row.
        i: usize,
        /// Second row.
        j: usize,
    },

    /// Row `i` was replaced by `row_j * k + row_i`.
    ScaleAdd {
        /// Replaced row.
        i: usize,
        /// Scaled row.
        j: usize,
        /// Scalar.
        k: T,
    },

    /// Row `i` was replaced by `row_i + row_j`, the pivots cancelled out exactly.
    Sum {
        /// Replaced row.
        i: usize,
        /// Added row.
        j: usize,
    },

    /// The rows at `indices` were moved to the bottom, keeping their relative order.
    DeleteNulls {
        /// Row positions before the move.
        indices: Vec<usize>,
    },
}

impl<T: Real> OperationRecord<T> {
    /// Applies the operation to a matrix or a vector.
    pub fn apply<R: RowOperand<T>>(&self, target: &mut R) -> Result<(), MatrixError> {
        match self {
            Self::Swap { i, j } => target.swap_rows(*i, *j),
            Self::ScaleAdd { i, j, k } => target.scale_add_row(*i, *j, *k),
            Self::Sum { i, j } => target.sum_rows(*i, *j),
            Self::DeleteNulls { indices } => target.move_rows_to_bottom(indices),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for OperationRecord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Swap { i, j } => write!(f, "R{i} <-> R{j}"),
            Self::ScaleAdd { i, j, k } => write!(f, "R{i} = R{j} * {k:?} + R{i}"),
            Self::Sum { i, j } => write!(f, "R{i} = R{i} + R{j}"),
            Self::DeleteNulls { indices } => write!(f, "move {indices:?} to bottom"),
        }
    }
}

/// Ordered record of the row operations that took a matrix to echelon form.
///
/// Records are appended while reducing and consumed once, first in first out, through
/// [take_next][RowOperationLog::take_next]. Consumption only moves a cursor, so the records stay available through
/// [records][RowOperationLog::records] for inspection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowOperationLog<T> {
    /// Rows of the matrix the operations were recorded on.
    nrows: usize,

    /// Recorded operations.
    records: Vec<OperationRecord<T>>,

    /// Next record to hand out.
    #[cfg_attr(feature = "serde", serde(skip))]
    cursor: usize,

    /// Set once [take_next][RowOperationLog::take_next] ran past the last record.
    #[cfg_attr(feature = "serde", serde(skip))]
    exhausted: bool,
}

impl<T> RowOperationLog<T> {
    /// Empty log for a matrix with `nrows` rows.
    pub fn new(nrows: usize) -> Self {
        Self { nrows, records: Vec::new(), cursor: 0, exhausted: false }
    }

    /// Log with the given records, for a matrix with `nrows` rows.
    pub fn from_records(nrows: usize, records: Vec<OperationRecord<T>>) -> Self {
        Self { nrows, records, cursor: 0, exhausted: false }
    }

    pub(crate) fn record(&mut self, operation: OperationRecord<T>) {
        self.records.push(operation);
    }

    /// Takes the next record, `None` once every record was taken.
    pub fn take_next(&mut self) -> Option<&OperationRecord<T>> {
        match self.records.get(self.cursor) {
            Some(record) => {
                self.cursor = self.cursor.saturating_add(1);
                Some(record)
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    /// All records, in recorded order.
    pub fn records(&self) -> &[OperationRecord<T>] {
        &self.records
    }

    /// Rows of the matrix the log was recorded on.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no operations were recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records already taken.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Whether the log was consumed to the end.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
