//! Echelon reducer.

use crate::{
    echelon::{config::ReducerConfig, log::OperationRecord, pivot::select_pivot_row, RowOperationLog},
    errors::ReductionError,
    matrix::{leading_index, Matrix, MatrixError, Real},
};
use tracing::{debug, trace};

/// A matrix in echelon form together with the operations that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct EchelonForm<T: Real> {
    /// Reduced matrix.
    pub matrix: Matrix<T>,

    /// Operations that took the input to `matrix`, in order.
    pub log: RowOperationLog<T>,
}

/// Checks whether a matrix is in echelon form.
///
/// Every non-null row must start strictly to the right of the row above it and null rows must all be at the
/// bottom.
pub fn is_echelon_form<T: Real>(matrix: &Matrix<T>) -> bool {
    let mut previous = None;
    let mut seen_null = false;
    for row in matrix.rows() {
        match leading_index(row) {
            None => seen_null = true,
            Some(_) if seen_null => return false,
            Some(leading) => {
                if previous.is_some_and(|previous| leading <= previous) {
                    return false;
                }
                previous = Some(leading);
            }
        }
    }
    true
}

/// Reduces a matrix to echelon form with the default configuration.
pub fn reduce<T: Real>(matrix: &Matrix<T>) -> Result<EchelonForm<T>, ReductionError> {
    reduce_with_config(matrix, &ReducerConfig::default())
}

/// Reduces a matrix to echelon form, recording every row operation.
///
/// The input matrix is left untouched, the reduction works on its own copy.
pub fn reduce_with_config<T: Real>(
    matrix: &Matrix<T>,
    config: &ReducerConfig,
) -> Result<EchelonForm<T>, ReductionError> {
    let mut reducer = Reducer::new(matrix.clone(), config);
    reducer.run()?;
    debug!(
        rows = reducer.matrix.nrows(),
        columns = reducer.matrix.ncols(),
        iterations = reducer.iterations,
        operations = reducer.log.len(),
        "matrix reduced to echelon form"
    );
    Ok(EchelonForm { matrix: reducer.matrix, log: reducer.log })
}

struct Reducer<T: Real> {
    matrix: Matrix<T>,
    log: RowOperationLog<T>,
    row: usize,
    column: usize,
    iterations: usize,
    max_iterations: usize,
}

impl<T: Real> Reducer<T> {
    fn new(matrix: Matrix<T>, config: &ReducerConfig) -> Self {
        let max_iterations = config.iteration_limit(matrix.nrows(), matrix.ncols());
        let log = RowOperationLog::new(matrix.nrows());
        Self { matrix, log, row: 0, column: 0, iterations: 0, max_iterations }
    }

    fn run(&mut self) -> Result<(), ReductionError> {
        while !is_echelon_form(&self.matrix) {
            if self.iterations >= self.max_iterations {
                return Err(ReductionError::Stalled { iterations: self.iterations });
            }
            self.iterations = self.iterations.saturating_add(1);
            trace!(row = self.row, column = self.column, "reduction step");

            self.compact_null_rows()?;
            let found = self.position_pivot()?;
            if found {
                self.eliminate_below()?;
            }
            self.advance(found);
        }
        Ok(())
    }

    fn apply(&mut self, operation: OperationRecord<T>) -> Result<(), MatrixError> {
        operation.apply(&mut self.matrix)?;
        trace!("{operation}");
        self.log.record(operation);
        Ok(())
    }

    fn compact_null_rows(&mut self) -> Result<(), MatrixError> {
        let indices = self.matrix.null_rows();
        let nrows = self.matrix.nrows();
        // Nothing to record when the null rows already are the bottom rows, or there are none.
        if indices.iter().copied().eq(nrows.saturating_sub(indices.len())..nrows) {
            return Ok(());
        }
        self.apply(OperationRecord::DeleteNulls { indices })
    }

    /// Moves the pivot row for the current column into the current row, returns whether there is a pivot.
    fn position_pivot(&mut self) -> Result<bool, MatrixError> {
        let Some(pivot) = select_pivot_row(&self.matrix, self.row, self.column)? else {
            return Ok(false);
        };
        if pivot != self.row {
            self.apply(OperationRecord::Swap { i: self.row, j: pivot })?;
        }
        Ok(true)
    }

    fn eliminate_below(&mut self) -> Result<(), MatrixError> {
        let (row, column) = (self.row, self.column);
        let x = *self.matrix.entry(row, column)?;
        for j in row.saturating_add(1)..self.matrix.nrows() {
            let y = *self.matrix.entry(j, column)?;
            if y == T::zero() {
                continue;
            }
            let operation = if x == -y {
                OperationRecord::Sum { i: j, j: row }
            } else {
                OperationRecord::ScaleAdd { i: j, j: row, k: -y / x }
            };
            self.apply(operation)?;
            // x * (-y / x) + y may round to a tiny residue instead of zero.
            *self.matrix.entry_mut(j, column)? = T::zero();
        }
        Ok(())
    }

    /// A column without pivot is skipped without using up a row.
    fn advance(&mut self, found_pivot: bool) {
        if found_pivot {
            self.row = self.row.saturating_add(1).min(self.matrix.nrows().saturating_sub(2));
        }
        self.column = self.column.saturating_add(1).min(self.matrix.ncols().saturating_sub(1));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{echelon::replay, matrix::RowOperand};

    fn make_matrix(rows: &[&[f64]]) -> Matrix<f64> {
        Matrix::from_rows(rows.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    #[test]
    fn echelon_predicate() {
        assert!(is_echelon_form(&make_matrix(&[&[1.0, 2.0, 3.0], &[0.0, 2.0, 6.0], &[0.0, 0.0, 0.0]])));
        assert!(is_echelon_form(&make_matrix(&[&[0.0, 1.0, 0.0], &[0.0, 0.0, 4.0]])));
        assert!(is_echelon_form(&make_matrix(&[&[0.0, 0.0], &[0.0, 0.0]])));
        assert!(is_echelon_form(&make_matrix(&[&[3.0, 0.0]])));
        assert!(is_echelon_form(&Matrix::<f64>::zero(0, 0)));
        assert!(!is_echelon_form(&make_matrix(&[&[1.0, 0.0], &[0.0, 0.0], &[0.0, 1.0]])));
        assert!(!is_echelon_form(&make_matrix(&[&[0.0, 1.0], &[1.0, 0.0]])));
        assert!(!is_echelon_form(&make_matrix(&[&[1.0, 1.0], &[2.0, 1.0]])));
    }

    #[test]
    fn already_reduced() {
        let matrix = make_matrix(&[&[1.0, -2.0, 3.0], &[0.0, 1.0, -2.0], &[0.0, 0.0, 1.0]]);
        let result = reduce(&matrix).unwrap();
        assert_eq!(result.matrix, matrix);
        assert!(result.log.is_empty());
    }

    #[test]
    fn zero_matrix() {
        let matrix = Matrix::<f64>::zero(3, 4);
        let result = reduce(&matrix).unwrap();
        assert_eq!(result.matrix, matrix);
        assert!(result.log.is_empty());
    }

    #[test]
    fn input_is_not_mutated() {
        let matrix = make_matrix(&[&[2.0, 1.0], &[4.0, 3.0]]);
        let copy = matrix.clone();
        reduce(&matrix).unwrap();
        assert_eq!(matrix, copy);
    }

    #[test]
    fn scale_add_elimination() {
        let matrix = make_matrix(&[&[1.0, -1.0, 1.0], &[0.0, 1.0, 0.0], &[1.0, 1.0, 0.0]]);
        let result = reduce(&matrix).unwrap();
        assert_eq!(result.matrix, make_matrix(&[&[1.0, -1.0, 1.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, -1.0]]));
        assert_eq!(
            result.log.records(),
            &[OperationRecord::ScaleAdd { i: 2, j: 0, k: -1.0 }, OperationRecord::ScaleAdd { i: 2, j: 1, k: -2.0 }]
        );
    }

    #[test]
    fn exact_cancellation_is_a_sum() {
        let matrix = make_matrix(&[&[1.0, 2.0, 3.0, 0.0], &[-1.0, 2.0, -3.0, 1.0], &[2.0, 0.0, 6.0, -1.0]]);
        let result = reduce(&matrix).unwrap();
        assert_eq!(
            result.matrix,
            make_matrix(&[&[1.0, 2.0, 3.0, 0.0], &[0.0, 4.0, 0.0, 1.0], &[0.0, 0.0, 0.0, 0.0]])
        );
        assert_eq!(
            result.log.records(),
            &[
                OperationRecord::Sum { i: 1, j: 0 },
                OperationRecord::ScaleAdd { i: 2, j: 0, k: -2.0 },
                OperationRecord::Sum { i: 2, j: 1 },
            ]
        );
    }

    #[test]
    fn swaps_and_null_rows() {
        let matrix =
            make_matrix(&[&[0.0, 0.0, 6.0], &[-1.0, -2.0, -3.0], &[1.0, 2.0, 3.0], &[0.0, 2.0, 6.0], &[2.0, 0.0, -6.0]]);
        let result = reduce(&matrix).unwrap();
        assert_eq!(
            result.matrix,
            make_matrix(&[
                &[-1.0, -2.0, -3.0],
                &[0.0, 2.0, 6.0],
                &[0.0, 0.0, 6.0],
                &[0.0, 0.0, 0.0],
                &[0.0, 0.0, 0.0]
            ])
        );
        assert_eq!(
            result.log.records(),
            &[
                OperationRecord::Swap { i: 0, j: 1 },
                OperationRecord::Sum { i: 2, j: 0 },
                OperationRecord::ScaleAdd { i: 4, j: 0, k: 2.0 },
                OperationRecord::DeleteNulls { indices: vec![2] },
                OperationRecord::Swap { i: 1, j: 2 },
                OperationRecord::ScaleAdd { i: 3, j: 1, k: 2.0 },
            ]
        );
    }

    #[test]
    fn leading_null_rows_are_moved_down() {
        let matrix = make_matrix(&[&[0.0, 0.0], &[1.0, 2.0], &[0.0, 0.0], &[3.0, 4.0]]);
        let result = reduce(&matrix).unwrap();
        assert_eq!(result.matrix, make_matrix(&[&[1.0, 2.0], &[0.0, -2.0], &[0.0, 0.0], &[0.0, 0.0]]));
        assert_eq!(
            result.log.records(),
            &[OperationRecord::DeleteNulls { indices: vec![0, 2] }, OperationRecord::ScaleAdd { i: 1, j: 0, k: -3.0 }]
        );
    }

    #[test]
    fn skips_columns_without_pivot() {
        let matrix = make_matrix(&[&[1.0, 1.0, 1.0, 1.0], &[0.0, 0.0, 1.0, 1.0], &[0.0, 0.0, 1.0, 2.0], &[0.0, 0.0, 0.0, 0.0]]);
        let result = reduce(&matrix).unwrap();
        assert!(is_echelon_form(&result.matrix));
        assert_eq!(
            result.matrix,
            make_matrix(&[&[1.0, 1.0, 1.0, 1.0], &[0.0, 0.0, 1.0, 1.0], &[0.0, 0.0, 0.0, 1.0], &[0.0, 0.0, 0.0, 0.0]])
        );
    }

    #[test]
    fn wide_and_tall_matrices() {
        let wide = make_matrix(&[&[0.0, 2.0, 4.0, 1.0, 0.0], &[0.0, 1.0, 3.0, 0.0, 5.0]]);
        assert!(is_echelon_form(&reduce(&wide).unwrap().matrix));

        let tall = make_matrix(&[&[2.0], &[4.0], &[0.0], &[-6.0]]);
        let result = reduce(&tall).unwrap();
        assert_eq!(result.matrix, make_matrix(&[&[2.0], &[0.0], &[0.0], &[0.0]]));
    }

    #[test]
    fn log_reproduces_matrix() {
        let matrix = make_matrix(&[&[2.0, 1.0, -1.0], &[-3.0, -1.0, 2.0], &[-2.0, 1.0, 2.0], &[4.0, 2.0, -2.0]]);
        let result = reduce(&matrix).unwrap();
        let mut replayed = matrix.clone();
        for record in result.log.records() {
            record.apply(&mut replayed).unwrap();
        }
        for (replayed, reduced) in replayed.rows().zip(result.matrix.rows()) {
            for (a, b) in replayed.iter().zip(reduced) {
                assert!((a - b).abs() < 1e-12);
            }
        }
        assert_eq!(replayed.row_count(), result.matrix.nrows());
    }

    #[test]
    fn replay_matches_reduction() {
        let matrix = make_matrix(&[&[2.0, 1.0, -1.0], &[-3.0, -1.0, 2.0], &[-2.0, 1.0, 2.0]]);
        let mut result = reduce(&matrix).unwrap();
        let rhs = replay(&mut result.log, &[8.0, -11.0, -3.0]).unwrap();
        assert_eq!(result.matrix, make_matrix(&[&[2.0, 1.0, -1.0], &[0.0, 0.5, 0.5], &[0.0, 0.0, -1.0]]));
        assert_eq!(rhs, vec![8.0, 1.0, 1.0]);
    }

    #[test]
    fn stalls_on_iteration_limit() {
        let matrix = make_matrix(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let result = reduce_with_config(&matrix, &ReducerConfig { max_iterations: Some(0) }).err().unwrap();
        assert_eq!(result, ReductionError::Stalled { iterations: 0 });
    }
}
