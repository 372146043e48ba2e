//! Log replay.

use crate::{echelon::RowOperationLog, errors::ReplayError, matrix::Real};
use tracing::debug;

/// Applies every operation in `log`, in recorded order, to a copy of `vector`.
///
/// The vector is treated as a single column with one entry per matrix row, so the result is what the last column
/// of the augmented matrix would have become. The log is consumed: replaying it a second time fails.
pub fn replay<T: Real>(log: &mut RowOperationLog<T>, vector: &[T]) -> Result<Vec<T>, ReplayError> {
    if log.is_exhausted() {
        return Err(ReplayError::Exhausted);
    }
    if log.position() != 0 {
        return Err(ReplayError::PartiallyConsumed(log.position()));
    }
    if vector.len() != log.nrows() {
        return Err(ReplayError::LengthMismatch { expected: log.nrows(), actual: vector.len() });
    }

    let mut output = vector.to_vec();
    while let Some(operation) = log.take_next() {
        operation.apply(&mut output)?;
    }
    debug!(operations = log.len(), "replayed row operation log");
    Ok(output)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::echelon::OperationRecord;

    fn make_log(nrows: usize, records: Vec<OperationRecord<f64>>) -> RowOperationLog<f64> {
        RowOperationLog::from_records(nrows, records)
    }

    #[test]
    fn every_operation() {
        let mut log = make_log(
            4,
            vec![
                OperationRecord::Swap { i: 0, j: 3 },
                OperationRecord::Swap { i: 1, j: 1 },
                OperationRecord::ScaleAdd { i: 1, j: 0, k: 0.5 },
                OperationRecord::Sum { i: 2, j: 1 },
                OperationRecord::DeleteNulls { indices: vec![0, 2] },
            ],
        );
        let vector = vec![1.0, 2.0, 3.0, 4.0];
        let result = replay(&mut log, &vector).unwrap();
        assert_eq!(result, vec![4.0, 1.0, 4.0, 7.0]);
        assert_eq!(vector, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn empty_log_is_identity() {
        let mut log = make_log(2, Vec::new());
        assert_eq!(replay(&mut log, &[5.0, -1.0]).unwrap(), vec![5.0, -1.0]);
    }

    #[test]
    fn second_replay_fails() {
        let mut log = make_log(2, vec![OperationRecord::Swap { i: 0, j: 1 }]);
        replay(&mut log, &[1.0, 2.0]).unwrap();
        assert_eq!(log.take_next(), None);
        assert_eq!(replay(&mut log, &[1.0, 2.0]).err().unwrap(), ReplayError::Exhausted);
    }

    #[test]
    fn partially_consumed_log() {
        let mut log = make_log(2, vec![OperationRecord::Swap { i: 0, j: 1 }, OperationRecord::Sum { i: 1, j: 0 }]);
        log.take_next();
        assert_eq!(replay(&mut log, &[1.0, 2.0]).err().unwrap(), ReplayError::PartiallyConsumed(1));
    }

    #[test]
    fn length_mismatch() {
        let mut log = make_log(3, vec![OperationRecord::Swap { i: 0, j: 2 }]);
        let result = replay(&mut log, &[1.0, 2.0]).err().unwrap();
        assert_eq!(result, ReplayError::LengthMismatch { expected: 3, actual: 2 });
        // A rejected vector leaves the log untouched.
        assert_eq!(replay(&mut log, &[1.0, 2.0, 3.0]).unwrap(), vec![3.0, 2.0, 1.0]);
    }
}
