//! Echelon form reduction.
//!
//! [reduce] takes a matrix to row echelon form and returns, next to the reduced matrix, a [RowOperationLog] with
//! every row operation it performed. [replay] applies that log to a vector, which keeps the right-hand side of a
//! linear system in sync with its coefficient matrix without building the augmented matrix.

pub mod config;
pub mod log;
pub mod pivot;
pub mod reducer;
pub mod replay;

pub use config::ReducerConfig;
pub use log::{OperationRecord, RowOperationLog};
pub use pivot::select_pivot_row;
pub use reducer::{is_echelon_form, reduce, reduce_with_config, EchelonForm};
pub use replay::replay;
