//! Matrix and row operations.

pub mod matrix;
pub mod ops;

pub use matrix::{is_null, leading_index, Matrix, MatrixError, Real};
pub use ops::RowOperand;
