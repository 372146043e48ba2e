//! Linear algebra over real matrices: echelon reduction with a replayable row operation log, rank and linear
//! system solving.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    //clippy::arithmetic_side_effects, // fires on every float expression in the elimination loops
    clippy::iterator_step_by_zero,
    clippy::invalid_regex,
    clippy::string_slice,
    clippy::unimplemented,
    clippy::todo
)]
#![allow(clippy::module_inception)]

pub mod echelon;
pub mod errors;
pub mod matrix;
pub mod rank;
pub mod systems;

pub use echelon::{is_echelon_form, reduce, replay, EchelonForm, OperationRecord, RowOperationLog};
pub use matrix::{Matrix, MatrixError, Real};
pub use rank::{echelon_rank, rank};
pub use systems::{solve, SolveError};
