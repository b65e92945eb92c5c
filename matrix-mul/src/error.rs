//! Error types for matrix-mul operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("round error: {0}")]
    Rounds(#[from] rounds::Error),

    #[error("cannot allocate a {rows}x{cols} matrix")]
    Allocation { rows: usize, cols: usize },

    #[error("matrix dimension mismatch: A is {0}x{1}, B is {2}x{3}")]
    DimensionMismatch(usize, usize, usize, usize),

    #[error("ragged matrix: row {row} has {len} elements, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
}
