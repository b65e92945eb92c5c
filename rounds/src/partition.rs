//! Row partitioning across the worker pool.

use std::ops::Range;

/// Returns the contiguous rows of an `n`-row round owned by worker `id`.
///
/// Every worker gets `n / workers` rows; the last one also takes the
/// remainder, so the ranges of ids `0..workers` partition `0..n` exactly.
/// With more workers than rows the leading workers get empty ranges.
pub fn row_range(id: usize, workers: usize, n: usize) -> Range<usize> {
    debug_assert!(workers > 0 && id < workers);

    let rows_per_worker = n / workers;
    let start = id * rows_per_worker;
    let end = if id == workers - 1 {
        n
    } else {
        start + rows_per_worker
    };

    start..end
}
