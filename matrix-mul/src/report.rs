//! Console reporting of round progress through `tracing`.

use std::ops::Range;
use std::time::Duration;

use rounds::{Reporter, RoundSummary};
use tracing::info;

/// Element counts of one round of size `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementCounts {
    /// Elements of A and B together.
    pub inputs: u64,
    /// Elements of C.
    pub outputs: u64,
}

impl ElementCounts {
    pub fn for_size(size: usize) -> Self {
        let size = size as u64;
        let outputs = size.saturating_mul(size);
        Self {
            inputs: outputs.saturating_mul(2),
            outputs,
        }
    }
}

/// Logs every round notification at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundLog;

impl Reporter for RoundLog {
    fn round_started(&self, epoch: u64, size: usize) {
        info!(round = epoch, "generator: creating matrices of size {size}x{size}");
    }

    fn worker_finished(&self, worker: usize, epoch: u64, rows: Range<usize>) {
        if rows.is_empty() {
            info!(round = epoch, "worker {worker} finished with no rows assigned");
        } else {
            info!(
                round = epoch,
                "worker {worker} finished rows {} to {}",
                rows.start,
                rows.end - 1
            );
        }
    }

    fn tick(&self, epoch: u64, elapsed: Duration) {
        info!(round = epoch, "timer: {} seconds passed", elapsed.as_secs());
    }

    fn round_finished(&self, summary: &RoundSummary) {
        let counts = ElementCounts::for_size(summary.size);
        info!(
            round = summary.epoch,
            size = summary.size,
            workers = summary.workers,
            input_elements = counts.inputs,
            output_elements = counts.outputs,
            seconds = summary.elapsed.as_secs_f64(),
            "calculation complete"
        );
    }
}
