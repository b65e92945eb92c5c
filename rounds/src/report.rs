//! Round notifications for the output collaborator.

use std::ops::Range;
use std::time::Duration;

/// Summary of a finished round, passed to [`Reporter::round_finished`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub epoch: u64,
    pub size: usize,
    pub workers: usize,
    pub completed: usize,
    pub elapsed: Duration,
}

/// Receives round lifecycle notifications.
///
/// Every method defaults to a no-op. Methods are called from the controller,
/// worker and progress threads, never while the round mutex is held.
pub trait Reporter: Send + Sync + 'static {
    fn round_started(&self, _epoch: u64, _size: usize) {}

    fn worker_finished(&self, _worker: usize, _epoch: u64, _rows: Range<usize>) {}

    fn tick(&self, _epoch: u64, _elapsed: Duration) {}

    fn round_finished(&self, _summary: &RoundSummary) {}
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Reporter for Silent {}
