//! Per-round heartbeat thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::{Reporter, Result};

/// Emits [`Reporter::tick`] once per interval while a round is in flight.
///
/// Each round gets its own reporter; the controller stops the previous one
/// before starting the next, so reporters never overlap.
pub struct ProgressReporter {
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    /// Spawns the heartbeat thread for round `epoch`, which began at `started`.
    pub fn start(
        epoch: u64,
        started: Instant,
        interval: Duration,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let handle = thread::Builder::new()
            .name(format!("round-progress-{epoch}"))
            .spawn(move || heartbeat(epoch, started, interval, &flag, reporter.as_ref()))?;

        Ok(Self {
            cancelled,
            handle: Some(handle),
        })
    }

    /// Cancels the heartbeat and waits for the thread to exit.
    ///
    /// No tick is emitted once this returns.
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                debug!("progress reporter panicked");
            }
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.halt();
    }
}

fn heartbeat(
    epoch: u64,
    started: Instant,
    interval: Duration,
    cancelled: &AtomicBool,
    reporter: &dyn Reporter,
) {
    let mut next = started + interval;

    loop {
        if cancelled.load(Ordering::Acquire) {
            break;
        }

        let now = Instant::now();
        if now < next {
            // Parking may wake early; the deadline is re-checked above.
            thread::park_timeout(next - now);
            continue;
        }

        reporter.tick(epoch, now - started);
        while next <= now {
            next += interval;
        }
    }
}
