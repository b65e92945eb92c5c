//! The fixed pool of long-lived round workers.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, trace};

use crate::partition::row_range;
use crate::state::Shared;
use crate::workload::Workload;
use crate::{Reporter, Result};

/// Where a worker is in its per-round cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    WaitingForReady,
    Computing,
    ReportingDone,
    WaitingForReset,
    Joined,
}

/// Worker threads spawned once and reused for every round.
pub(crate) struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn spawn<W: Workload>(
        shared: &Arc<Shared<W>>,
        workload: &Arc<W>,
        reporter: &Arc<dyn Reporter>,
    ) -> Result<Self> {
        let mut pool = Self {
            handles: Vec::with_capacity(shared.workers),
        };

        for id in 0..shared.workers {
            let worker = Worker {
                id,
                shared: Arc::clone(shared),
                workload: Arc::clone(workload),
                reporter: Arc::clone(reporter),
            };

            match thread::Builder::new()
                .name(format!("round-worker-{id}"))
                .spawn(move || worker.run())
            {
                Ok(handle) => pool.handles.push(handle),
                Err(e) => {
                    shared.close();
                    pool.join();
                    return Err(e.into());
                }
            }
        }

        Ok(pool)
    }

    /// Joins every worker still running and returns how many were joined.
    /// The shared state must already be closed.
    pub fn join(&mut self) -> usize {
        let joined = self.handles.len();
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                debug!("round worker panicked");
            }
        }
        joined
    }
}

struct Worker<W: Workload> {
    id: usize,
    shared: Arc<Shared<W>>,
    workload: Arc<W>,
    reporter: Arc<dyn Reporter>,
}

impl<W: Workload> Worker<W> {
    fn run(self) {
        let workers = self.shared.workers;

        loop {
            self.enter(WorkerPhase::WaitingForReady);
            let (epoch, size, input) = {
                let mut state = self.shared.state.lock();
                while !state.ready && !state.shutdown {
                    self.shared.published.wait(&mut state);
                }
                if state.shutdown {
                    break;
                }
                match state.payload.as_ref() {
                    Some(payload) => (state.epoch, payload.size, Arc::clone(&payload.input)),
                    None => break,
                }
            };

            self.enter(WorkerPhase::Computing);
            let rows = row_range(self.id, workers, size);
            let band = self.workload.compute(&input, rows.clone());
            drop(input);

            self.enter(WorkerPhase::ReportingDone);
            self.reporter.worker_finished(self.id, epoch, rows.clone());

            let mut state = self.shared.state.lock();
            if let Some(payload) = state.payload.as_mut() {
                self.workload.write_back(&mut payload.output, rows, band);
            }
            state.completed += 1;
            debug_assert!(state.completed <= workers);
            if state.completed == workers {
                self.shared.finished.notify_one();
            }

            self.enter(WorkerPhase::WaitingForReset);
            // The epoch check covers a republish that lands before this
            // worker wakes up from the drain.
            while state.ready && state.epoch == epoch && !state.shutdown {
                self.shared.drained.wait(&mut state);
            }
            if state.shutdown {
                break;
            }
        }

        self.enter(WorkerPhase::Joined);
    }

    fn enter(&self, phase: WorkerPhase) {
        trace!(worker = self.id, ?phase, "worker phase");
    }
}

#[cfg(test)]
mod tests {
    use std::ops::Range;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::Silent;
    use crate::state::{Payload, RoundState};

    /// Output row `r` is `tag + r`.
    struct Tagged;

    impl Workload for Tagged {
        type Input = u64;
        type Output = Vec<u64>;
        type Band = Vec<u64>;

        fn compute(&self, tag: &u64, rows: Range<usize>) -> Vec<u64> {
            rows.map(|row| tag + row as u64).collect()
        }

        fn write_back(&self, output: &mut Vec<u64>, rows: Range<usize>, band: Vec<u64>) {
            output[rows].copy_from_slice(&band);
        }
    }

    fn publish(state: &mut RoundState<Tagged>, epoch: u64, size: usize) {
        state.completed = 0;
        state.epoch = epoch;
        state.payload = Some(Payload {
            size,
            input: Arc::new(epoch * 100),
            output: vec![0; size],
        });
        state.ready = true;
    }

    fn await_completed(shared: &Shared<Tagged>) -> parking_lot::MutexGuard<'_, RoundState<Tagged>> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut state = shared.state.lock();
        while state.completed < shared.workers {
            let timed_out = shared.finished.wait_until(&mut state, deadline).timed_out();
            assert!(!timed_out, "round {} never completed", state.epoch);
        }
        state
    }

    #[test]
    fn republish_before_wake_releases_waiting_workers() {
        let shared = Arc::new(Shared::<Tagged>::new(3));
        let reporter: Arc<dyn Reporter> = Arc::new(Silent);
        let mut pool = WorkerPool::spawn(&shared, &Arc::new(Tagged), &reporter).unwrap();

        publish(&mut shared.state.lock(), 1, 4);
        shared.published.notify_all();

        for epoch in 2..=20 {
            let mut state = await_completed(&shared);
            let size = state.payload.as_ref().map_or(0, |payload| payload.size);
            let tag = (epoch - 1) * 100;
            let expected: Vec<u64> = (0..size as u64).map(|row| tag + row).collect();
            assert_eq!(state.payload.take().map(|payload| payload.output), Some(expected));

            // Drain and republish under one lock hold: every worker in the
            // reset wait can only wake up once the next round is live.
            state.ready = false;
            shared.drained.notify_all();
            publish(&mut state, epoch, 4 + epoch as usize % 5);
            shared.published.notify_all();
        }

        let state = await_completed(&shared);
        assert_eq!(state.epoch, 20);
        assert_eq!(state.completed, 3);
        drop(state);

        shared.close();
        assert_eq!(pool.join(), 3);
    }
}
