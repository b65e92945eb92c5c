//! Round state shared between the controller and the worker pool.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::workload::Workload;

/// A round as published to the workers.
pub(crate) struct Payload<W: Workload> {
    pub size: usize,
    pub input: Arc<W::Input>,
    pub output: W::Output,
}

/// Everything guarded by the round mutex.
///
/// `completed` is reset before `ready` is raised, and `ready` goes
/// false -> true -> false once per round. `epoch` advances on every publish.
pub(crate) struct RoundState<W: Workload> {
    pub ready: bool,
    pub completed: usize,
    pub epoch: u64,
    pub payload: Option<Payload<W>>,
    pub shutdown: bool,
}

/// The round mutex and one condition variable per predicate waited on.
pub(crate) struct Shared<W: Workload> {
    pub state: Mutex<RoundState<W>>,
    /// Workers waiting for `ready == true`.
    pub published: Condvar,
    /// Workers waiting for `ready == false`.
    pub drained: Condvar,
    /// The controller waiting for `completed == workers`.
    pub finished: Condvar,
    pub workers: usize,
}

impl<W: Workload> Shared<W> {
    pub fn new(workers: usize) -> Self {
        Self {
            state: Mutex::new(RoundState {
                ready: false,
                completed: 0,
                epoch: 0,
                payload: None,
                shutdown: false,
            }),
            published: Condvar::new(),
            drained: Condvar::new(),
            finished: Condvar::new(),
            workers,
        }
    }

    /// Flags shutdown and wakes every waiter so it can observe it.
    pub fn close(&self) {
        self.state.lock().shutdown = true;
        self.published.notify_all();
        self.drained.notify_all();
        self.finished.notify_all();
    }
}
