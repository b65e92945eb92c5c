//! Round lifecycle: publish, await, drain, grow.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::RoundConfig;
use crate::progress::ProgressReporter;
use crate::state::{Payload, Shared};
use crate::worker::WorkerPool;
use crate::workload::{Generator, Workload};
use crate::{Error, Reporter, Result, RoundSummary, Shutdown};

/// A round handed back by [`RoundController::end_round`].
#[derive(Debug)]
pub struct CompletedRound<O> {
    pub epoch: u64,
    pub size: usize,
    pub completed: usize,
    pub elapsed: Duration,
    pub output: O,
}

struct InFlight {
    epoch: u64,
    size: usize,
    started: Instant,
    progress: Option<ProgressReporter>,
    finished: Option<(Instant, usize)>,
}

/// Drives rounds through a fixed pool of worker threads.
///
/// The pool is spawned by [`RoundController::new`] and lives until the
/// controller is dropped. Each round goes through [`start_round`],
/// [`await_round_completion`] and [`end_round`]; [`run`] repeats that with a
/// growing size until the [`Shutdown`] token is cancelled.
///
/// # Protocol
///
/// 1. `start_round` resets the completion counter, publishes the payload and
///    raises the ready flag, waking every worker.
/// 2. Each worker computes its rows with the lock released, writes its band
///    back and bumps the counter; the last one wakes the controller.
/// 3. `end_round` lowers the flag, which releases workers into waiting for
///    the next publish.
///
/// [`start_round`]: RoundController::start_round
/// [`await_round_completion`]: RoundController::await_round_completion
/// [`end_round`]: RoundController::end_round
/// [`run`]: RoundController::run
pub struct RoundController<W: Workload, G: Generator<W>> {
    shared: Arc<Shared<W>>,
    pool: WorkerPool,
    generator: G,
    reporter: Arc<dyn Reporter>,
    config: RoundConfig,
    started_rounds: u64,
    in_flight: Option<InFlight>,
}

impl<W: Workload, G: Generator<W>> RoundController<W, G> {
    /// Validates `config` and spawns the worker pool.
    pub fn new(
        config: RoundConfig,
        workload: W,
        generator: G,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self> {
        config.validate()?;

        let shared = Arc::new(Shared::new(config.workers));
        let workload = Arc::new(workload);
        let pool = WorkerPool::spawn(&shared, &workload, &reporter)?;
        debug!(workers = config.workers, "worker pool started");

        Ok(Self {
            shared,
            pool,
            generator,
            reporter,
            config,
            started_rounds: 0,
            in_flight: None,
        })
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Generates a round of `size` and publishes it to the workers.
    ///
    /// Returns the round's epoch.
    pub fn start_round(&mut self, size: usize) -> Result<u64> {
        if let Some(round) = &self.in_flight {
            return Err(Error::RoundInFlight(round.epoch));
        }
        if size == 0 {
            return Err(Error::EmptyRound);
        }

        let (input, output) = self.generator.generate(size)?;
        let epoch = self.started_rounds + 1;
        self.reporter.round_started(epoch, size);

        let started = Instant::now();
        {
            let mut state = self.shared.state.lock();
            state.completed = 0;
            state.epoch = epoch;
            state.payload = Some(Payload {
                size,
                input: Arc::new(input),
                output,
            });
            state.ready = true;
        }
        self.shared.published.notify_all();
        self.started_rounds = epoch;
        debug!(epoch, size, "round published");

        self.in_flight = Some(InFlight {
            epoch,
            size,
            started,
            progress: None,
            finished: None,
        });

        let progress =
            ProgressReporter::start(epoch, started, self.config.tick, Arc::clone(&self.reporter))?;
        if let Some(round) = self.in_flight.as_mut() {
            round.progress = Some(progress);
        }

        Ok(epoch)
    }

    /// Blocks until every worker has reported the current round done.
    pub fn await_round_completion(&mut self) -> Result<()> {
        let round = self.in_flight.as_mut().ok_or(Error::NoRoundInFlight)?;
        if round.finished.is_some() {
            return Ok(());
        }

        let completed = {
            let mut state = self.shared.state.lock();
            while state.completed < self.shared.workers {
                self.shared.finished.wait(&mut state);
            }
            state.completed
        };
        let finished = Instant::now();

        if let Some(progress) = round.progress.take() {
            progress.stop();
        }
        round.finished = Some((finished, completed));
        debug!(epoch = round.epoch, completed, "round completed");

        Ok(())
    }

    /// Lowers the ready flag, releasing workers toward the next round.
    pub fn end_round(&mut self) -> Result<CompletedRound<W::Output>> {
        let round = self.in_flight.take().ok_or(Error::NoRoundInFlight)?;
        let Some((finished, completed)) = round.finished else {
            let epoch = round.epoch;
            self.in_flight = Some(round);
            return Err(Error::RoundPending(epoch));
        };

        let payload = {
            let mut state = self.shared.state.lock();
            state.ready = false;
            state.payload.take()
        };
        self.shared.drained.notify_all();
        let payload = payload.ok_or(Error::NoRoundInFlight)?;

        let summary = RoundSummary {
            epoch: round.epoch,
            size: round.size,
            workers: self.shared.workers,
            completed,
            elapsed: finished - round.started,
        };
        debug!(epoch = summary.epoch, elapsed = ?summary.elapsed, "round drained");
        self.reporter.round_finished(&summary);

        Ok(CompletedRound {
            epoch: summary.epoch,
            size: payload.size,
            completed,
            elapsed: summary.elapsed,
            output: payload.output,
        })
    }

    /// The size of the round after one of size `current`.
    pub fn next_size(&self, current: usize) -> Result<usize> {
        next_size(current, self.config.growth)
    }

    /// Runs rounds starting at `initial` until `shutdown` is cancelled or the
    /// configured number of rounds is reached.
    ///
    /// The token is checked between rounds only; a round in flight always
    /// completes. Returns the number of rounds run.
    pub fn run(&mut self, initial: usize, shutdown: &Shutdown) -> Result<u64> {
        let mut size = initial;
        let mut rounds = 0;

        while !shutdown.is_cancelled() && !self.limit_reached(rounds) {
            self.start_round(size)?;
            self.await_round_completion()?;
            self.end_round()?;
            rounds += 1;

            if self.limit_reached(rounds) {
                break;
            }
            size = self.next_size(size)?;
            if shutdown.wait_timeout(self.config.pause) {
                break;
            }
        }

        info!(rounds, "round loop stopped");
        Ok(rounds)
    }

    /// Stops and joins the worker pool.
    ///
    /// Dropping the controller does the same.
    pub fn shutdown(mut self) {
        self.close();
    }

    fn limit_reached(&self, rounds: u64) -> bool {
        self.config.max_rounds.is_some_and(|max| rounds >= max)
    }

    /// Safe to call more than once: the pool is drained on the first call.
    fn close(&mut self) {
        if let Some(progress) = self.in_flight.as_mut().and_then(|round| round.progress.take()) {
            progress.stop();
        }
        self.shared.close();
        if self.pool.join() > 0 {
            debug!("worker pool joined");
        }
    }
}

impl<W: Workload, G: Generator<W>> Drop for RoundController<W, G> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Multiplies `current` by `growth`, refusing to wrap.
pub fn next_size(current: usize, growth: usize) -> Result<usize> {
    current
        .checked_mul(growth)
        .ok_or(Error::SizeOverflow {
            size: current,
            growth,
        })
}
