//! Round-based barrier synchronization for a fixed pool of worker threads.
//!
//! `rounds` runs the same computation over and over with a growing problem
//! size. A [`RoundController`] owns a set of long-lived worker threads and
//! hands each of them a contiguous row range of every round, so no thread is
//! created or destroyed between rounds.
//!
//! # Features
//!
//! - One mutex guarding the round state, one condition variable per predicate
//! - Two-phase ready/drain gating so no worker runs ahead into the next round
//! - Per-round heartbeat thread reporting elapsed time
//! - Cooperative shutdown checked at round boundaries
//!
//! # Example
//!
//! ```no_run
//! use std::ops::Range;
//! use std::sync::Arc;
//!
//! use rounds::{RoundConfig, RoundController, Shutdown, Silent, Workload};
//!
//! /// Squares every row index.
//! struct Squares;
//!
//! impl Workload for Squares {
//!     type Input = ();
//!     type Output = Vec<u64>;
//!     type Band = Vec<u64>;
//!
//!     fn compute(&self, _input: &(), rows: Range<usize>) -> Vec<u64> {
//!         rows.map(|row| (row * row) as u64).collect()
//!     }
//!
//!     fn write_back(&self, output: &mut Vec<u64>, rows: Range<usize>, band: Vec<u64>) {
//!         output[rows].copy_from_slice(&band);
//!     }
//! }
//!
//! fn main() -> Result<(), rounds::Error> {
//!     let generator = |size: usize| -> rounds::Result<((), Vec<u64>)> { Ok(((), vec![0; size])) };
//!     let config = RoundConfig {
//!         max_rounds: Some(3),
//!         ..RoundConfig::default()
//!     };
//!
//!     let mut controller = RoundController::new(config, Squares, generator, Arc::new(Silent))?;
//!     controller.run(100, &Shutdown::new())?;
//!     Ok(())
//! }
//! ```

mod config;
mod controller;
mod error;
mod partition;
mod progress;
mod report;
mod shutdown;
mod state;
mod worker;
mod workload;

pub use config::RoundConfig;
pub use controller::{CompletedRound, RoundController, next_size};
pub use error::{Error, Result};
pub use partition::row_range;
pub use progress::ProgressReporter;
pub use report::{Reporter, RoundSummary, Silent};
pub use shutdown::Shutdown;
pub use worker::WorkerPhase;
pub use workload::{Generator, Workload};
