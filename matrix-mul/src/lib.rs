//! Repeated square matrix multiplication over a fixed worker pool.
//!
//! `matrix-mul` plugs matrices into the [`rounds`] protocol: every round the
//! generator allocates `A`, `B` and a zeroed `C` of size `N×N`, the workers
//! each compute a horizontal band of `C = A × B`, and the size grows for the
//! next round.
//!
//! # Pieces
//!
//! - [`Kernel`]: the multiplication algorithm a worker runs over its rows
//! - [`Fill`]: how `A` and `B` are filled (ones and twos, or seeded random)
//! - [`RoundLog`]: reports rounds, workers and heartbeats through `tracing`
//! - [`Cli`]: command line flags for the `matrix-mul` binary
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use matrix_mul::{Fill, Kernel, RoundLog};
//! use rounds::{RoundConfig, RoundController};
//!
//! fn main() -> Result<(), matrix_mul::Error> {
//!     let mut controller = RoundController::new(
//!         RoundConfig::default(),
//!         Kernel::Naive,
//!         Fill::ones_and_twos(),
//!         Arc::new(RoundLog),
//!     )?;
//!
//!     controller.start_round(4)?;
//!     controller.await_round_completion()?;
//!     let round = controller.end_round()?;
//!
//!     assert!(round.output.as_slice().iter().all(|&v| v == 8));
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod generator;
mod matrix;
mod matrix_mul;
mod report;

pub use config::{Cli, FillKind, MAX_FILL_VALUE};
pub use error::Error;
pub use generator::Fill;
pub use matrix::{Element, Matrix};
pub use matrix_mul::{Kernel, Operands};
pub use report::{ElementCounts, RoundLog};
