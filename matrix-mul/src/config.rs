//! Command line configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use rounds::RoundConfig;

use crate::generator::Fill;
use crate::matrix::Element;
use crate::matrix_mul::Kernel;

/// Keeps `max² · N` well inside `i64` for any size that fits in memory.
pub const MAX_FILL_VALUE: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FillKind {
    /// A is all ones, B is all twos.
    Constant,
    /// Uniform random values in `0..=max-value`.
    Random,
}

/// Multiplies ever larger square matrices on a fixed pool of threads.
#[derive(Debug, Parser)]
#[command(name = "matrix-mul", author, version, about, long_about = None)]
pub struct Cli {
    /// Matrix size of the first round
    #[arg(short, long, default_value_t = 100)]
    pub size: usize,

    /// Number of worker threads
    #[arg(short, long, default_value_t = 6)]
    pub workers: usize,

    /// Factor the size grows by after each round
    #[arg(long, default_value_t = 2)]
    pub growth: usize,

    /// Interval between progress ticks, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub tick_ms: u64,

    /// Pause between rounds, in milliseconds
    #[arg(long, default_value_t = 2000)]
    pub pause_ms: u64,

    /// Stop after this many rounds instead of running until interrupted
    #[arg(short, long)]
    pub rounds: Option<u64>,

    /// How the matrices are filled
    #[arg(long, value_enum, default_value_t = FillKind::Constant)]
    pub fill: FillKind,

    /// Seed for the random fill
    #[arg(long)]
    pub seed: Option<u64>,

    /// Largest value produced by the random fill
    #[arg(
        long,
        default_value_t = 9,
        value_parser = clap::value_parser!(i64).range(0..=MAX_FILL_VALUE),
    )]
    pub max_value: Element,

    /// Multiplication kernel run by the workers
    #[arg(long, value_enum, default_value_t = Kernel::Naive)]
    pub algorithm: Kernel,
}

impl Cli {
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            workers: self.workers,
            growth: self.growth,
            tick: Duration::from_millis(self.tick_ms),
            pause: Duration::from_millis(self.pause_ms),
            max_rounds: self.rounds,
        }
    }

    pub fn fill(&self) -> Fill {
        match self.fill {
            FillKind::Constant => Fill::ones_and_twos(),
            FillKind::Random => Fill::random(self.seed, self.max_value),
        }
    }
}
