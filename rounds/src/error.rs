//! Error types for round operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("round {0} is still in flight")]
    RoundInFlight(u64),

    #[error("no round in flight")]
    NoRoundInFlight,

    #[error("round {0} has not completed yet")]
    RoundPending(u64),

    #[error("round size must be positive")]
    EmptyRound,

    #[error("next size after {size} overflows with growth factor {growth}")]
    SizeOverflow { size: usize, growth: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to generate round of size {size}: {source}")]
    Generate {
        size: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
