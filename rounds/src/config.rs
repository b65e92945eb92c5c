//! Pool and pacing settings for a [`RoundController`](crate::RoundController).

use std::time::Duration;

use crate::{Error, Result};

/// Settings fixed for the lifetime of a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundConfig {
    /// Size of the worker pool.
    pub workers: usize,
    /// Factor applied to the size between rounds.
    pub growth: usize,
    /// Interval between progress ticks.
    pub tick: Duration,
    /// Delay between the end of a round and the start of the next.
    pub pause: Duration,
    /// Stop after this many rounds; `None` runs until shut down.
    pub max_rounds: Option<u64>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            workers: 6,
            growth: 2,
            tick: Duration::from_secs(1),
            pause: Duration::from_secs(2),
            max_rounds: None,
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::Config("worker count must be at least 1".into()));
        }
        if self.growth < 2 {
            return Err(Error::Config(format!(
                "growth factor must be at least 2, got {}",
                self.growth
            )));
        }
        if self.tick.is_zero() {
            return Err(Error::Config("tick interval must be positive".into()));
        }
        Ok(())
    }
}
