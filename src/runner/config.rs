//! Run configuration.

use crate::error::{OptimizerError, Result};

/// Population size, epoch budget, seeding and parallelism for one run.
///
/// Strategy tunables live in the strategy's own config; `RunConfig` only
/// covers what the driver loop needs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Number of agents kept in every epoch.
    pub pop_size: usize,

    /// Number of evolve steps.
    pub max_epoch: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Whether per-agent work may run on rayon.
    ///
    /// Only takes effect with the `parallel` feature. Seeded runs give
    /// the same result either way.
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pop_size: 100,
            max_epoch: 1000,
            seed: None,
            parallel: true,
        }
    }
}

impl RunConfig {
    /// Sets the population size.
    pub fn with_pop_size(mut self, n: usize) -> Self {
        self.pop_size = n;
        self
    }

    /// Sets the number of epochs.
    pub fn with_max_epoch(mut self, n: usize) -> Self {
        self.max_epoch = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel agent updates.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// The runner additionally checks `pop_size` against the strategy's
    /// own minimum.
    pub fn validate(&self) -> Result<()> {
        if self.pop_size < 4 {
            return Err(OptimizerError::invalid(format!(
                "pop_size must be at least 4, got {}",
                self.pop_size
            )));
        }
        if self.max_epoch == 0 {
            return Err(OptimizerError::invalid("max_epoch must be at least 1"));
        }
        Ok(())
    }
}
