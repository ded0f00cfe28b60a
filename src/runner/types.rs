//! Run outputs.

use crate::core::Fitness;
use std::time::Duration;

/// Per-epoch convergence record.
///
/// Every sequence has one entry per completed epoch, index-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct History {
    /// Global-best target after each epoch. Never worsens.
    pub global_best: Vec<f64>,

    /// Best target within each epoch's population.
    pub epoch_best: Vec<f64>,

    /// Wall-clock time of each epoch.
    pub epoch_duration: Vec<Duration>,

    /// Objective evaluations performed during each epoch.
    pub evaluations: Vec<usize>,
}

impl History {
    pub(crate) fn with_capacity(epochs: usize) -> Self {
        Self {
            global_best: Vec::with_capacity(epochs),
            epoch_best: Vec::with_capacity(epochs),
            epoch_duration: Vec::with_capacity(epochs),
            evaluations: Vec::with_capacity(epochs),
        }
    }

    pub(crate) fn record(
        &mut self,
        global_best: f64,
        epoch_best: f64,
        duration: Duration,
        evaluations: usize,
    ) {
        self.global_best.push(global_best);
        self.epoch_best.push(epoch_best);
        self.epoch_duration.push(duration);
        self.evaluations.push(evaluations);
    }

    /// Number of recorded epochs.
    pub fn len(&self) -> usize {
        self.global_best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.global_best.is_empty()
    }

    /// Total wall-clock time across all epochs.
    pub fn total_duration(&self) -> Duration {
        self.epoch_duration.iter().sum()
    }
}

/// Result of an optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeResult {
    /// Position of the best solution found during the entire run.
    pub best_position: Vec<f64>,

    /// Fitness of `best_position`.
    pub best_fitness: Fitness,

    /// Convergence history.
    pub history: History,

    /// Number of epochs executed.
    pub epochs: usize,

    /// Total objective evaluations, initialization included.
    pub evaluations: usize,

    /// [`Strategy::name`](crate::strategy::Strategy::name) of the strategy used.
    pub strategy: String,
}
