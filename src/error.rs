//! Error types.
//!
//! Construction-time problems surface as [`OptimizerError::InvalidProblem`]
//! before any evaluation happens. Everything raised during a run is fatal:
//! the run aborts and no partial result is returned.

use thiserror::Error;

/// Error returned by a user objective function.
///
/// Objectives are assumed deterministic, so the engine never retries.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct ObjectiveError(pub String);

impl ObjectiveError {
    /// Creates an error from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors produced by the optimization engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizerError {
    /// Problem descriptor, run configuration or strategy tunables are invalid.
    #[error("invalid problem: {0}")]
    InvalidProblem(String),

    /// The objective failed or returned a non-finite value.
    ///
    /// `epoch` is 0 during population initialization.
    #[error("objective evaluation failed at epoch {epoch}, agent {agent}: {reason}")]
    ObjectiveEvaluationFailure {
        epoch: usize,
        agent: usize,
        reason: String,
    },

    /// A strategy returned a population of the wrong size.
    #[error("strategy returned {actual} solutions at epoch {epoch}, expected {expected}")]
    PopulationSizeMismatch {
        epoch: usize,
        expected: usize,
        actual: usize,
    },
}

impl OptimizerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidProblem(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OptimizerError>;
