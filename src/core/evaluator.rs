//! Fitness evaluation.
//!
//! [`Evaluator`] is the only way a position becomes a [`Solution`]. It
//! counts every objective call, since function evaluations are the unit
//! cost of the whole engine.

use super::bounds::BoundaryRepair;
use super::problem::Problem;
use super::solution::{Fitness, Solution};
use crate::error::{OptimizerError, Result};
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Evaluates positions against a [`Problem`] and counts evaluations.
///
/// Shared by reference across rayon workers when the `parallel` feature
/// is enabled; the counters are atomic for that reason.
#[derive(Debug)]
pub struct Evaluator<'p> {
    problem: &'p Problem,
    epoch: AtomicUsize,
    evaluations: AtomicUsize,
}

impl<'p> Evaluator<'p> {
    pub fn new(problem: &'p Problem) -> Self {
        Self {
            problem,
            epoch: AtomicUsize::new(0),
            evaluations: AtomicUsize::new(0),
        }
    }

    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    /// Total number of objective calls so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// Epoch reported in evaluation failures (0 = initialization).
    pub fn epoch(&self) -> usize {
        self.epoch.load(Ordering::Relaxed)
    }

    pub(crate) fn set_epoch(&self, epoch: usize) {
        self.epoch.store(epoch, Ordering::Relaxed);
    }

    /// Evaluates `position` for the agent at index `agent`.
    ///
    /// # Errors
    ///
    /// [`OptimizerError::ObjectiveEvaluationFailure`] if the objective
    /// fails, returns no values, disagrees with the configured weights, or
    /// produces a non-finite value.
    pub fn evaluate(&self, position: &[f64], agent: usize) -> Result<Fitness> {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        let fail = |reason: String| {
            tracing::trace!(epoch = self.epoch(), agent, %reason, "objective evaluation failed");
            OptimizerError::ObjectiveEvaluationFailure {
                epoch: self.epoch(),
                agent,
                reason,
            }
        };

        let objectives = self
            .problem
            .objective()
            .evaluate(position)
            .map_err(|e| fail(e.to_string()))?;
        if let Some(bad) = objectives.iter().find(|v| !v.is_finite()) {
            return Err(fail(format!("objective returned non-finite value {bad}")));
        }
        let target = self.problem.reduce(&objectives).map_err(fail)?;
        if !target.is_finite() {
            return Err(fail(format!("target {target} is not finite")));
        }
        Ok(Fitness { target, objectives })
    }

    /// Evaluates an already feasible position into a [`Solution`].
    pub fn refit(&self, position: Vec<f64>, agent: usize) -> Result<Solution> {
        let fitness = self.evaluate(&position, agent)?;
        Ok(Solution::new(position, fitness))
    }

    /// Repairs `position` into the bounds, then evaluates it.
    pub fn amend_and_refit<R: Rng>(
        &self,
        position: Vec<f64>,
        repair: BoundaryRepair,
        rng: &mut R,
        agent: usize,
    ) -> Result<Solution> {
        let position = repair.repair(position, self.problem, rng);
        self.refit(position, agent)
    }

    /// Evaluates a batch of feasible positions, keeping input order.
    ///
    /// Runs on rayon when `parallel` is set and the `parallel` feature is
    /// enabled. On failure, the error of the lowest failing index is
    /// returned.
    pub fn refit_all(&self, positions: Vec<Vec<f64>>, parallel: bool) -> Result<Vec<Solution>> {
        #[cfg(feature = "parallel")]
        if parallel {
            use rayon::prelude::*;
            let results: Vec<Result<Solution>> = positions
                .into_par_iter()
                .enumerate()
                .map(|(i, pos)| self.refit(pos, i))
                .collect();
            return results.into_iter().collect();
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        positions
            .into_iter()
            .enumerate()
            .map(|(i, pos)| self.refit(pos, i))
            .collect()
    }
}
