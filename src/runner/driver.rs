//! Epoch loop execution.
//!
//! [`Runner`] drives a [`Strategy`] through its run:
//! validation → initialization → evolve → global-best update → repeat.

use super::config::RunConfig;
use super::types::{History, OptimizeResult};
use crate::core::{best_of, initialize, Evaluator, Problem};
use crate::error::{OptimizerError, Result};
use crate::strategy::{EpochContext, Strategy};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info};

/// Executes an optimization run.
///
/// # Usage
///
/// ```
/// use u_swarmopt::core::{FnObjective, Problem};
/// use u_swarmopt::runner::{RunConfig, Runner};
/// use u_swarmopt::strategy::Algorithm;
///
/// let problem = Problem::new(
///     vec![-5.0; 2],
///     vec![5.0; 2],
///     FnObjective(|x: &[f64]| x.iter().map(|v| v * v).sum::<f64>()),
/// )
/// .unwrap();
/// let config = RunConfig::default().with_pop_size(10).with_max_epoch(20).with_seed(7);
///
/// let result = Runner::run(&problem, &Algorithm::base_eo(), &config).unwrap();
/// assert_eq!(result.epochs, 20);
/// assert_eq!(result.strategy, "base-eo");
/// ```
pub struct Runner;

impl Runner {
    /// Runs `strategy` on `problem` for `config.max_epoch` epochs.
    ///
    /// # Errors
    ///
    /// - [`OptimizerError::InvalidProblem`] if the configuration or the
    ///   strategy's tunables are invalid, checked before any evaluation
    /// - [`OptimizerError::ObjectiveEvaluationFailure`] as soon as the
    ///   objective fails or returns a non-finite value
    /// - [`OptimizerError::PopulationSizeMismatch`] if the strategy breaks
    ///   the population-size contract
    pub fn run<S: Strategy + ?Sized>(
        problem: &Problem,
        strategy: &S,
        config: &RunConfig,
    ) -> Result<OptimizeResult> {
        config.validate()?;
        strategy.validate()?;
        if config.pop_size < strategy.min_pop_size() {
            return Err(OptimizerError::invalid(format!(
                "{} needs pop_size >= {}, got {}",
                strategy.name(),
                strategy.min_pop_size(),
                config.pop_size
            )));
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let direction = problem.direction();
        let evaluator = Evaluator::new(problem);

        info!(
            strategy = strategy.name(),
            pop_size = config.pop_size,
            max_epoch = config.max_epoch,
            n_dims = problem.n_dims(),
            "starting optimization"
        );

        // 1. Initialize population
        let mut population = initialize(
            &evaluator,
            config.pop_size,
            strategy.init_mode(),
            strategy.uses_personal_best(),
            &mut rng,
        )?;
        let mut global_best = best_of(&population, direction).clone();
        let mut history = History::with_capacity(config.max_epoch);

        // 2. Epoch loop
        for epoch in 1..=config.max_epoch {
            evaluator.set_epoch(epoch);
            let evaluations_before = evaluator.evaluations();
            let started = Instant::now();

            let next = {
                let mut ctx = EpochContext::new(
                    &evaluator,
                    &global_best,
                    epoch,
                    config.max_epoch,
                    config.parallel,
                    &mut rng,
                );
                strategy.evolve(&population, &mut ctx)?
            };
            if next.len() != config.pop_size {
                return Err(OptimizerError::PopulationSizeMismatch {
                    epoch,
                    expected: config.pop_size,
                    actual: next.len(),
                });
            }
            population = next;

            let epoch_best = best_of(&population, direction);
            if epoch_best.is_better_than(&global_best, direction) {
                global_best = epoch_best.clone();
            }
            let epoch_evaluations = evaluator.evaluations() - evaluations_before;
            history.record(
                global_best.target(),
                epoch_best.target(),
                started.elapsed(),
                epoch_evaluations,
            );

            debug!(
                epoch,
                global_best = global_best.target(),
                epoch_best = epoch_best.target(),
                evaluations = epoch_evaluations,
                "epoch finished"
            );
        }

        info!(
            strategy = strategy.name(),
            best = global_best.target(),
            evaluations = evaluator.evaluations(),
            "optimization finished"
        );

        Ok(OptimizeResult {
            best_position: global_best.position().to_vec(),
            best_fitness: global_best.fitness().clone(),
            history,
            epochs: config.max_epoch,
            evaluations: evaluator.evaluations(),
            strategy: strategy.name().to_string(),
        })
    }
}
