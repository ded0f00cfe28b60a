//! Direction, multi-objective weighting, error propagation and
//! population invariants observed through the public API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use u_swarmopt::core::{
    is_feasible, Direction, FnObjective, MultiFnObjective, Problem, Solution, TryFnObjective,
};
use u_swarmopt::eo::{EoConfig, EquilibriumOptimizer};
use u_swarmopt::runner::{RunConfig, Runner};
use u_swarmopt::slo::{SeaLionOptimizer, SloConfig};
use u_swarmopt::strategy::{Algorithm, EpochContext, Strategy};
use u_swarmopt::{ObjectiveError, OptimizerError, Result};

fn small_config() -> RunConfig {
    RunConfig::default()
        .with_pop_size(10)
        .with_max_epoch(30)
        .with_seed(9)
}

#[test]
fn maximization_keeps_the_highest_target() {
    let problem = Problem::new(
        vec![-3.0, -3.0],
        vec![3.0, 3.0],
        FnObjective(|x: &[f64]| 10.0 - x.iter().map(|v| v * v).sum::<f64>()),
    )
    .unwrap()
    .with_direction(Direction::Maximize);

    for algo in Algorithm::all() {
        let result = Runner::run(&problem, &algo, &small_config()).unwrap();
        let gb = &result.history.global_best;
        assert!(gb.windows(2).all(|w| w[1] >= w[0]), "{}", algo.name());
        assert!(result.best_fitness.target > 9.0, "{}", algo.name());
        assert!(result
            .history
            .epoch_best
            .iter()
            .zip(gb)
            .all(|(e, g)| e <= g));
    }
}

#[test]
fn weighted_objectives_drive_the_target() {
    let problem = Problem::new(
        vec![0.0; 2],
        vec![1.0; 2],
        MultiFnObjective(|x: &[f64]| vec![x[0], x[1], x[0] + x[1]]),
    )
    .unwrap()
    .with_obj_weights(vec![0.2, 0.5, 0.3])
    .unwrap();

    let result = Runner::run(&problem, &Algorithm::base_eo(), &small_config()).unwrap();
    let objectives = &result.best_fitness.objectives;
    assert_eq!(objectives.len(), 3);
    let weighted = 0.2 * objectives[0] + 0.5 * objectives[1] + 0.3 * objectives[2];
    assert!((weighted - result.best_fitness.target).abs() < 1e-12);
}

#[test]
fn objective_error_reports_epoch_and_agent() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let problem = Problem::new(
        vec![-1.0; 2],
        vec![1.0; 2],
        TryFnObjective(move |x: &[f64]| {
            // 10 initial agents, the pool mean, then agents 0 and 1.
            if counter.fetch_add(1, Ordering::SeqCst) == 12 {
                Err(ObjectiveError::new("sensor offline"))
            } else {
                Ok(x[0] * x[0] + x[1] * x[1])
            }
        }),
    )
    .unwrap();

    let config = small_config().with_parallel(false);
    let err = Runner::run(&problem, &Algorithm::base_eo(), &config).unwrap_err();
    assert_eq!(
        err,
        OptimizerError::ObjectiveEvaluationFailure {
            epoch: 1,
            agent: 1,
            reason: "sensor offline".to_string(),
        }
    );
    assert!(err.to_string().contains("epoch 1, agent 1"));
}

#[test]
fn non_finite_objective_fails_during_initialization() {
    let problem = Problem::new(vec![0.0], vec![1.0], FnObjective(|_: &[f64]| f64::NAN)).unwrap();
    for algo in Algorithm::all() {
        let err = Runner::run(&problem, &algo, &small_config()).unwrap_err();
        match err {
            OptimizerError::ObjectiveEvaluationFailure { epoch, agent, .. } => {
                assert_eq!(epoch, 0);
                assert_eq!(agent, 0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}

#[test]
fn invalid_inputs_are_rejected_up_front() {
    let bad_bounds = Problem::new(vec![1.0], vec![0.0], FnObjective(|x: &[f64]| x[0]));
    assert!(matches!(bad_bounds, Err(OptimizerError::InvalidProblem(_))));

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let problem = Problem::new(
        vec![0.0],
        vec![1.0],
        FnObjective(move |x: &[f64]| {
            counter.fetch_add(1, Ordering::SeqCst);
            x[0]
        }),
    )
    .unwrap();

    let strategy = SeaLionOptimizer::new(SloConfig::modified().with_beta(0.0));
    let err = Runner::run(&problem, &strategy, &small_config()).unwrap_err();
    assert!(matches!(err, OptimizerError::InvalidProblem(_)));

    let strategy = EquilibriumOptimizer::new(EoConfig::base());
    let err = Runner::run(&problem, &strategy, &small_config().with_pop_size(3)).unwrap_err();
    assert!(matches!(err, OptimizerError::InvalidProblem(_)));

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// Wraps a strategy and checks the population it receives every epoch.
struct Inspect<S> {
    inner: S,
    problem: Problem,
    pop_size: usize,
}

impl<S: Strategy> Strategy for Inspect<S> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn evaluations_per_epoch(&self, pop_size: usize) -> usize {
        self.inner.evaluations_per_epoch(pop_size)
    }

    fn init_mode(&self) -> u_swarmopt::core::InitMode {
        self.inner.init_mode()
    }

    fn uses_personal_best(&self) -> bool {
        self.inner.uses_personal_best()
    }

    fn evolve(
        &self,
        population: &[Solution],
        ctx: &mut EpochContext<'_, '_>,
    ) -> Result<Vec<Solution>> {
        assert_eq!(population.len(), self.pop_size);
        for s in population {
            assert!(is_feasible(s.position(), &self.problem), "{}", self.name());
            assert_eq!(s.personal_best().is_some(), self.uses_personal_best());
        }
        let best = ctx.global_best().target();
        assert!(population.iter().all(|s| s.target() >= best));
        self.inner.evolve(population, ctx)
    }
}

#[test]
fn populations_stay_feasible_and_sized() {
    let problem = Problem::new(
        vec![-2.0, 0.0, 10.0],
        vec![2.0, 1.0, 20.0],
        FnObjective(|x: &[f64]| (x[0] - 1.5).abs() + x[1] + (x[2] - 19.0).powi(2)),
    )
    .unwrap();

    for algo in Algorithm::all() {
        let strategy = Inspect {
            inner: algo,
            problem: problem.clone(),
            pop_size: 11,
        };
        let result = Runner::run(&problem, &strategy, &small_config().with_pop_size(11)).unwrap();
        assert!(is_feasible(&result.best_position, &problem));
    }
}

#[test]
fn extreme_bounds_never_panic() {
    let overflowing = Problem::new(
        vec![-1e308],
        vec![1e308],
        FnObjective(|x: &[f64]| x[0].abs()),
    );
    assert!(matches!(overflowing, Err(OptimizerError::InvalidProblem(_))));

    let problem = Problem::new(
        vec![-1e307, -1e307],
        vec![1e307, 1e307],
        FnObjective(|x: &[f64]| x[0].abs() + x[1].abs()),
    )
    .unwrap();
    let config = RunConfig::default()
        .with_pop_size(5)
        .with_max_epoch(5)
        .with_seed(1);
    for algo in Algorithm::all() {
        let result = Runner::run(&problem, &algo, &config).unwrap();
        assert!(is_feasible(&result.best_position, &problem), "{}", algo.name());
        assert!(result.best_fitness.target.is_finite());
    }
}
