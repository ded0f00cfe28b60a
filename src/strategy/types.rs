//! The evolve-step contract.

use crate::core::{Direction, Evaluator, InitMode, Problem, Solution};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A population-update heuristic.
///
/// The runner calls [`evolve`](Strategy::evolve) once per epoch with the
/// frozen previous population. The strategy returns a fresh population of
/// exactly the same size, built only from solutions produced by the
/// context's [`Evaluator`].
///
/// # Implementing
///
/// ```ignore
/// struct RandomRestart;
///
/// impl Strategy for RandomRestart {
///     fn name(&self) -> &'static str { "random-restart" }
///     fn evaluations_per_epoch(&self, pop_size: usize) -> usize { pop_size }
///     fn evolve(&self, population: &[Solution], ctx: &mut EpochContext<'_, '_>)
///         -> Result<Vec<Solution>>
///     {
///         ctx.map_agents(population.len(), |agent, rng, ctx| {
///             let position = random_point(ctx.problem(), rng);
///             ctx.evaluator().refit(position, agent)
///         })
///     }
/// }
/// ```
pub trait Strategy: Send + Sync {
    /// Short identifier used in logs and results.
    fn name(&self) -> &'static str;

    /// Nominal objective evaluations per epoch for `pop_size` agents.
    ///
    /// Used for cost accounting; the runner also records the measured
    /// count in the history.
    fn evaluations_per_epoch(&self, pop_size: usize) -> usize;

    /// How the initial population is drawn.
    fn init_mode(&self) -> InitMode {
        InitMode::Uniform
    }

    /// Whether agents carry personal-best memory.
    fn uses_personal_best(&self) -> bool {
        false
    }

    /// Smallest population the strategy can work with.
    fn min_pop_size(&self) -> usize {
        4
    }

    /// Checks the strategy's tunables.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Produces the next generation from `population`.
    fn evolve(
        &self,
        population: &[Solution],
        ctx: &mut EpochContext<'_, '_>,
    ) -> Result<Vec<Solution>>;
}

/// Read-only view of the run state handed to [`Strategy::evolve`], plus
/// the run's random source.
pub struct EpochContext<'a, 'p> {
    evaluator: &'a Evaluator<'p>,
    global_best: &'a Solution,
    epoch: usize,
    max_epoch: usize,
    parallel: bool,
    rng: &'a mut StdRng,
}

impl<'a, 'p> EpochContext<'a, 'p> {
    pub fn new(
        evaluator: &'a Evaluator<'p>,
        global_best: &'a Solution,
        epoch: usize,
        max_epoch: usize,
        parallel: bool,
        rng: &'a mut StdRng,
    ) -> Self {
        Self {
            evaluator,
            global_best,
            epoch,
            max_epoch,
            parallel,
            rng,
        }
    }

    pub fn evaluator(&self) -> &'a Evaluator<'p> {
        self.evaluator
    }

    pub fn problem(&self) -> &'p Problem {
        self.evaluator.problem()
    }

    pub fn direction(&self) -> Direction {
        self.problem().direction()
    }

    /// Best solution observed before this epoch.
    pub fn global_best(&self) -> &'a Solution {
        self.global_best
    }

    /// Current epoch, starting at 1.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn max_epoch(&self) -> usize {
        self.max_epoch
    }

    /// Zero-based iteration index used by time-decay formulas.
    ///
    /// Runs from `0` to `max_epoch - 1`, so decay terms start at their
    /// initial value and never hit the degenerate end point. Epoch 0 is
    /// treated like epoch 1.
    pub fn iteration(&self) -> f64 {
        self.epoch.saturating_sub(1) as f64
    }

    /// `iteration / max_epoch`, in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        self.iteration() / self.max_epoch as f64
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// The run's random source.
    pub fn rng(&mut self) -> &mut StdRng {
        self.rng
    }

    /// Runs `f` once per agent and collects the results in agent order.
    ///
    /// Each agent gets its own `StdRng` seeded from the master stream
    /// before any agent runs, so the outcome is the same whether agents
    /// are processed sequentially or on rayon. On failure the error of the
    /// lowest failing agent is returned.
    pub fn map_agents<T, F>(&mut self, n: usize, f: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(usize, &mut StdRng, &AgentView<'_, 'p>) -> Result<T> + Send + Sync,
    {
        let seeds: Vec<u64> = (0..n).map(|_| self.rng.random()).collect();
        let view = AgentView {
            evaluator: self.evaluator,
            global_best: self.global_best,
            epoch: self.epoch,
            max_epoch: self.max_epoch,
        };

        #[cfg(feature = "parallel")]
        if self.parallel {
            use rayon::prelude::*;
            let results: Vec<Result<T>> = seeds
                .into_par_iter()
                .enumerate()
                .map(|(agent, seed)| f(agent, &mut StdRng::seed_from_u64(seed), &view))
                .collect();
            return results.into_iter().collect();
        }

        seeds
            .into_iter()
            .enumerate()
            .map(|(agent, seed)| f(agent, &mut StdRng::seed_from_u64(seed), &view))
            .collect()
    }
}

/// Shared, immutable part of an [`EpochContext`] handed to per-agent work.
#[derive(Clone, Copy)]
pub struct AgentView<'a, 'p> {
    evaluator: &'a Evaluator<'p>,
    global_best: &'a Solution,
    epoch: usize,
    max_epoch: usize,
}

impl<'a, 'p> AgentView<'a, 'p> {
    pub fn evaluator(&self) -> &'a Evaluator<'p> {
        self.evaluator
    }

    pub fn problem(&self) -> &'p Problem {
        self.evaluator.problem()
    }

    pub fn direction(&self) -> Direction {
        self.problem().direction()
    }

    pub fn global_best(&self) -> &'a Solution {
        self.global_best
    }

    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn max_epoch(&self) -> usize {
        self.max_epoch
    }

    /// See [`EpochContext::iteration`].
    pub fn iteration(&self) -> f64 {
        self.epoch.saturating_sub(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FnObjective, Problem};

    fn fixture() -> Problem {
        Problem::new(vec![0.0], vec![1.0], FnObjective(|x: &[f64]| x[0])).unwrap()
    }

    #[test]
    fn test_iteration_and_progress() {
        let p = fixture();
        let ev = Evaluator::new(&p);
        let best = ev.refit(vec![0.5], 0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let ctx = EpochContext::new(&ev, &best, 1, 10, false, &mut rng);
        assert_eq!(ctx.iteration(), 0.0);
        assert_eq!(ctx.progress(), 0.0);

        let mut rng = StdRng::seed_from_u64(1);
        let ctx = EpochContext::new(&ev, &best, 10, 10, false, &mut rng);
        assert!((ctx.progress() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_epoch_zero_does_not_underflow() {
        let p = fixture();
        let ev = Evaluator::new(&p);
        let best = ev.refit(vec![0.5], 0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = EpochContext::new(&ev, &best, 0, 10, false, &mut rng);
        assert_eq!(ctx.iteration(), 0.0);
        assert_eq!(ctx.progress(), 0.0);
        let iterations = ctx.map_agents(2, |_, _, view| Ok(view.iteration())).unwrap();
        assert_eq!(iterations, vec![0.0, 0.0]);
    }

    #[test]
    fn test_map_agents_is_ordered_and_reproducible() {
        let p = fixture();
        let ev = Evaluator::new(&p);
        let best = ev.refit(vec![0.5], 0).unwrap();

        let draw = |parallel: bool| {
            let mut rng = StdRng::seed_from_u64(99);
            let mut ctx = EpochContext::new(&ev, &best, 1, 5, parallel, &mut rng);
            ctx.map_agents(6, |agent, rng, _| Ok((agent, rng.random::<f64>())))
                .unwrap()
        };

        let seq = draw(false);
        assert_eq!(seq.len(), 6);
        assert!(seq.iter().enumerate().all(|(i, &(a, _))| i == a));
        assert_eq!(seq, draw(true));
        assert_eq!(seq, draw(false));
    }
}
