//! Equilibrium Optimizer evolve step.
//!
//! Every agent is a particle whose concentration (position) moves toward
//! an equilibrium candidate drawn from a pool of the four best agents and
//! their mean. The update blends an exponential term `F` with a
//! generation rate `G`:
//!
//! ```text
//! t   = (1 - it/T)^(a2 * it/T)
//! F   = a1 * sign(r - 0.5) * (exp(-λ t) - 1)
//! G   = 0.5 r1 [r2 >= GP] * (C_eq - λ C) * F
//! C'  = C_eq + (C - C_eq) F + G V / λ * (1 - F)
//! ```
//!
//! `λ` is a uniform draw per coordinate and is not guarded against zero;
//! an exact zero yields a non-finite coordinate that boundary repair then
//! resolves.

use super::config::{EoConfig, EoVariant};
use crate::core::math::{mean_position, sign};
use crate::core::{mean_target, select_special, Direction, Problem, SelectMode, Solution};
use crate::error::Result;
use crate::strategy::{EpochContext, Strategy};
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;

/// Number of top agents in the equilibrium pool (the mean makes five).
pub const POOL_SIZE: usize = 4;

/// The Equilibrium Optimizer family as a [`Strategy`].
///
/// # Usage
///
/// ```
/// use u_swarmopt::core::{FnObjective, Problem};
/// use u_swarmopt::eo::{EoConfig, EquilibriumOptimizer};
/// use u_swarmopt::runner::{RunConfig, Runner};
///
/// let problem = Problem::new(
///     vec![-5.0; 2],
///     vec![5.0; 2],
///     FnObjective(|x: &[f64]| x.iter().map(|v| v * v).sum::<f64>()),
/// )
/// .unwrap();
/// let strategy = EquilibriumOptimizer::new(EoConfig::adaptive());
/// let config = RunConfig::default()
///     .with_pop_size(20)
///     .with_max_epoch(30)
///     .with_seed(42);
///
/// let result = Runner::run(&problem, &strategy, &config).unwrap();
/// assert_eq!(result.history.global_best.len(), 30);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EquilibriumOptimizer {
    config: EoConfig,
}

impl EquilibriumOptimizer {
    pub fn new(config: EoConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EoConfig {
        &self.config
    }

    /// Four best agents plus their evaluated mean; index 0 is the leader.
    fn equilibrium_pool(
        &self,
        population: &[Solution],
        ctx: &EpochContext<'_, '_>,
    ) -> Result<Vec<Solution>> {
        let mut pool =
            select_special(population, POOL_SIZE, SelectMode::Best, ctx.direction()).top;
        let mean = mean_position(pool.iter().map(Solution::position));
        // The mean of feasible points is feasible; no repair needed.
        pool.push(ctx.evaluator().refit(mean, population.len())?);
        Ok(pool)
    }

    /// Concentration update for one agent.
    fn concentration_update(
        &self,
        agent: &Solution,
        pool: &[Solution],
        t: f64,
        rng: &mut StdRng,
    ) -> Vec<f64> {
        let EoConfig { a1, v, gp, .. } = self.config;
        let x = agent.position();
        let d = x.len();

        let lamda: Vec<f64> = (0..d).map(|_| rng.random::<f64>()).collect();
        let r: Vec<f64> = (0..d).map(|_| rng.random::<f64>()).collect();
        let c_eq = pool[rng.random_range(0..pool.len())].position();
        let r1: f64 = rng.random();
        let r2: f64 = rng.random();
        let gcp = if r2 >= gp { 0.5 * r1 } else { 0.0 };

        (0..d)
            .map(|j| {
                let f = a1 * sign(r[j] - 0.5) * ((-lamda[j] * t).exp() - 1.0);
                let g0 = gcp * (c_eq[j] - lamda[j] * x[j]);
                let g = g0 * f;
                c_eq[j] + (x[j] - c_eq[j]) * f + (g * v / lamda[j]) * (1.0 - f)
            })
            .collect()
    }

    /// Base / adaptive step: one concentration update per agent.
    fn update_population(
        &self,
        population: &[Solution],
        pool: &[Solution],
        ctx: &mut EpochContext<'_, '_>,
    ) -> Result<Vec<Solution>> {
        let tau = ctx.progress();
        let t = (1.0 - tau).powf(self.config.a2 * tau);
        let adaptive = self.config.variant == EoVariant::Adaptive;
        let fit_average = mean_target(population);
        let repair = self.config.repair;

        ctx.map_agents(population.len(), |idx, rng, view| {
            let agent = &population[idx];
            let mut pos_new = self.concentration_update(agent, pool, t, rng);
            if adaptive && enlarges_step(view.direction(), agent.target(), fit_average) {
                for x in pos_new.iter_mut() {
                    *x *= 0.5 + rng.random::<f64>();
                }
            }
            view.evaluator().amend_and_refit(pos_new, repair, rng, idx)
        })
    }

    /// Rebuilds the population from thirds: survivors, their Gaussian
    /// mutants, and random points around the pool leader. Any remainder is
    /// filled with distinct pool members.
    fn rebuild_by_thirds(
        &self,
        updated: Vec<Solution>,
        pool: &[Solution],
        ctx: &mut EpochContext<'_, '_>,
    ) -> Result<Vec<Solution>> {
        let pop_size = updated.len();
        let third = pop_size / 3;
        let repair = self.config.repair;

        let survivors = select_special(&updated, third, SelectMode::Best, ctx.direction()).top;

        let mutants = ctx.map_agents(third, |i, rng, view| {
            let pos_new: Vec<f64> = survivors[i]
                .position()
                .iter()
                .map(|&x| x * (1.0 + rng.sample::<f64, _>(StandardNormal)))
                .collect();
            view.evaluator()
                .amend_and_refit(pos_new, repair, rng, third + i)
        })?;

        let survivors_mean = mean_position(survivors.iter().map(Solution::position));
        let leader = pool[0].position();
        let reseeded = ctx.map_agents(third, |i, rng, view| {
            let pos_new = reseed_around_leader(view.problem(), leader, &survivors_mean, rng);
            view.evaluator()
                .amend_and_refit(pos_new, repair, rng, 2 * third + i)
        })?;

        let mut next = Vec::with_capacity(pop_size);
        next.extend(survivors);
        next.extend(mutants);
        next.extend(reseeded);

        let n_left = pop_size - next.len();
        let picks = rand::seq::index::sample(ctx.rng(), pool.len(), n_left.min(pool.len()));
        next.extend(picks.iter().map(|i| pool[i].clone()));
        Ok(next)
    }
}

/// Adaptive rule: agents not strictly better than the mean target get the
/// enlarged step.
fn enlarges_step(direction: Direction, target: f64, mean: f64) -> bool {
    !direction.is_better(target, mean)
}

/// `(leader - mean) - u1 * (lower + u2 * (upper - lower))`.
fn reseed_around_leader(
    problem: &Problem,
    leader: &[f64],
    mean: &[f64],
    rng: &mut StdRng,
) -> Vec<f64> {
    let u1: f64 = rng.random();
    let u2: f64 = rng.random();
    leader
        .iter()
        .zip(mean)
        .zip(problem.lower_bound().iter().zip(problem.upper_bound()))
        .map(|((&c, &m), (&lo, &hi))| (c - m) - u1 * (lo + u2 * (hi - lo)))
        .collect()
}

impl Strategy for EquilibriumOptimizer {
    fn name(&self) -> &'static str {
        match self.config.variant {
            EoVariant::Base => "base-eo",
            EoVariant::Modified => "modified-eo",
            EoVariant::Adaptive => "adaptive-eo",
        }
    }

    fn evaluations_per_epoch(&self, pop_size: usize) -> usize {
        match self.config.variant {
            EoVariant::Modified => pop_size + 1 + 2 * (pop_size / 3),
            EoVariant::Base | EoVariant::Adaptive => pop_size + 1,
        }
    }

    fn min_pop_size(&self) -> usize {
        POOL_SIZE
    }

    fn validate(&self) -> Result<()> {
        self.config.validate()
    }

    fn evolve(
        &self,
        population: &[Solution],
        ctx: &mut EpochContext<'_, '_>,
    ) -> Result<Vec<Solution>> {
        let pool = self.equilibrium_pool(population, ctx)?;
        let updated = self.update_population(population, &pool, ctx)?;
        match self.config.variant {
            EoVariant::Modified => self.rebuild_by_thirds(updated, &pool, ctx),
            EoVariant::Base | EoVariant::Adaptive => Ok(updated),
        }
    }
}
