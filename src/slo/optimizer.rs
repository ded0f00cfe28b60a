//! Sea Lion Optimization evolve step.
//!
//! Each epoch draws a single leader-strength signal that decides, for the
//! whole population, between encircling a leader (contraction toward the
//! global best, or toward a random agent while the coefficient `c` is
//! still above 1) and a spiral-like rotation around the global best.
//!
//! The base signal is `|sin(2πt)(1 + sin(2π(1-t))) / sin(2π(1-t))|` for a
//! uniform `t`. The denominator is not guarded; a zero draw produces an
//! infinite signal, which simply selects the rotation branch.

use super::config::{SloConfig, SloVariant};
use crate::core::math::sign;
use crate::core::{greedy_replace, uniform, Direction, InitMode, Solution};
use crate::error::Result;
use crate::strategy::{AgentView, EpochContext, Strategy};
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::PI;

/// The Sea Lion Optimization family as a [`Strategy`].
///
/// # Usage
///
/// ```
/// use u_swarmopt::core::{FnObjective, Problem};
/// use u_swarmopt::slo::{SeaLionOptimizer, SloConfig};
/// use u_swarmopt::runner::{RunConfig, Runner};
///
/// let problem = Problem::new(
///     vec![-10.0; 3],
///     vec![10.0; 3],
///     FnObjective(|x: &[f64]| x.iter().map(|v| v.abs()).sum::<f64>()),
/// )
/// .unwrap();
/// let strategy = SeaLionOptimizer::new(SloConfig::improved());
/// let config = RunConfig::default().with_pop_size(20).with_max_epoch(40).with_seed(1);
///
/// let result = Runner::run(&problem, &strategy, &config).unwrap();
/// assert!(result.best_fitness.target < 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct SeaLionOptimizer {
    config: SloConfig,
    levy_sigma: f64,
}

impl Default for SeaLionOptimizer {
    fn default() -> Self {
        Self::new(SloConfig::default())
    }
}

impl SeaLionOptimizer {
    pub fn new(config: SloConfig) -> Self {
        let levy_sigma = config.levy_sigma();
        Self { config, levy_sigma }
    }

    pub fn config(&self) -> &SloConfig {
        &self.config
    }

    /// Base / Improved leader-strength signal.
    fn leader_strength(rng: &mut StdRng) -> f64 {
        let t0: f64 = rng.random();
        let v1 = (2.0 * PI * t0).sin();
        let v2 = (2.0 * PI * (1.0 - t0)).sin();
        (v1 * (1.0 + v2) / v2).abs()
    }

    fn evolve_base(
        &self,
        population: &[Solution],
        ctx: &mut EpochContext<'_, '_>,
    ) -> Result<Vec<Solution>> {
        let c = 2.0 - 2.0 * ctx.progress();
        let sp_leader = Self::leader_strength(ctx.rng());
        let threshold = self.config.leader_threshold;
        let repair = self.config.repair;
        let n = population.len();

        let candidates = ctx.map_agents(n, |idx, rng, view| {
            let x = population[idx].position();
            let best = view.global_best().position();
            let pos_new: Vec<f64> = if sp_leader < threshold {
                if c < 1.0 {
                    encircle(best, x, c, rng)
                } else {
                    let other = random_other(rng, n, idx);
                    encircle(population[other].position(), x, c, rng)
                }
            } else {
                rotate_around(best, x, rng.random_range(-1.0..1.0))
            };
            view.evaluator().amend_and_refit(pos_new, repair, rng, idx)
        })?;

        Ok(greedy_replace(population.to_vec(), candidates, ctx.direction()))
    }

    fn evolve_modified(
        &self,
        population: &[Solution],
        ctx: &mut EpochContext<'_, '_>,
    ) -> Result<Vec<Solution>> {
        let c = 2.0 - 2.0 * ctx.progress();
        let pa = if c > 1.0 {
            self.config.pa_explore
        } else {
            self.config.pa_exploit
        };
        let sp_leader: f64 = ctx.rng().random();
        let threshold = self.config.leader_threshold;
        let repair = self.config.repair;
        let n = population.len();

        let candidates = ctx.map_agents(n, |idx, rng, view| {
            let x = population[idx].position();
            let best = view.global_best().position();
            let pos_new: Vec<f64> = if sp_leader >= threshold {
                let angle = rng.sample::<f64, _>(StandardNormal);
                rotate_around(best, x, angle)
            } else if rng.random::<f64>() < pa {
                let u: f64 = rng.random();
                let dist: Vec<f64> = best
                    .iter()
                    .zip(x)
                    .map(|(&b, &xi)| u * (2.0 * b - xi).abs())
                    .collect();
                self.shrink_encircling_levy(x, &dist, c, view, rng)
            } else {
                let memory = population[rng.random_range(0..n)].memory_position();
                let mirrored: Vec<f64> = best
                    .iter()
                    .zip(memory)
                    .map(|(&b, &m)| 2.0 * b - m)
                    .collect();
                encircle_scaled(&mirrored, x, c, rng.random())
            };
            view.evaluator().amend_and_refit(pos_new, repair, rng, idx)
        })?;

        Ok(adopt_all(population, candidates, ctx))
    }

    /// Lévy-flight step scaled by the shrinking coefficient:
    ///
    /// `(x - sqrt(it + 1) * sign(u - 0.5)) * 0.01 a / |b|^(1/β) * dist * c * D`
    fn shrink_encircling_levy(
        &self,
        x: &[f64],
        dist: &[f64],
        c: f64,
        view: &AgentView<'_, '_>,
        rng: &mut StdRng,
    ) -> Vec<f64> {
        let a = self.levy_sigma * rng.sample::<f64, _>(StandardNormal);
        let b: f64 = rng.sample(StandardNormal);
        let step = levy_step(a, b, self.config.beta);

        let problem = view.problem();
        let d: Vec<f64> = problem
            .lower_bound()
            .iter()
            .zip(problem.upper_bound())
            .map(|(&lo, &hi)| uniform(rng, lo, hi))
            .collect();
        let shift = levy_shift(view.iteration(), rng.random());

        levy_move(x, dist, &d, step * c, shift)
    }

    fn evolve_improved(
        &self,
        population: &[Solution],
        ctx: &mut EpochContext<'_, '_>,
    ) -> Result<Vec<Solution>> {
        let c = 2.0 - 2.0 * ctx.progress();
        let sp_leader = Self::leader_strength(ctx.rng());
        let SloConfig {
            leader_threshold,
            c1,
            c2,
            repair,
            probe_repair,
            ..
        } = self.config;
        let n = population.len();

        let candidates = ctx.map_agents(n, |idx, rng, view| {
            let agent = &population[idx];
            let x = agent.position();
            let best = view.global_best().position();
            let pos_new: Vec<f64> = if sp_leader < leader_threshold {
                if c < 1.0 {
                    // Exploitation pulled by both the global and personal best.
                    let memory = agent.memory_position();
                    let u1: f64 = rng.random();
                    let u2: f64 = rng.random();
                    let u3: f64 = rng.random();
                    let u4: f64 = rng.random();
                    (0..x.len())
                        .map(|j| {
                            let dif1 = (2.0 * u1 * best[j] - x[j]).abs();
                            let dif2 = (2.0 * u2 * memory[j] - x[j]).abs();
                            c1 * u3 * (x[j] - c * dif1) + c2 * u4 * (x[j] - c * dif2)
                        })
                        .collect()
                } else {
                    // Exploration probed in both directions; keep the better side.
                    let problem = view.problem();
                    let forward: Vec<f64> = best
                        .iter()
                        .zip(x)
                        .map(|(&b, &xi)| b + c * rng.sample::<f64, _>(StandardNormal) * (b - xi))
                        .collect();
                    let forward_probe =
                        view.evaluator()
                            .amend_and_refit(forward.clone(), probe_repair, rng, idx)?;
                    let u: f64 = rng.random();
                    let opposite: Vec<f64> = (0..x.len())
                        .map(|j| {
                            problem.lower_bound()[j] + (problem.upper_bound()[j] - best[j])
                                + u * (best[j] - forward[j])
                        })
                        .collect();
                    let opposite_probe =
                        view.evaluator()
                            .amend_and_refit(opposite.clone(), probe_repair, rng, idx)?;
                    keep_better_probe(
                        forward,
                        &forward_probe,
                        opposite,
                        &opposite_probe,
                        view.direction(),
                    )
                }
            } else {
                rotate_around(best, x, rng.random_range(-1.0..1.0))
            };
            view.evaluator().amend_and_refit(pos_new, repair, rng, idx)
        })?;

        Ok(adopt_all(population, candidates, ctx))
    }
}

/// `target - c * |2u * target - x|` with one uniform `u` for all coordinates.
fn encircle(target: &[f64], x: &[f64], c: f64, rng: &mut StdRng) -> Vec<f64> {
    let u: f64 = rng.random();
    target
        .iter()
        .zip(x)
        .map(|(&t, &xi)| t - c * (2.0 * u * t - xi).abs())
        .collect()
}

/// `target - c * |u * target - x|`.
fn encircle_scaled(target: &[f64], x: &[f64], c: f64, u: f64) -> Vec<f64> {
    target
        .iter()
        .zip(x)
        .map(|(&t, &xi)| t - c * (u * t - xi).abs())
        .collect()
}

/// `|best - x| * cos(2π angle) + best`.
fn rotate_around(best: &[f64], x: &[f64], angle: f64) -> Vec<f64> {
    let turn = (2.0 * PI * angle).cos();
    best.iter()
        .zip(x)
        .map(|(&b, &xi)| (b - xi).abs() * turn + b)
        .collect()
}

/// Mantegna step length `0.01 a / |b|^(1/β)`.
fn levy_step(a: f64, b: f64, beta: f64) -> f64 {
    0.01 * a / b.abs().powf(1.0 / beta)
}

/// `sqrt(it + 1) * sign(u - 0.5)`.
fn levy_shift(iteration: f64, u: f64) -> f64 {
    (iteration + 1.0).sqrt() * sign(u - 0.5)
}

/// `(x - shift) * scale * dist * d`, coordinate-wise.
fn levy_move(x: &[f64], dist: &[f64], d: &[f64], scale: f64, shift: f64) -> Vec<f64> {
    x.iter()
        .zip(dist)
        .zip(d)
        .map(|((&xi, &di), &dj)| (xi - shift) * (scale * di) * dj)
        .collect()
}

/// Raw position of the opposition probe pair whose repaired copy scored
/// strictly better; ties keep `forward`.
fn keep_better_probe(
    forward: Vec<f64>,
    forward_probe: &Solution,
    opposite: Vec<f64>,
    opposite_probe: &Solution,
    direction: Direction,
) -> Vec<f64> {
    if opposite_probe.is_better_than(forward_probe, direction) {
        opposite
    } else {
        forward
    }
}

/// Uniform index in `0..n` other than `exclude`. Requires `n >= 2`.
fn random_other(rng: &mut StdRng, n: usize, exclude: usize) -> usize {
    let r = rng.random_range(0..n - 1);
    if r >= exclude {
        r + 1
    } else {
        r
    }
}

/// Pairs each incumbent with its candidate, keeping personal bests.
fn adopt_all(
    population: &[Solution],
    candidates: Vec<Solution>,
    ctx: &EpochContext<'_, '_>,
) -> Vec<Solution> {
    let direction = ctx.direction();
    population
        .iter()
        .cloned()
        .zip(candidates)
        .map(|(incumbent, candidate)| incumbent.adopt_if_better(candidate, direction))
        .collect()
}

impl Strategy for SeaLionOptimizer {
    fn name(&self) -> &'static str {
        match self.config.variant {
            SloVariant::Base => "base-slo",
            SloVariant::Modified => "modified-slo",
            SloVariant::Improved => "improved-slo",
        }
    }

    /// Upper bound: Improved exploration epochs add two probes per agent.
    fn evaluations_per_epoch(&self, pop_size: usize) -> usize {
        match self.config.variant {
            SloVariant::Improved => 3 * pop_size,
            SloVariant::Base | SloVariant::Modified => pop_size,
        }
    }

    fn init_mode(&self) -> InitMode {
        match self.config.variant {
            SloVariant::Base => InitMode::Uniform,
            SloVariant::Modified | SloVariant::Improved => InitMode::Opposition,
        }
    }

    fn uses_personal_best(&self) -> bool {
        self.config.variant != SloVariant::Base
    }

    fn validate(&self) -> Result<()> {
        self.config.validate()
    }

    fn evolve(
        &self,
        population: &[Solution],
        ctx: &mut EpochContext<'_, '_>,
    ) -> Result<Vec<Solution>> {
        match self.config.variant {
            SloVariant::Base => self.evolve_base(population, ctx),
            SloVariant::Modified => self.evolve_modified(population, ctx),
            SloVariant::Improved => self.evolve_improved(population, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        best_of, initialize, is_feasible, solution_for_test, Evaluator, FnObjective, Problem,
    };
    use rand::SeedableRng;

    fn sphere() -> Problem {
        Problem::new(
            vec![-5.0, -5.0, -5.0],
            vec![5.0, 5.0, 5.0],
            FnObjective(|x: &[f64]| x.iter().map(|v| v * v).sum::<f64>()),
        )
        .unwrap()
    }

    /// Runs `epochs` evolve steps and returns every intermediate population.
    fn trajectory(config: SloConfig, epochs: usize) -> Vec<Vec<Solution>> {
        let problem = sphere();
        let ev = Evaluator::new(&problem);
        let mut rng = StdRng::seed_from_u64(11);
        let strategy = SeaLionOptimizer::new(config);
        let mut pop = initialize(
            &ev,
            8,
            strategy.init_mode(),
            strategy.uses_personal_best(),
            &mut rng,
        )
        .unwrap();
        let mut best = best_of(&pop, Direction::Minimize).clone();
        let mut history = vec![pop.clone()];
        for epoch in 1..=epochs {
            let next = {
                let mut ctx = EpochContext::new(&ev, &best, epoch, epochs, false, &mut rng);
                strategy.evolve(&pop, &mut ctx).unwrap()
            };
            pop = next;
            let cand = best_of(&pop, Direction::Minimize);
            if cand.is_better_than(&best, Direction::Minimize) {
                best = cand.clone();
            }
            history.push(pop.clone());
        }
        history
    }

    #[test]
    fn test_slots_never_regress() {
        for config in [SloConfig::base(), SloConfig::modified(), SloConfig::improved()] {
            let history = trajectory(config.clone(), 15);
            for window in history.windows(2) {
                for (old, new) in window[0].iter().zip(&window[1]) {
                    assert!(
                        new.target() <= old.target(),
                        "{:?}: slot worsened {} -> {}",
                        config.variant,
                        old.target(),
                        new.target()
                    );
                }
            }
        }
    }

    #[test]
    fn test_positions_stay_feasible() {
        let problem = sphere();
        for config in [SloConfig::base(), SloConfig::modified(), SloConfig::improved()] {
            for pop in trajectory(config, 10) {
                assert_eq!(pop.len(), 8);
                assert!(pop.iter().all(|s| is_feasible(s.position(), &problem)));
            }
        }
    }

    #[test]
    fn test_personal_best_never_regresses() {
        for config in [SloConfig::modified(), SloConfig::improved()] {
            let history = trajectory(config, 15);
            for window in history.windows(2) {
                for (old, new) in window[0].iter().zip(&window[1]) {
                    let old_pb = old.personal_best().unwrap().fitness.target;
                    let new_pb = new.personal_best().unwrap().fitness.target;
                    assert!(new_pb <= old_pb);
                    assert!(new_pb <= new.target());
                }
            }
        }
    }

    #[test]
    fn test_base_has_no_memory() {
        let history = trajectory(SloConfig::base(), 3);
        assert!(history
            .iter()
            .flatten()
            .all(|s| s.personal_best().is_none()));
    }

    #[test]
    fn test_random_other_excludes_self() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let r = random_other(&mut rng, 4, 2);
            assert!(r < 4 && r != 2);
        }
    }

    #[test]
    fn test_move_formulas() {
        assert_eq!(rotate_around(&[1.0], &[3.0], 0.0), vec![3.0]);
        assert_eq!(rotate_around(&[1.0], &[3.0], 0.5), vec![-1.0]);
        assert_eq!(encircle_scaled(&[2.0], &[1.0], 0.5, 1.0), vec![1.5]);
    }

    #[test]
    fn test_levy_step_and_shift() {
        assert!((levy_step(2.0, 4.0, 2.0) - 0.01).abs() < 1e-15);
        assert!((levy_step(-3.0, -0.5, 1.0) + 0.06).abs() < 1e-15);
        assert_eq!(levy_shift(3.0, 0.7), 2.0);
        assert_eq!(levy_shift(3.0, 0.2), -2.0);
        assert_eq!(levy_shift(0.0, 0.5), 0.0);
    }

    #[test]
    fn test_levy_move_formula() {
        // it = 3, u = 0.7, a = 2, b = 4, beta = 2, c = 1.5
        let scale = levy_step(2.0, 4.0, 2.0) * 1.5;
        let shift = levy_shift(3.0, 0.7);
        let moved = levy_move(&[2.0, -1.0], &[0.5, 1.0], &[3.0, 4.0], scale, shift);
        assert_eq!(moved[0], 0.0);
        assert!((moved[1] - (-3.0 * 0.015 * 4.0)).abs() < 1e-12, "{}", moved[1]);

        // A negative shift moves the anchor the other way.
        let moved = levy_move(&[2.0], &[1.0], &[1.0], 1.0, levy_shift(0.0, 0.1));
        assert_eq!(moved, vec![3.0]);
    }

    #[test]
    fn test_opposition_probe_needs_strict_improvement() {
        let forward = vec![1.0];
        let opposite = vec![-1.0];
        let probe = |target: f64| solution_for_test(vec![0.0], target);

        let kept = |fwd: f64, opp: f64, direction: Direction| {
            keep_better_probe(
                forward.clone(),
                &probe(fwd),
                opposite.clone(),
                &probe(opp),
                direction,
            )
        };
        assert_eq!(kept(2.0, 1.0, Direction::Minimize), opposite);
        assert_eq!(kept(2.0, 2.0, Direction::Minimize), forward);
        assert_eq!(kept(2.0, 3.0, Direction::Minimize), forward);
        assert_eq!(kept(2.0, 3.0, Direction::Maximize), opposite);
        assert_eq!(kept(2.0, 2.0, Direction::Maximize), forward);
    }

    #[test]
    fn test_leader_strength_is_non_negative() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            assert!(SeaLionOptimizer::leader_strength(&mut rng) >= 0.0);
        }
    }

    #[test]
    fn test_strategy_metadata() {
        let base = SeaLionOptimizer::new(SloConfig::base());
        assert_eq!(base.name(), "base-slo");
        assert_eq!(base.init_mode(), InitMode::Uniform);
        assert!(!base.uses_personal_best());

        let improved = SeaLionOptimizer::new(SloConfig::improved());
        assert_eq!(improved.name(), "improved-slo");
        assert_eq!(improved.init_mode(), InitMode::Opposition);
        assert!(improved.uses_personal_best());
        assert_eq!(improved.evaluations_per_epoch(10), 30);
    }
}
