//! Population primitives.
//!
//! Free functions over `&[Solution]` used by every strategy: initialization,
//! sorted views of the best or worst agents, and greedy pairwise
//! replacement.

use super::bounds::random_position;
use super::evaluator::Evaluator;
use super::problem::Direction;
use super::solution::Solution;
use crate::error::Result;
use rand::Rng;

/// Which end of the population [`select_special`] extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Best agents first.
    Best,
    /// Worst agents first.
    Worst,
}

/// How the initial population is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitMode {
    /// Each coordinate uniform within its bounds.
    #[default]
    Uniform,
    /// Uniform draw plus its reflection `lower + upper - x`; the better
    /// of the two becomes the agent. Costs two evaluations per agent.
    Opposition,
}

/// Sorted view returned by [`select_special`].
#[derive(Debug, Clone)]
pub struct Special {
    /// Whole population ordered by the requested mode.
    pub sorted: Vec<Solution>,
    /// First `k` entries of `sorted`.
    pub top: Vec<Solution>,
    /// Original population indices of `top`.
    pub indices: Vec<usize>,
}

/// Sorts the population and extracts its `k` best (or worst) agents.
///
/// The sort is stable, so agents with equal targets keep their original
/// relative order. `k` is capped at the population size.
pub fn select_special(
    population: &[Solution],
    k: usize,
    mode: SelectMode,
    direction: Direction,
) -> Special {
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| {
        let ord = direction.cmp_targets(population[a].target(), population[b].target());
        match mode {
            SelectMode::Best => ord,
            SelectMode::Worst => ord.reverse(),
        }
    });

    let sorted: Vec<Solution> = order.iter().map(|&i| population[i].clone()).collect();
    let k = k.min(population.len());
    Special {
        top: sorted[..k].to_vec(),
        indices: order[..k].to_vec(),
        sorted,
    }
}

/// Element-wise keeps the better of `old[i]` and `new[i]`.
///
/// `new[i]` wins only when strictly better, so ties keep the incumbent.
///
/// # Panics
///
/// Panics if the two populations differ in length.
pub fn greedy_replace(
    old: Vec<Solution>,
    new: Vec<Solution>,
    direction: Direction,
) -> Vec<Solution> {
    assert_eq!(old.len(), new.len(), "populations must have equal size");
    old.into_iter()
        .zip(new)
        .map(|(o, n)| if n.is_better_than(&o, direction) { n } else { o })
        .collect()
}

/// Returns the best agent of a non-empty population.
///
/// The first of several equally good agents wins.
///
/// # Panics
///
/// Panics if `population` is empty.
pub fn best_of(population: &[Solution], direction: Direction) -> &Solution {
    population
        .iter()
        .reduce(|best, s| if s.is_better_than(best, direction) { s } else { best })
        .expect("population must not be empty")
}

/// Returns the worst agent of a non-empty population.
///
/// # Panics
///
/// Panics if `population` is empty.
pub fn worst_of(population: &[Solution], direction: Direction) -> &Solution {
    population
        .iter()
        .reduce(|worst, s| if worst.is_better_than(s, direction) { s } else { worst })
        .expect("population must not be empty")
}

/// Mean target of the population.
pub fn mean_target(population: &[Solution]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    population.iter().map(Solution::target).sum::<f64>() / population.len() as f64
}

/// Builds `pop_size` evaluated agents.
///
/// With `with_memory`, each agent's personal best starts at its own
/// position.
pub fn initialize<R: Rng>(
    evaluator: &Evaluator<'_>,
    pop_size: usize,
    mode: InitMode,
    with_memory: bool,
    rng: &mut R,
) -> Result<Vec<Solution>> {
    (0..pop_size)
        .map(|agent| {
            let position = random_position(evaluator.problem(), rng);
            let solution = create_solution(evaluator, position, mode, agent)?;
            Ok(if with_memory {
                solution.with_memory()
            } else {
                solution
            })
        })
        .collect()
}

/// Evaluates a drawn position, optionally against its reflection.
pub(crate) fn create_solution(
    evaluator: &Evaluator<'_>,
    position: Vec<f64>,
    mode: InitMode,
    agent: usize,
) -> Result<Solution> {
    let problem = evaluator.problem();
    match mode {
        InitMode::Uniform => evaluator.refit(position, agent),
        InitMode::Opposition => {
            let opposite = problem.opposite(&position);
            let original = evaluator.refit(position, agent)?;
            let reflected = evaluator.refit(opposite, agent)?;
            if reflected.is_better_than(&original, problem.direction()) {
                Ok(reflected)
            } else {
                Ok(original)
            }
        }
    }
}
