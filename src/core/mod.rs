//! Problem, solution, and population primitives.
//!
//! Everything a strategy needs to turn raw positions into evaluated agents
//! lives here:
//!
//! - [`Problem`]: bounds, direction, objective, optional weights
//! - [`Solution`] / [`Fitness`]: a position with its cached evaluation
//! - [`BoundaryRepair`]: clamp or re-sample out-of-bounds coordinates
//! - [`Evaluator`]: the single evaluation path, with call counting
//! - [`select_special`], [`greedy_replace`], [`initialize`]: population
//!   bookkeeping shared by all strategies

mod bounds;
mod evaluator;
pub mod math;
mod population;
mod problem;
mod solution;

pub use bounds::{is_feasible, BoundaryRepair};
pub use evaluator::Evaluator;
pub use population::{
    best_of, greedy_replace, initialize, mean_target, select_special, worst_of, InitMode,
    SelectMode, Special,
};
pub use problem::{Direction, FnObjective, MultiFnObjective, Objective, Problem, TryFnObjective};
pub use solution::{Fitness, PersonalBest, Solution};

pub(crate) use bounds::{random_position, uniform};
#[cfg(test)]
pub(crate) use solution::solution_for_test;
