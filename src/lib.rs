//! Population-based stochastic optimization for continuous box-bounded
//! problems.
//!
//! Provides two heuristic families behind a common [`Strategy`] contract:
//!
//! - **Equilibrium Optimizer (EO)**: physics-inspired concentration
//!   updates toward a pool of the best agents, in base, modified
//!   (mutation and re-seeding) and adaptive variants.
//! - **Sea Lion Optimization (SLO)**: swarm hunting moves that encircle
//!   and spiral around the best agent, in base, modified (Lévy flights)
//!   and improved (opposition probing) variants.
//!
//! # Architecture
//!
//! - [`core`]: problem descriptor, solutions, boundary repair, evaluation
//!   and population helpers shared by every strategy
//! - [`strategy`]: the per-epoch [`Strategy`] trait and the
//!   runtime-selectable [`Algorithm`](strategy::Algorithm)
//! - [`runner`]: the epoch loop, run configuration and results
//! - [`error`]: error types
//!
//! The objective is a black box returning one or more `f64` values; the
//! crate never interprets what a position means.
//!
//! # Example
//!
//! ```
//! use u_swarmopt::core::{Direction, FnObjective, Problem};
//! use u_swarmopt::runner::{RunConfig, Runner};
//! use u_swarmopt::strategy::Algorithm;
//!
//! let problem = Problem::new(
//!     vec![0.0; 2],
//!     vec![4.0; 2],
//!     FnObjective(|x: &[f64]| -(x[0] - 1.0).powi(2) - (x[1] - 3.0).powi(2)),
//! )
//! .unwrap()
//! .with_direction(Direction::Maximize);
//!
//! let config = RunConfig::default().with_pop_size(20).with_max_epoch(60).with_seed(3);
//! let result = Runner::run(&problem, &Algorithm::modified_eo(), &config).unwrap();
//! assert!(result.best_fitness.target > -0.5);
//! ```
//!
//! # Features
//!
//! - `parallel`: per-agent work on rayon; seeded runs stay reproducible
//! - `serde`: `Serialize`/`Deserialize` for configs and results

pub mod core;
pub mod eo;
pub mod error;
pub mod runner;
pub mod slo;
pub mod strategy;

pub use error::{ObjectiveError, OptimizerError, Result};
pub use strategy::Strategy;
