//! Equilibrium Optimizer (EO) family.
//!
//! A physics-inspired heuristic modelled on mass balance in a control
//! volume: agents move toward equilibrium candidates drawn from a small
//! pool of the best solutions found in the current generation.
//!
//! # Variants
//!
//! - [`EoVariant::Base`]: the original concentration update
//! - [`EoVariant::Modified`]: adds Gaussian mutation of the top third and
//!   re-seeding around the pool leader
//! - [`EoVariant::Adaptive`]: enlarges steps of below-average agents
//!
//! # References
//!
//! - Faramarzi, Heidarinejad, Stephens & Mirjalili (2020), "Equilibrium
//!   optimizer: A novel optimization algorithm", *Knowledge-Based Systems* 191
//! - Gupta, Deep, Mirjalili & Kim (2020), "An efficient equilibrium optimizer
//!   with mutation strategy for numerical optimization", *Applied Soft
//!   Computing* 96
//! - Wunnava, Naik, Panda, Jena & Abraham (2020), "A novel interdependence
//!   based multilevel thresholding technique using adaptive equilibrium
//!   optimizer", *Engineering Applications of AI* 94

mod config;
mod optimizer;

pub use config::{EoConfig, EoVariant};
pub use optimizer::{EquilibriumOptimizer, POOL_SIZE};
