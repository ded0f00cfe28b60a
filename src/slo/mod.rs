//! Sea Lion Optimization (SLO) family.
//!
//! A swarm heuristic modelled on sea-lion hunting: the colony tracks prey
//! (the global best) by encircling it and closes in with spiral-like
//! movements as the shrinking coefficient `c` falls from 2 to 0.
//!
//! # Variants
//!
//! - [`SloVariant::Base`]: leader contraction or rotation, greedy pairwise
//!   replacement
//! - [`SloVariant::Modified`]: Lévy-flight shrink encircling and
//!   personal-best memory
//! - [`SloVariant::Improved`]: personal-best guided exploitation and
//!   opposition-probed exploration
//!
//! # References
//!
//! - Masadeh, Mahafzah & Sharieh (2019), "Sea Lion Optimization Algorithm",
//!   *International Journal of Advanced Computer Science and Applications* 10(5)
//! - Nguyen, Nguyen, Nguyen & Tran (2020), "Improved Sea Lion Optimization
//!   with opposition-based learning", *Proceedings of SoICT 2020*

mod config;
mod optimizer;

pub use config::{SloConfig, SloVariant};
pub use optimizer::SeaLionOptimizer;
