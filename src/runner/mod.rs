//! Optimization driver.
//!
//! - [`RunConfig`]: population size, epoch budget, seed, parallelism
//! - [`Runner`]: executes the epoch loop for any [`Strategy`](crate::strategy::Strategy)
//! - [`OptimizeResult`] / [`History`]: best solution and per-epoch record

mod config;
mod driver;
mod types;

pub use config::RunConfig;
pub use driver::Runner;
pub use types::{History, OptimizeResult};
