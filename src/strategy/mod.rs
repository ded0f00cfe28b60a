//! Strategy contract and runtime dispatch.
//!
//! - [`Strategy`]: the per-epoch population update every heuristic implements
//! - [`EpochContext`] / [`AgentView`]: what a strategy may read during an epoch
//! - [`Algorithm`]: all built-in strategies behind one enum, selectable by name

mod algorithm;
mod types;

pub use algorithm::Algorithm;
pub use types::{AgentView, EpochContext, Strategy};
