//! Runtime-selectable strategy.

use super::types::{EpochContext, Strategy};
use crate::core::{InitMode, Solution};
use crate::eo::{EoConfig, EquilibriumOptimizer};
use crate::error::{OptimizerError, Result};
use crate::slo::{SeaLionOptimizer, SloConfig};

/// Every built-in strategy, dispatched by variant.
///
/// ```
/// use u_swarmopt::strategy::{Algorithm, Strategy};
///
/// let algo = Algorithm::from_name("improved-slo").unwrap();
/// assert_eq!(algo.name(), "improved-slo");
/// assert_eq!(Algorithm::all().len(), 6);
/// ```
#[derive(Debug, Clone)]
pub enum Algorithm {
    Equilibrium(EquilibriumOptimizer),
    SeaLion(SeaLionOptimizer),
}

impl Algorithm {
    pub fn base_eo() -> Self {
        Self::Equilibrium(EquilibriumOptimizer::new(EoConfig::base()))
    }

    pub fn modified_eo() -> Self {
        Self::Equilibrium(EquilibriumOptimizer::new(EoConfig::modified()))
    }

    pub fn adaptive_eo() -> Self {
        Self::Equilibrium(EquilibriumOptimizer::new(EoConfig::adaptive()))
    }

    pub fn base_slo() -> Self {
        Self::SeaLion(SeaLionOptimizer::new(SloConfig::base()))
    }

    pub fn modified_slo() -> Self {
        Self::SeaLion(SeaLionOptimizer::new(SloConfig::modified()))
    }

    pub fn improved_slo() -> Self {
        Self::SeaLion(SeaLionOptimizer::new(SloConfig::improved()))
    }

    /// All six strategies with their published defaults.
    pub fn all() -> Vec<Self> {
        vec![
            Self::base_eo(),
            Self::modified_eo(),
            Self::adaptive_eo(),
            Self::base_slo(),
            Self::modified_slo(),
            Self::improved_slo(),
        ]
    }

    /// Looks up a default-configured strategy by its [`Strategy::name`].
    pub fn from_name(name: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|algo| algo.name() == name)
            .ok_or_else(|| OptimizerError::invalid(format!("unknown strategy '{name}'")))
    }

    fn inner(&self) -> &dyn Strategy {
        match self {
            Self::Equilibrium(eo) => eo,
            Self::SeaLion(slo) => slo,
        }
    }
}

impl From<EquilibriumOptimizer> for Algorithm {
    fn from(eo: EquilibriumOptimizer) -> Self {
        Self::Equilibrium(eo)
    }
}

impl From<SeaLionOptimizer> for Algorithm {
    fn from(slo: SeaLionOptimizer) -> Self {
        Self::SeaLion(slo)
    }
}

impl Strategy for Algorithm {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn evaluations_per_epoch(&self, pop_size: usize) -> usize {
        self.inner().evaluations_per_epoch(pop_size)
    }

    fn init_mode(&self) -> InitMode {
        self.inner().init_mode()
    }

    fn uses_personal_best(&self) -> bool {
        self.inner().uses_personal_best()
    }

    fn min_pop_size(&self) -> usize {
        self.inner().min_pop_size()
    }

    fn validate(&self) -> Result<()> {
        self.inner().validate()
    }

    fn evolve(
        &self,
        population: &[Solution],
        ctx: &mut EpochContext<'_, '_>,
    ) -> Result<Vec<Solution>> {
        self.inner().evolve(population, ctx)
    }
}
