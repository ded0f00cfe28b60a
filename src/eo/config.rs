//! Equilibrium Optimizer configuration.
//!
//! [`EoConfig`] holds the variant selector and the fixed constants of the
//! concentration-update equation.

use crate::core::BoundaryRepair;
use crate::error::{OptimizerError, Result};

/// Which member of the equilibrium family to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EoVariant {
    /// Plain concentration update toward a random pool member.
    #[default]
    Base,

    /// Base update followed by a three-part rebuild: top third kept,
    /// a Gaussian-mutated copy of it, and a third re-seeded around the
    /// pool leader.
    Modified,

    /// Base update where agents no better than the mean target get a
    /// random multiplicative step in `[0.5, 1.5)`.
    Adaptive,
}

/// Configuration for the Equilibrium Optimizer family.
///
/// # Defaults
///
/// ```
/// use u_swarmopt::eo::{EoConfig, EoVariant};
///
/// let config = EoConfig::default();
/// assert_eq!(config.variant, EoVariant::Base);
/// assert_eq!(config.gp, 0.5);
/// ```
///
/// # Presets
///
/// ```
/// use u_swarmopt::eo::{EoConfig, EoVariant};
///
/// let config = EoConfig::modified().with_gp(0.4);
/// assert_eq!(config.variant, EoVariant::Modified);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EoConfig {
    /// Family member.
    pub variant: EoVariant,

    /// Exploration weight of the exponential term `F`.
    pub a1: f64,

    /// Exponent controlling how fast the time term `t` decays.
    pub a2: f64,

    /// Unit volume in the generation-rate term.
    pub v: f64,

    /// Generation probability: the generation-rate term is active when a
    /// uniform draw is at least `gp`.
    pub gp: f64,

    /// Repair applied to every new position.
    pub repair: BoundaryRepair,
}

impl Default for EoConfig {
    fn default() -> Self {
        Self {
            variant: EoVariant::Base,
            a1: 2.0,
            a2: 1.0,
            v: 1.0,
            gp: 0.5,
            repair: BoundaryRepair::Clamp,
        }
    }
}

impl EoConfig {
    /// Base Equilibrium Optimizer (Faramarzi et al., 2020).
    pub fn base() -> Self {
        Self::default()
    }

    /// Modified Equilibrium Optimizer with mutation (Gupta et al., 2020).
    pub fn modified() -> Self {
        Self {
            variant: EoVariant::Modified,
            ..Self::default()
        }
    }

    /// Adaptive Equilibrium Optimizer (Wunnava et al., 2020).
    pub fn adaptive() -> Self {
        Self {
            variant: EoVariant::Adaptive,
            ..Self::default()
        }
    }

    /// Sets the family member.
    pub fn with_variant(mut self, variant: EoVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the exploration weight `a1`.
    pub fn with_a1(mut self, a1: f64) -> Self {
        self.a1 = a1;
        self
    }

    /// Sets the time-decay exponent `a2`.
    pub fn with_a2(mut self, a2: f64) -> Self {
        self.a2 = a2;
        self
    }

    /// Sets the unit volume `v`.
    pub fn with_v(mut self, v: f64) -> Self {
        self.v = v;
        self
    }

    /// Sets the generation probability, clamped to `[0, 1]`.
    pub fn with_gp(mut self, gp: f64) -> Self {
        self.gp = gp.clamp(0.0, 1.0);
        self
    }

    /// Sets the boundary repair policy.
    pub fn with_repair(mut self, repair: BoundaryRepair) -> Self {
        self.repair = repair;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.a1.is_finite() || self.a1 <= 0.0 {
            return Err(OptimizerError::invalid("a1 must be positive and finite"));
        }
        if !self.a2.is_finite() || self.a2 < 0.0 {
            return Err(OptimizerError::invalid("a2 must be non-negative and finite"));
        }
        if !self.v.is_finite() {
            return Err(OptimizerError::invalid("v must be finite"));
        }
        if !(0.0..=1.0).contains(&self.gp) {
            return Err(OptimizerError::invalid("gp must lie in [0, 1]"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EoConfig::default();
        assert_eq!(config.variant, EoVariant::Base);
        assert!((config.a1 - 2.0).abs() < 1e-15);
        assert!((config.a2 - 1.0).abs() < 1e-15);
        assert!((config.v - 1.0).abs() < 1e-15);
        assert!((config.gp - 0.5).abs() < 1e-15);
        assert_eq!(config.repair, BoundaryRepair::Clamp);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(EoConfig::base().variant, EoVariant::Base);
        assert_eq!(EoConfig::modified().variant, EoVariant::Modified);
        assert_eq!(EoConfig::adaptive().variant, EoVariant::Adaptive);
        assert_eq!(EoConfig::adaptive().gp, EoConfig::base().gp);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EoConfig::default()
            .with_variant(EoVariant::Adaptive)
            .with_a1(3.0)
            .with_a2(2.0)
            .with_v(0.5)
            .with_gp(1.7)
            .with_repair(BoundaryRepair::Random);
        assert_eq!(config.variant, EoVariant::Adaptive);
        assert_eq!(config.a1, 3.0);
        assert_eq!(config.a2, 2.0);
        assert_eq!(config.v, 0.5);
        assert_eq!(config.gp, 1.0);
        assert_eq!(config.repair, BoundaryRepair::Random);
    }

    #[test]
    fn test_validate_rejects_bad_constants() {
        assert!(EoConfig::default().with_a1(0.0).validate().is_err());
        assert!(EoConfig::default().with_a2(-1.0).validate().is_err());
        assert!(EoConfig::default().with_v(f64::NAN).validate().is_err());

        let mut config = EoConfig::default();
        config.gp = 2.0;
        assert!(config.validate().is_err());
    }
}
