//! Sea Lion Optimization configuration.

use crate::core::math::gamma;
use crate::core::BoundaryRepair;
use crate::error::{OptimizerError, Result};
use std::f64::consts::PI;

/// Which member of the sea-lion family to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SloVariant {
    /// Leader-directed contraction or rotation around the global best,
    /// followed by greedy pairwise replacement.
    #[default]
    Base,

    /// Shrink-encircling Lévy flights and personal-best memory, with
    /// opposition-based initialization.
    Modified,

    /// Historical-movement exploitation and opposition-probed exploration,
    /// with personal-best memory and opposition-based initialization.
    Improved,
}

/// Configuration for the Sea Lion Optimization family.
///
/// Fields that a variant does not use are ignored by it; the presets set
/// the values each variant was published with.
///
/// # Presets
///
/// ```
/// use u_swarmopt::slo::{SloConfig, SloVariant};
///
/// let base = SloConfig::base();
/// assert_eq!(base.leader_threshold, 0.25);
///
/// let improved = SloConfig::improved().with_c1(1.5);
/// assert_eq!(improved.variant, SloVariant::Improved);
/// assert_eq!(improved.leader_threshold, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SloConfig {
    /// Family member.
    pub variant: SloVariant,

    /// Leader-strength threshold switching between the two move types.
    ///
    /// Base and Improved contract toward a leader below it and rotate
    /// around the global best above it. Modified rotates at or above it.
    pub leader_threshold: f64,

    /// Probability of the Lévy move while `c > 1` (Modified only).
    pub pa_explore: f64,

    /// Probability of the Lévy move once `c <= 1` (Modified only).
    pub pa_exploit: f64,

    /// Lévy stability exponent in `(0, 2]` (Modified only).
    pub beta: f64,

    /// Weight of the global-best pull (Improved only).
    pub c1: f64,

    /// Weight of the personal-best pull (Improved only).
    pub c2: f64,

    /// Repair applied to every new position.
    pub repair: BoundaryRepair,

    /// Repair applied to the two opposition probes (Improved only).
    pub probe_repair: BoundaryRepair,
}

impl Default for SloConfig {
    fn default() -> Self {
        Self {
            variant: SloVariant::Base,
            leader_threshold: 0.25,
            pa_explore: 0.3,
            pa_exploit: 0.7,
            beta: 1.0,
            c1: 1.2,
            c2: 1.2,
            repair: BoundaryRepair::Random,
            probe_repair: BoundaryRepair::Clamp,
        }
    }
}

impl SloConfig {
    /// Sea Lion Optimization (Masadeh, Mahafzah & Sharieh, 2019).
    pub fn base() -> Self {
        Self::default()
    }

    /// Lévy-flight variant with personal-best memory.
    pub fn modified() -> Self {
        Self {
            variant: SloVariant::Modified,
            leader_threshold: 0.6,
            ..Self::default()
        }
    }

    /// Improved variant with historical movement and opposition probing.
    pub fn improved() -> Self {
        Self {
            variant: SloVariant::Improved,
            leader_threshold: 0.5,
            ..Self::default()
        }
    }

    /// Sets the family member.
    pub fn with_variant(mut self, variant: SloVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the leader-strength threshold.
    pub fn with_leader_threshold(mut self, threshold: f64) -> Self {
        self.leader_threshold = threshold;
        self
    }

    /// Sets both Lévy-move probabilities, each clamped to `[0, 1]`.
    pub fn with_levy_probabilities(mut self, explore: f64, exploit: f64) -> Self {
        self.pa_explore = explore.clamp(0.0, 1.0);
        self.pa_exploit = exploit.clamp(0.0, 1.0);
        self
    }

    /// Sets the Lévy stability exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the global-best weight.
    pub fn with_c1(mut self, c1: f64) -> Self {
        self.c1 = c1;
        self
    }

    /// Sets the personal-best weight.
    pub fn with_c2(mut self, c2: f64) -> Self {
        self.c2 = c2;
        self
    }

    /// Sets the repair policy for new positions.
    pub fn with_repair(mut self, repair: BoundaryRepair) -> Self {
        self.repair = repair;
        self
    }

    /// Sets the repair policy for opposition probes.
    pub fn with_probe_repair(mut self, repair: BoundaryRepair) -> Self {
        self.probe_repair = repair;
        self
    }

    /// Mantegna's scale for the Lévy numerator draw:
    ///
    /// `σ = (Γ(1+β) sin(πβ/2) / (Γ((1+β)/2) β 2^((β-1)/2)))^(1/β)`
    pub fn levy_sigma(&self) -> f64 {
        let beta = self.beta;
        let up = gamma(1.0 + beta) * (PI * beta / 2.0).sin();
        let down = gamma((1.0 + beta) / 2.0) * beta * 2f64.powf((beta - 1.0) / 2.0);
        (up / down).powf(1.0 / beta)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.leader_threshold.is_finite() || self.leader_threshold < 0.0 {
            return Err(OptimizerError::invalid(
                "leader_threshold must be non-negative and finite",
            ));
        }
        if !(0.0..=1.0).contains(&self.pa_explore) || !(0.0..=1.0).contains(&self.pa_exploit) {
            return Err(OptimizerError::invalid("Lévy probabilities must lie in [0, 1]"));
        }
        if !(self.beta > 0.0 && self.beta <= 2.0) {
            return Err(OptimizerError::invalid(format!(
                "beta must lie in (0, 2], got {}",
                self.beta
            )));
        }
        if !self.c1.is_finite() || !self.c2.is_finite() {
            return Err(OptimizerError::invalid("c1 and c2 must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SloConfig::default();
        assert_eq!(config.variant, SloVariant::Base);
        assert!((config.leader_threshold - 0.25).abs() < 1e-15);
        assert!((config.beta - 1.0).abs() < 1e-15);
        assert!((config.c1 - 1.2).abs() < 1e-15);
        assert!((config.c2 - 1.2).abs() < 1e-15);
        assert_eq!(config.repair, BoundaryRepair::Random);
        assert_eq!(config.probe_repair, BoundaryRepair::Clamp);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let m = SloConfig::modified();
        assert_eq!(m.variant, SloVariant::Modified);
        assert!((m.leader_threshold - 0.6).abs() < 1e-15);
        assert!((m.pa_explore - 0.3).abs() < 1e-15);
        assert!((m.pa_exploit - 0.7).abs() < 1e-15);

        let i = SloConfig::improved();
        assert_eq!(i.variant, SloVariant::Improved);
        assert!((i.leader_threshold - 0.5).abs() < 1e-15);
        assert!(m.validate().is_ok() && i.validate().is_ok());
    }

    #[test]
    fn test_levy_sigma() {
        // β = 1 collapses every gamma term to 1.
        assert!((SloConfig::default().levy_sigma() - 1.0).abs() < 1e-12);
        // Reference value for β = 1.5.
        let sigma = SloConfig::default().with_beta(1.5).levy_sigma();
        assert!((sigma - 0.696_574_502_557_697_7).abs() < 1e-9, "{sigma}");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(SloConfig::default().with_beta(0.0).validate().is_err());
        assert!(SloConfig::default().with_beta(2.5).validate().is_err());
        assert!(SloConfig::default().with_leader_threshold(-1.0).validate().is_err());
        assert!(SloConfig::default().with_c1(f64::INFINITY).validate().is_err());

        let mut config = SloConfig::default();
        config.pa_explore = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_levy_probabilities_clamped() {
        let config = SloConfig::modified().with_levy_probabilities(-0.2, 1.4);
        assert_eq!(config.pa_explore, 0.0);
        assert_eq!(config.pa_exploit, 1.0);
    }
}
