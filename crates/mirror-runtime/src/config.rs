//! System configuration and reusable pair scenarios.

use crate::error::Result;
use mirror_core::agent::MirrorAgent;
use mirror_core::config::{AgentConfig, StateConfig, TrustConfig};
use mirror_core::error::MirrorError;
use mirror_core::state::State;
use mirror_core::trust::TrustModel;
use mirror_core::types::Tick;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Seed offset separating a run from its paired control run.
pub const PAIRED_SEED_OFFSET: u64 = 1000;

/// Configuration for a pairwise system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Energy lost by each agent per step (default: 0.002).
    pub energy_depletion_rate: f64,
    /// Steps during which neither agent may disengage (default: 50).
    pub grace_period: Tick,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            energy_depletion_rate: 0.002,
            grace_period: 50,
        }
    }
}

impl SystemConfig {
    pub fn with_depletion_rate(mut self, rate: f64) -> Self {
        self.energy_depletion_rate = rate;
        self
    }

    pub fn with_grace_period(mut self, grace_period: Tick) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let rate = self.energy_depletion_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(MirrorError::out_of_range("energy_depletion_rate", 0.0, 1.0, rate).into());
        }
        Ok(())
    }
}

/// Everything needed to set up one seeded trajectory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairScenario {
    pub agent_a: AgentConfig,
    pub agent_b: AgentConfig,
    pub state_a: StateConfig,
    pub state_b: StateConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

impl PairScenario {
    /// The reference pairing: complexity 0.5 / 0.7, openness 0.7 / 0.6,
    /// full energy, dimension 100, no trust.
    pub fn reference() -> Self {
        Self {
            agent_a: AgentConfig::default(),
            agent_b: AgentConfig::default(),
            state_a: StateConfig::new(0.5, 0.7),
            state_b: StateConfig::new(0.7, 0.6),
            system: SystemConfig::default(),
        }
    }

    /// Give both agents the same trust model and starting trust.
    pub fn with_trust(self, model: TrustModel, initial_trust: f64) -> Self {
        self.with_trusts(model, initial_trust, initial_trust)
    }

    /// Give both agents the same trust model with separate starting trust.
    pub fn with_trusts(mut self, model: TrustModel, trust_a: f64, trust_b: f64) -> Self {
        self.agent_a.trust = TrustConfig::new(model, trust_a);
        self.agent_b.trust = TrustConfig::new(model, trust_b);
        self
    }

    /// Set both agents' complexity.
    pub fn with_complexity(mut self, complexity: f64) -> Self {
        self.state_a.complexity = complexity;
        self.state_b.complexity = complexity;
        self
    }

    pub fn with_system(mut self, system: SystemConfig) -> Self {
        self.system = system;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.agent_a.validate()?;
        self.agent_b.validate()?;
        self.state_a.validate()?;
        self.state_b.validate()?;
        if self.state_a.dimension != self.state_b.dimension {
            return Err(MirrorError::DimensionMismatch {
                expected: self.state_a.dimension,
                got: self.state_b.dimension,
            }
            .into());
        }
        self.system.validate()
    }

    /// Build both agents and the run's RNG stream from `seed`.
    ///
    /// The stream draws A's state, then B's, and is then handed to the
    /// system for mirror noise.
    pub fn build(&self, seed: u64) -> Result<(MirrorAgent, MirrorAgent, StdRng)> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let state_a = State::from_config(&self.state_a, &mut rng)?;
        let state_b = State::from_config(&self.state_b, &mut rng)?;
        let a = MirrorAgent::from_config("Agent_A", state_a, &self.agent_a)?
            .with_seed(seed.wrapping_mul(2));
        let b = MirrorAgent::from_config("Agent_B", state_b, &self.agent_b)?
            .with_seed(seed.wrapping_mul(2).wrapping_add(1));
        Ok((a, b, rng))
    }
}

impl Default for PairScenario {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_scenario_is_valid() {
        let scenario = PairScenario::reference();
        assert!(scenario.validate().is_ok());
        assert_eq!(scenario.state_b.complexity, 0.7);
        assert_eq!(scenario.system.grace_period, 50);
    }

    #[test]
    fn build_is_seeded() {
        let scenario = PairScenario::reference();
        let (a1, b1, _) = scenario.build(4577).unwrap();
        let (a2, b2, _) = scenario.build(4577).unwrap();
        assert_eq!(a1.state().vector(), a2.state().vector());
        assert_eq!(b1.state().vector(), b2.state().vector());
        assert_eq!(a1.id(), a2.id());
        assert_ne!(a1.id(), b1.id());
        assert_ne!(a1.state().vector(), b1.state().vector());
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let mut scenario = PairScenario::reference();
        scenario.state_b.dimension = 50;
        assert!(scenario.build(1).is_err());
    }

    #[test]
    fn negative_depletion_is_rejected() {
        let config = SystemConfig::default().with_depletion_rate(-0.01);
        assert!(config.validate().is_err());
    }
}
