//! Configuration for states and agents.
//!
//! All tunable parameters that the reference experiments vary live here,
//! with the reference values as defaults. Use with
//! [`MirrorAgent::from_config`](crate::agent::MirrorAgent::from_config) and
//! [`State::from_config`](crate::state::State::from_config).

use crate::error::{ensure_range, MirrorError, Result};
use crate::state::{HistoryLimit, ENERGY_FLOOR};
use crate::trust::TrustModel;
use serde::{Deserialize, Serialize};

/// Parameters for building a random initial state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Vector dimension (default: 100).
    pub dimension: usize,
    /// Complexity in [0, 1] (default: 0.5).
    pub complexity: f64,
    /// Openness in [0, 1] (default: 0.7).
    pub openness: f64,
    /// Initial energy in [0.1, 1.0] (default: 1.0).
    pub energy: f64,
    /// Retained vector history (default: 32 vectors).
    #[serde(default)]
    pub history: HistoryLimit,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            dimension: 100,
            complexity: 0.5,
            openness: 0.7,
            energy: 1.0,
            history: HistoryLimit::default(),
        }
    }
}

impl StateConfig {
    pub fn new(complexity: f64, openness: f64) -> Self {
        Self {
            complexity,
            openness,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(MirrorError::invalid_config(
                "dimension",
                "0",
                "state vectors need at least one component",
            ));
        }
        ensure_range("complexity", self.complexity, 0.0, 1.0)?;
        ensure_range("openness", self.openness, 0.0, 1.0)?;
        ensure_range("energy", self.energy, ENERGY_FLOOR, 1.0)?;
        self.history.validate()
    }
}

/// Trust strategy and its starting value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustConfig {
    /// Which trust dynamics to run (default: disabled).
    pub model: TrustModel,
    /// Starting trust, clamped into the model's bounds (default: 0.5).
    pub initial_trust: f64,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            model: TrustModel::Disabled,
            initial_trust: 0.5,
        }
    }
}

impl TrustConfig {
    pub fn new(model: TrustModel, initial_trust: f64) -> Self {
        Self {
            model,
            initial_trust,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_range("initial_trust", self.initial_trust, 0.0, 1.0)?;
        if let TrustModel::MemoryWeighted { capacity } = self.model {
            if capacity < crate::trust::MEMORY_WINDOW {
                return Err(MirrorError::invalid_config(
                    "trust.capacity",
                    capacity.to_string(),
                    format!("must hold at least {} records", crate::trust::MEMORY_WINDOW),
                ));
            }
        }
        Ok(())
    }
}

/// Behavioral parameters of a mirroring agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Score below which the agent disengages after the grace period (default: 0.3).
    pub continuation_threshold: f64,
    /// Scale of each understanding increment (default: 0.1).
    pub learning_rate: f64,
    /// Fraction of the gap to the partner closed per step at full strength (default: 0.02).
    pub convergence_rate: f64,
    /// Mirror noise standard deviation at zero understanding (default: 0.1).
    pub noise_level: f64,
    #[serde(default)]
    pub trust: TrustConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            continuation_threshold: 0.3,
            learning_rate: 0.1,
            convergence_rate: 0.02,
            noise_level: 0.1,
            trust: TrustConfig::default(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_range("continuation_threshold", self.continuation_threshold, 0.0, 1.0)?;
        ensure_range("learning_rate", self.learning_rate, 0.0, 1.0)?;
        ensure_range("convergence_rate", self.convergence_rate, 0.0, 1.0)?;
        ensure_range("noise_level", self.noise_level, 0.0, f64::MAX)?;
        self.trust.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn defaults_are_valid() {
        assert!(StateConfig::default().validate().is_ok());
        assert!(AgentConfig::default().validate().is_ok());
        assert!(TrustConfig::default().validate().is_ok());
    }

    #[test]
    fn small_trust_memory_is_rejected() {
        let config = TrustConfig::new(TrustModel::MemoryWeighted { capacity: 2 }, 0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn short_history_is_rejected() {
        let config = StateConfig {
            history: HistoryLimit::Bounded(2),
            ..StateConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MirrorError::Config(ConfigError::InvalidValue { ref field, .. })) if field == "history"
        ));
        let config = StateConfig {
            history: HistoryLimit::Bounded(5),
            ..StateConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_noise_is_rejected() {
        let config = AgentConfig {
            noise_level: -0.1,
            ..AgentConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = AgentConfig {
            trust: TrustConfig::new(TrustModel::MemoryWeighted { capacity: 10 }, 0.7),
            ..AgentConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"kind\":\"MemoryWeighted\""), "{}", json);
        let back: AgentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.trust.model, TrustModel::MemoryWeighted { capacity: 10 });
    }
}
