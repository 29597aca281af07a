//! Shared types used across the mirror crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Discrete simulation time.
pub type Tick = u64;

/// Unique identifier for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic ID derived from a seed, so seeded runs are reproducible.
    pub fn from_seed(seed: u64) -> Self {
        Self(Uuid::from_u128(seed as u128))
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discretized stage of understanding.
///
/// Thresholds are fixed at 0.25 / 0.5 / 0.75; phase is a pure function of
/// the agent's understanding of its partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// understanding < 0.25
    Initial = 1,
    /// 0.25 <= understanding < 0.5
    DeepSimulation = 2,
    /// 0.5 <= understanding < 0.75
    Complex = 3,
    /// understanding >= 0.75
    Integration = 4,
}

impl Phase {
    /// Bucket an understanding value into its phase.
    pub fn from_understanding(understanding: f64) -> Self {
        if understanding < 0.25 {
            Phase::Initial
        } else if understanding < 0.5 {
            Phase::DeepSimulation
        } else if understanding < 0.75 {
            Phase::Complex
        } else {
            Phase::Integration
        }
    }

    /// Numeric phase index in `1..=4`.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Phases 3 and 4 are "deep": trust deltas are amplified and low energy
    /// ends the interaction.
    pub fn is_deep(self) -> bool {
        self >= Phase::Complex
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Initial => "Initial",
            Phase::DeepSimulation => "Deep Sim",
            Phase::Complex => "Complex",
            Phase::Integration => "Integration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_buckets_match_thresholds() {
        assert_eq!(Phase::from_understanding(0.0), Phase::Initial);
        assert_eq!(Phase::from_understanding(0.2499), Phase::Initial);
        assert_eq!(Phase::from_understanding(0.25), Phase::DeepSimulation);
        assert_eq!(Phase::from_understanding(0.5), Phase::Complex);
        assert_eq!(Phase::from_understanding(0.7499), Phase::Complex);
        assert_eq!(Phase::from_understanding(0.75), Phase::Integration);
        assert_eq!(Phase::from_understanding(1.0), Phase::Integration);
    }

    #[test]
    fn phase_index_is_one_based() {
        assert_eq!(Phase::Initial.index(), 1);
        assert_eq!(Phase::Integration.index(), 4);
        assert!(Phase::Complex.is_deep());
        assert!(!Phase::DeepSimulation.is_deep());
    }

    #[test]
    fn seeded_ids_are_stable() {
        assert_eq!(AgentId::from_seed(7), AgentId::from_seed(7));
        assert_ne!(AgentId::from_seed(7), AgentId::from_seed(8));
    }
}
