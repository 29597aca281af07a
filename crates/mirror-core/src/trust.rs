//! Trust: path-dependent confidence in the partner.
//!
//! Trust is one type driven by a tagged [`TrustModel`]. Two dynamics are
//! supported:
//!
//! - **Drift** is memoryless. Trust nudges toward the interaction quality
//!   and relaxes toward neutral (0.5), bounded to [0.2, 0.9].
//! - **MemoryWeighted** keeps a bounded FIFO of recent interactions. Good runs
//!   of interactions rebuild trust slowly (+0.05) while a bad run drops it
//!   fast (-0.1). Deep phases amplify either by 1.5x. Bounded to [0.1, 1.0].
//!
//! Trust is an active multiplier: it scales mirror fidelity, mirror noise,
//! effective openness and convergence speed (see the factor methods).

use crate::types::{Phase, Tick};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of most recent records averaged by the memory-weighted model.
pub const MEMORY_WINDOW: usize = 3;

/// Default FIFO capacity of the memory-weighted model.
pub const DEFAULT_MEMORY_CAPACITY: usize = 10;

const SUCCESS_QUALITY: f64 = 0.6;
const SUCCESS_SPACE: f64 = 0.4;
const BETRAYAL_QUALITY: f64 = 0.3;
const BETRAYAL_SPACE: f64 = 0.2;
const SUCCESS_DELTA: f64 = 0.05;
const BETRAYAL_DELTA: f64 = -0.1;
const NEUTRAL_DELTA: f64 = 0.01;
const DEEP_PHASE_AMPLIFICATION: f64 = 1.5;

/// Which trust dynamics an agent runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TrustModel {
    /// No trust; every trust factor is 1.
    #[default]
    Disabled,
    /// Memoryless drift toward neutral.
    Drift,
    /// Success/betrayal accounting over a bounded interaction memory.
    MemoryWeighted { capacity: usize },
}

impl TrustModel {
    pub fn memory_weighted() -> Self {
        TrustModel::MemoryWeighted {
            capacity: DEFAULT_MEMORY_CAPACITY,
        }
    }

    pub fn is_enabled(self) -> bool {
        !matches!(self, TrustModel::Disabled)
    }

    /// Inclusive `(min, max)` trust bounds.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            TrustModel::Disabled => (1.0, 1.0),
            TrustModel::Drift => (0.2, 0.9),
            TrustModel::MemoryWeighted { .. } => (0.1, 1.0),
        }
    }
}

/// What one agent experienced in one step, measured before any of this
/// step's understanding updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    /// This agent's own mirror quality.
    pub quality: f64,
    /// Mean mirror quality of both agents.
    pub joint_quality: f64,
    /// Shared space before this step.
    pub shared_space: f64,
    pub time: Tick,
    /// This agent's phase before this step.
    pub phase: Phase,
}

/// One remembered interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub quality: f64,
    pub shared_space: f64,
    pub time: Tick,
    pub phase: Phase,
}

/// How a trust update classified the recent interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrustOutcome {
    /// Trust is disabled.
    Untracked,
    /// Memoryless drift update.
    Drifted,
    /// Fewer than [`MEMORY_WINDOW`] records collected so far.
    Pending,
    Success,
    Betrayal,
    Neutral,
}

/// An agent's trust in its partner.
#[derive(Debug, Clone)]
pub struct Trust {
    model: TrustModel,
    value: f64,
    memory: VecDeque<InteractionRecord>,
    successes: u32,
    betrayals: u32,
}

impl Trust {
    /// Trust under `model`, starting at `initial` clamped into the model's bounds.
    pub fn new(model: TrustModel, initial: f64) -> Self {
        let (lo, hi) = model.bounds();
        let initial = if initial.is_finite() { initial } else { 0.5 };
        Self {
            model,
            value: initial.clamp(lo, hi),
            memory: VecDeque::new(),
            successes: 0,
            betrayals: 0,
        }
    }

    pub fn disabled() -> Self {
        Self::new(TrustModel::Disabled, 1.0)
    }

    pub fn model(&self) -> TrustModel {
        self.model
    }

    pub fn is_enabled(&self) -> bool {
        self.model.is_enabled()
    }

    /// Current trust, or `None` when trust is disabled.
    pub fn value(&self) -> Option<f64> {
        self.is_enabled().then_some(self.value)
    }

    /// Current trust, with disabled trust reading as full trust.
    pub fn level(&self) -> f64 {
        self.value
    }

    pub fn successes(&self) -> u32 {
        self.successes
    }

    pub fn betrayals(&self) -> u32 {
        self.betrayals
    }

    /// Remembered interactions, oldest first.
    pub fn memory(&self) -> impl ExactSizeIterator<Item = &InteractionRecord> + '_ {
        self.memory.iter()
    }

    /// Fold one interaction into trust.
    pub fn update(&mut self, interaction: &Interaction) -> TrustOutcome {
        match self.model {
            TrustModel::Disabled => TrustOutcome::Untracked,
            TrustModel::Drift => {
                let quality = interaction.joint_quality + interaction.shared_space;
                let nudged = self.value + (quality - 0.5) * 0.02;
                self.set_clamped(0.9 * nudged + 0.1 * 0.5);
                TrustOutcome::Drifted
            }
            TrustModel::MemoryWeighted { capacity } => {
                self.memory.push_back(InteractionRecord {
                    quality: interaction.quality,
                    shared_space: interaction.shared_space,
                    time: interaction.time,
                    phase: interaction.phase,
                });
                while self.memory.len() > capacity.max(MEMORY_WINDOW) {
                    self.memory.pop_front();
                }
                if self.memory.len() < MEMORY_WINDOW {
                    return TrustOutcome::Pending;
                }

                let recent = self.memory.iter().rev().take(MEMORY_WINDOW);
                let (q_sum, s_sum) = recent.fold((0.0, 0.0), |(q, s), r| {
                    (q + r.quality, s + r.shared_space)
                });
                let mean_quality = q_sum / MEMORY_WINDOW as f64;
                let mean_space = s_sum / MEMORY_WINDOW as f64;

                let (mut delta, outcome) =
                    if mean_quality > SUCCESS_QUALITY && mean_space > SUCCESS_SPACE {
                        self.successes += 1;
                        (SUCCESS_DELTA, TrustOutcome::Success)
                    } else if mean_quality < BETRAYAL_QUALITY || mean_space < BETRAYAL_SPACE {
                        self.betrayals += 1;
                        (BETRAYAL_DELTA, TrustOutcome::Betrayal)
                    } else {
                        (NEUTRAL_DELTA, TrustOutcome::Neutral)
                    };
                if interaction.phase.is_deep() {
                    delta *= DEEP_PHASE_AMPLIFICATION;
                }
                self.set_clamped(self.value + delta);
                outcome
            }
        }
    }

    /// Multiplier on mirror quality, in [0.7, 1.0].
    pub fn mirror_fidelity(&self) -> f64 {
        match self.model {
            TrustModel::Disabled => 1.0,
            _ => 0.7 + 0.3 * self.value,
        }
    }

    /// Multiplier on mirror noise; lower trust means a noisier mirror.
    pub fn noise_inflation(&self) -> f64 {
        match self.model {
            TrustModel::MemoryWeighted { .. } => 2.0 - self.value,
            _ => 1.0,
        }
    }

    /// Multiplier on openness.
    pub fn openness_factor(&self) -> f64 {
        match self.model {
            TrustModel::MemoryWeighted { .. } => 0.3 + 0.7 * self.value,
            _ => 1.0,
        }
    }

    /// Multiplier on convergence rate.
    pub fn convergence_factor(&self) -> f64 {
        match self.model {
            TrustModel::Disabled => 1.0,
            _ => 0.5 + 0.5 * self.value,
        }
    }

    /// Multiplier on shared space for a pair of agents.
    pub fn shared_space_factor(a: &Trust, b: &Trust) -> f64 {
        if !a.is_enabled() && !b.is_enabled() {
            return 1.0;
        }
        0.7 + 0.3 * (a.level() * b.level()).sqrt()
    }

    fn set_clamped(&mut self, value: f64) {
        let (lo, hi) = self.model.bounds();
        self.value = if value.is_finite() { value.clamp(lo, hi) } else { lo };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction(quality: f64, shared_space: f64, phase: Phase) -> Interaction {
        Interaction {
            quality,
            joint_quality: quality,
            shared_space,
            time: 0,
            phase,
        }
    }

    #[test]
    fn initial_trust_is_clamped_to_model_bounds() {
        assert_eq!(Trust::new(TrustModel::Drift, 0.05).level(), 0.2);
        assert_eq!(Trust::new(TrustModel::Drift, 0.95).level(), 0.9);
        assert_eq!(Trust::new(TrustModel::memory_weighted(), 0.0).level(), 0.1);
    }

    #[test]
    fn disabled_trust_is_neutral() {
        let mut t = Trust::disabled();
        assert_eq!(t.value(), None);
        assert_eq!(t.update(&interaction(0.0, 0.0, Phase::Initial)), TrustOutcome::Untracked);
        assert_eq!(t.mirror_fidelity(), 1.0);
        assert_eq!(t.noise_inflation(), 1.0);
        assert_eq!(t.openness_factor(), 1.0);
        assert_eq!(t.convergence_factor(), 1.0);
        assert_eq!(Trust::shared_space_factor(&t, &Trust::disabled()), 1.0);
    }

    #[test]
    fn drift_relaxes_toward_neutral() {
        let mut high = Trust::new(TrustModel::Drift, 0.9);
        let mut low = Trust::new(TrustModel::Drift, 0.2);
        for _ in 0..200 {
            // joint quality + shared space of exactly 0.5 adds no nudge
            high.update(&interaction(0.5, 0.0, Phase::Initial));
            low.update(&interaction(0.5, 0.0, Phase::Initial));
        }
        assert!((high.level() - 0.5).abs() < 1e-6);
        assert!((low.level() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn memory_waits_for_three_records() {
        let mut t = Trust::new(TrustModel::memory_weighted(), 0.5);
        assert_eq!(t.update(&interaction(0.9, 0.9, Phase::Initial)), TrustOutcome::Pending);
        assert_eq!(t.update(&interaction(0.9, 0.9, Phase::Initial)), TrustOutcome::Pending);
        assert_eq!(t.level(), 0.5);
        assert_eq!(t.update(&interaction(0.9, 0.9, Phase::Initial)), TrustOutcome::Success);
        assert!((t.level() - 0.55).abs() < 1e-12);
    }

    #[test]
    fn betrayal_drops_fast_and_success_rebuilds_slowly() {
        let mut t = Trust::new(TrustModel::memory_weighted(), 0.5);
        for _ in 0..3 {
            t.update(&interaction(0.1, 0.1, Phase::Initial));
        }
        assert!((t.level() - 0.4).abs() < 1e-12);
        assert_eq!(t.betrayals(), 1);
        for _ in 0..3 {
            t.update(&interaction(0.9, 0.9, Phase::Initial));
        }
        // neutral, success, success: one betrayal outweighs two successes
        assert_eq!(t.successes(), 2);
        assert_eq!(t.betrayals(), 1);
        assert!((t.level() - 0.51).abs() < 1e-12);
    }

    #[test]
    fn neutral_interactions_drift_upward() {
        let mut t = Trust::new(TrustModel::memory_weighted(), 0.5);
        for _ in 0..3 {
            t.update(&interaction(0.5, 0.3, Phase::Initial));
        }
        assert!((t.level() - 0.51).abs() < 1e-12);
    }

    #[test]
    fn deep_phase_amplifies_delta() {
        let mut shallow = Trust::new(TrustModel::memory_weighted(), 0.5);
        let mut deep = Trust::new(TrustModel::memory_weighted(), 0.5);
        for _ in 0..3 {
            shallow.update(&interaction(0.9, 0.9, Phase::DeepSimulation));
            deep.update(&interaction(0.9, 0.9, Phase::Complex));
        }
        assert!((shallow.level() - 0.55).abs() < 1e-12);
        assert!((deep.level() - 0.575).abs() < 1e-12);
    }

    #[test]
    fn memory_is_bounded_fifo() {
        let mut t = Trust::new(TrustModel::MemoryWeighted { capacity: 4 }, 0.5);
        for i in 0..10 {
            t.update(&Interaction {
                time: i,
                ..interaction(0.5, 0.5, Phase::Initial)
            });
        }
        let times: Vec<Tick> = t.memory().map(|r| r.time).collect();
        assert_eq!(times, vec![6, 7, 8, 9]);
    }

    #[test]
    fn memory_trust_stays_in_bounds() {
        let mut t = Trust::new(TrustModel::memory_weighted(), 0.5);
        for _ in 0..50 {
            t.update(&interaction(0.0, 0.0, Phase::Integration));
        }
        assert_eq!(t.level(), 0.1);
        for _ in 0..100 {
            t.update(&interaction(1.0, 1.0, Phase::Integration));
        }
        assert_eq!(t.level(), 1.0);
    }
}
