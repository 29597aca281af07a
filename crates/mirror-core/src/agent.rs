//! Mirror Agent: one side of a reciprocal mirroring pair.
//!
//! An agent owns exactly one [`State`] and models its partner through a
//! monotone `understanding` scalar. Its contract is the five operations a
//! pairwise system drives each step: [`mirror`](MirrorAgent::mirror),
//! [`update_understanding`](MirrorAgent::update_understanding),
//! [`converge_toward`](MirrorAgent::converge_toward),
//! [`update_trust`](MirrorAgent::update_trust) and
//! [`decide`](MirrorAgent::decide). The state itself is only reachable
//! read-only from outside.

use crate::config::AgentConfig;
use crate::error::{ensure_range, MirrorError, Result};
use crate::state::State;
use crate::trust::{Interaction, Trust, TrustModel, TrustOutcome};
use crate::types::{AgentId, Phase, Tick};
use crate::vector;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::Serialize;

/// Energy below which a deep-phase agent disengages.
pub const EXHAUSTION_ENERGY: f64 = 0.2;
/// Trust above which an agent keeps going regardless of its score.
pub const COMMITTED_TRUST: f64 = 0.8;
/// Betrayal count beyond which low trust ends the interaction.
pub const BETRAYAL_LIMIT: u32 = 5;
/// Trust below which accumulated betrayals end the interaction.
pub const BETRAYED_TRUST: f64 = 0.3;

/// Why an agent chose to continue or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decision {
    /// Still inside the grace period.
    Grace,
    /// Score cleared the threshold.
    Engaged,
    /// High trust overrode the score.
    Committed,
    /// Score fell below the threshold.
    Disengaged,
    /// Deep phase with depleted energy.
    Exhausted,
    /// Too many betrayals at low trust.
    Betrayed,
}

impl Decision {
    pub fn continues(self) -> bool {
        matches!(self, Decision::Grace | Decision::Engaged | Decision::Committed)
    }
}

/// A mirroring agent.
#[derive(Debug, Clone)]
pub struct MirrorAgent {
    id: AgentId,
    name: String,
    state: State,
    /// Understanding of the partner, in [0, 1]. Never decreases.
    understanding: f64,
    phase: Phase,
    trust: Trust,

    // Configuration
    continuation_threshold: f64,
    learning_rate: f64,
    convergence_rate: f64,
    noise_level: f64,
}

impl MirrorAgent {
    /// Create an agent with default parameters and no trust.
    pub fn new(name: impl Into<String>, state: State) -> Self {
        let defaults = AgentConfig::default();
        Self {
            id: AgentId::new(),
            name: name.into(),
            state,
            understanding: 0.0,
            phase: Phase::Initial,
            trust: Trust::disabled(),
            continuation_threshold: defaults.continuation_threshold,
            learning_rate: defaults.learning_rate,
            convergence_rate: defaults.convergence_rate,
            noise_level: defaults.noise_level,
        }
    }

    /// Create an agent from validated configuration.
    pub fn from_config(name: impl Into<String>, state: State, config: &AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(name, state)
            .with_threshold(config.continuation_threshold)
            .with_learning_rate(config.learning_rate)
            .with_convergence_rate(config.convergence_rate)
            .with_noise_level(config.noise_level)
            .with_trust(config.trust.model, config.trust.initial_trust))
    }

    /// Use a deterministic ID (for seeded runs and tests).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.id = AgentId::from_seed(seed);
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.continuation_threshold = threshold;
        self
    }

    pub fn with_learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    pub fn with_convergence_rate(mut self, rate: f64) -> Self {
        self.convergence_rate = rate;
        self
    }

    pub fn with_noise_level(mut self, noise: f64) -> Self {
        self.noise_level = noise;
        self
    }

    pub fn with_trust(mut self, model: TrustModel, initial: f64) -> Self {
        self.trust = Trust::new(model, initial);
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn understanding(&self) -> f64 {
        self.understanding
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn trust(&self) -> &Trust {
        &self.trust
    }

    pub fn threshold(&self) -> f64 {
        self.continuation_threshold
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn convergence_rate(&self) -> f64 {
        self.convergence_rate
    }

    pub fn noise_level(&self) -> f64 {
        self.noise_level
    }

    /// Openness as modulated by trust. The stored openness is unchanged.
    pub fn effective_openness(&self) -> f64 {
        self.state.openness() * self.trust.openness_factor()
    }

    /// Mirror quality scale for a given understanding, before noise.
    pub fn mirror_quality(&self, understanding: f64) -> f64 {
        (understanding + 0.1).min(1.0) * self.trust.mirror_fidelity()
    }

    // --- Operations ---

    /// Produce a noisy, quality-scaled copy of `other`'s vector.
    ///
    /// Always draws exactly `other.dimension()` normals from `rng`, so the
    /// stream stays aligned even when the noise level is zero.
    pub fn mirror<R: Rng + ?Sized>(&self, other: &State, understanding: f64, rng: &mut R) -> Vec<f64> {
        let understanding = understanding.clamp(0.0, 1.0);
        let quality = self.mirror_quality(understanding);
        let sigma = self.noise_level * (1.0 - understanding) * self.trust.noise_inflation();
        let gate = self.effective_openness() * self.state.energy();

        let mut mirrored: Vec<f64> = other
            .vector()
            .iter()
            .map(|x| {
                let noise: f64 = rng.sample::<f64, _>(StandardNormal) * sigma;
                (x * quality + noise) * gate
            })
            .collect();
        if vector::normalize_or_uniform(&mut mirrored) {
            tracing::warn!(agent = %self.name, "degenerate mirror, substituted uniform");
        }
        mirrored
    }

    /// Fold a mirror quality into understanding. Returns the applied delta.
    pub fn update_understanding(&mut self, quality: f64, other_complexity: f64) -> f64 {
        let quality = if quality.is_finite() { quality.clamp(0.0, 1.0) } else { 0.0 };
        let complexity_factor = 1.0 - (self.state.complexity() - other_complexity).abs();
        let delta = (self.learning_rate * quality * complexity_factor).max(0.0);
        let before = self.understanding;
        self.understanding = (self.understanding + delta).min(1.0);
        self.phase = Phase::from_understanding(self.understanding);
        self.understanding - before
    }

    /// Move this agent's vector part of the way toward `other`'s.
    pub fn converge_toward(&mut self, other: &State) -> Result<()> {
        if other.dimension() != self.state.dimension() {
            return Err(MirrorError::DimensionMismatch {
                expected: self.state.dimension(),
                got: other.dimension(),
            });
        }
        let strength = self.convergence_strength();
        let moved: Vec<f64> = self
            .state
            .vector()
            .iter()
            .zip(other.vector())
            .map(|(v, o)| v + strength * (o - v))
            .collect();
        self.state.update(moved)
    }

    /// Fraction of the gap to the partner closed by one convergence.
    pub fn convergence_strength(&self) -> f64 {
        self.convergence_rate
            * self.trust.convergence_factor()
            * self.understanding
            * self.effective_openness()
            * self.state.energy()
    }

    pub fn update_trust(&mut self, interaction: &Interaction) -> TrustOutcome {
        self.trust.update(interaction)
    }

    pub fn deplete_energy(&mut self, rate: f64) {
        self.state.deplete(rate);
    }

    /// Evaluate the continuation rule at `time`.
    pub fn decide(&self, time: Tick, grace_period: Tick) -> Decision {
        if time < grace_period {
            return Decision::Grace;
        }
        if self.phase.is_deep() && self.state.energy() < EXHAUSTION_ENERGY {
            return Decision::Exhausted;
        }
        let trust = self.trust.level();
        let model = self.trust.model();
        if matches!(model, TrustModel::MemoryWeighted { .. })
            && self.trust.betrayals() > BETRAYAL_LIMIT
            && trust < BETRAYED_TRUST
        {
            return Decision::Betrayed;
        }
        if model.is_enabled() && trust > COMMITTED_TRUST && self.understanding > 0.0 {
            return Decision::Committed;
        }

        let below = match model {
            TrustModel::Disabled => self.understanding < self.continuation_threshold,
            TrustModel::Drift => {
                0.7 * self.understanding + 0.3 * trust < self.continuation_threshold
            }
            TrustModel::MemoryWeighted { .. } => {
                self.understanding < self.continuation_threshold * (2.0 - trust)
            }
        };
        if below {
            Decision::Disengaged
        } else {
            Decision::Engaged
        }
    }

    /// Whether the agent continues at `time`.
    pub fn make_choice(&self, time: Tick, grace_period: Tick) -> bool {
        self.decide(time, grace_period).continues()
    }

    /// Check the agent's own parameters.
    pub fn validate(&self) -> Result<()> {
        ensure_range("continuation_threshold", self.continuation_threshold, 0.0, 1.0)?;
        ensure_range("learning_rate", self.learning_rate, 0.0, 1.0)?;
        ensure_range("convergence_rate", self.convergence_rate, 0.0, 1.0)?;
        ensure_range("noise_level", self.noise_level, 0.0, f64::MAX)
    }
}
