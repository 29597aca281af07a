//! Mirror System: step orchestration for a pair of agents.
//!
//! The system borrows both agents mutably for the length of a run, owns
//! the run's RNG stream and time counter, and appends one row of metrics
//! to its [`Trajectory`] per step. Agents are only touched through their
//! own operations.

use crate::config::SystemConfig;
use crate::error::Result;
use crate::trajectory::{Metric, StepMetrics, Trajectory};
use mirror_analysis::changepoint::detect_changepoints;
use mirror_analysis::information::{combine_pairs, integrated_information, transfer_entropy_proxy};
use mirror_analysis::order::order_parameter;
use mirror_core::agent::{Decision, MirrorAgent};
use mirror_core::error::MirrorError;
use mirror_core::state::MIN_HISTORY;
use mirror_core::trust::{Interaction, Trust};
use mirror_core::types::Tick;
use mirror_core::vector;
use rand::rngs::StdRng;
use serde::Serialize;

/// History vectors compared by the transfer-entropy proxy.
pub const TRANSFER_WINDOW: usize = MIN_HISTORY;
/// History vector pairs combined for the integrated-information proxy.
pub const INTEGRATION_WINDOW: usize = 3;
/// Minimum samples before phase-transition analysis runs.
pub const MIN_TRANSITION_SAMPLES: usize = 20;

const RESONANCE_SHARED_SPACE: f64 = 0.7;
const RESONANCE_UNDERSTANDING: f64 = 0.8;
const RESONANCE_LOG_INTERVAL: Tick = 50;
const PROGRESS_LOG_INTERVAL: Tick = 100;

/// Outcome of one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub metrics: StepMetrics,
    pub decision_a: Decision,
    pub decision_b: Decision,
    /// Both agents chose to continue.
    pub continues: bool,
}

impl StepReport {
    /// Strong mutual understanding inside a large shared space.
    pub fn is_resonant(&self) -> bool {
        self.metrics.shared_space > RESONANCE_SHARED_SPACE
            && self.metrics.understanding_a_b > RESONANCE_UNDERSTANDING
            && self.metrics.understanding_b_a > RESONANCE_UNDERSTANDING
    }
}

/// Outcome of [`MirrorSystem::simulate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    /// Steps actually run.
    pub steps: u64,
    /// Time at which an agent disengaged, if one did.
    pub disengaged_at: Option<Tick>,
    /// Times at which the pair was resonant.
    pub resonance_ticks: Vec<Tick>,
}

/// A pair of agents mirroring each other.
pub struct MirrorSystem<'a> {
    pub(crate) a: &'a mut MirrorAgent,
    pub(crate) b: &'a mut MirrorAgent,
    config: SystemConfig,
    pub(crate) rng: StdRng,
    time: Tick,
    trajectory: Trajectory,
}

impl<'a> MirrorSystem<'a> {
    /// Couple two agents. Their states must have the same dimension.
    pub fn new(
        a: &'a mut MirrorAgent,
        b: &'a mut MirrorAgent,
        config: SystemConfig,
        rng: StdRng,
    ) -> Result<Self> {
        config.validate()?;
        a.validate()?;
        b.validate()?;
        a.state().history_limit().validate()?;
        b.state().history_limit().validate()?;
        if a.state().dimension() != b.state().dimension() {
            return Err(MirrorError::DimensionMismatch {
                expected: a.state().dimension(),
                got: b.state().dimension(),
            }
            .into());
        }
        let with_trust = a.trust().is_enabled() || b.trust().is_enabled();
        Ok(Self {
            a,
            b,
            config,
            rng,
            time: 0,
            trajectory: Trajectory::new(with_trust),
        })
    }

    pub fn time(&self) -> Tick {
        self.time
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn agent_a(&self) -> &MirrorAgent {
        &*self.a
    }

    pub fn agent_b(&self) -> &MirrorAgent {
        &*self.b
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn into_trajectory(self) -> Trajectory {
        self.trajectory
    }

    /// |a · b| of the current unit vectors.
    pub fn state_alignment(&self) -> f64 {
        vector::dot(self.a.state().vector(), self.b.state().vector()).abs()
    }

    /// Alignment times the weaker understanding, scaled by trust, in [0, 1].
    pub fn shared_space(&self) -> f64 {
        let min_understanding = self.a.understanding().min(self.b.understanding());
        let trust = Trust::shared_space_factor(self.a.trust(), self.b.trust());
        let shared = self.state_alignment() * min_understanding * trust;
        if shared.is_finite() {
            shared.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Advance the pair by one simultaneous step.
    pub fn step(&mut self) -> Result<StepReport> {
        let time = self.time;
        let shared_before = self.shared_space();

        // 1. Both mirrors use pre-step states.
        let mirror_a = self.a.mirror(self.b.state(), self.a.understanding(), &mut self.rng);
        let mirror_b = self.b.mirror(self.a.state(), self.b.understanding(), &mut self.rng);

        // 2. Quality against the partner's true vector.
        let quality_a = vector::correlation_or_zero(&mirror_a, self.b.state().vector()).abs();
        let quality_b = vector::correlation_or_zero(&mirror_b, self.a.state().vector()).abs();

        // 3. Trust sees pre-update shared space and phase.
        let joint_quality = (quality_a + quality_b) / 2.0;
        let outcome_a = self.a.update_trust(&Interaction {
            quality: quality_a,
            joint_quality,
            shared_space: shared_before,
            time,
            phase: self.a.phase(),
        });
        let outcome_b = self.b.update_trust(&Interaction {
            quality: quality_b,
            joint_quality,
            shared_space: shared_before,
            time,
            phase: self.b.phase(),
        });

        // 4. Understanding.
        let complexity_b = self.b.state().complexity();
        let complexity_a = self.a.state().complexity();
        self.a.update_understanding(quality_a, complexity_b);
        self.b.update_understanding(quality_b, complexity_a);

        // 5. A converges first; B then moves toward A's updated vector.
        self.a.converge_toward(self.b.state())?;
        self.b.converge_toward(self.a.state())?;

        // 6. Energy.
        self.a.deplete_energy(self.config.energy_depletion_rate);
        self.b.deplete_energy(self.config.energy_depletion_rate);

        // 7. Metrics.
        let metrics = self.measure(time, quality_a, quality_b, &mirror_a, &mirror_b);
        self.trajectory.push(&metrics);

        // 8. Time.
        self.time += 1;

        // 9. Choice point.
        let decision_a = self.a.decide(self.time, self.config.grace_period);
        let decision_b = self.b.decide(self.time, self.config.grace_period);
        let continues = decision_a.continues() && decision_b.continues();

        tracing::trace!(
            time,
            quality_a,
            quality_b,
            ?outcome_a,
            ?outcome_b,
            understanding_a = metrics.understanding_a_b,
            understanding_b = metrics.understanding_b_a,
            shared_space = metrics.shared_space,
            "step"
        );

        let report = StepReport {
            metrics,
            decision_a,
            decision_b,
            continues,
        };
        if !continues {
            tracing::info!(
                time = self.time,
                agent_a = %self.a.name(),
                ?decision_a,
                agent_b = %self.b.name(),
                ?decision_b,
                "interaction ended"
            );
        }
        if report.is_resonant() && self.time % RESONANCE_LOG_INTERVAL == 0 {
            tracing::info!(
                time = self.time,
                shared_space = report.metrics.shared_space,
                "resonance"
            );
        }
        Ok(report)
    }

    fn measure(
        &self,
        time: Tick,
        quality_a: f64,
        quality_b: f64,
        mirror_a: &[f64],
        mirror_b: &[f64],
    ) -> StepMetrics {
        let (sa, sb) = (self.a.state(), self.b.state());

        let (te_ab, te_ba, phi) = if sa.history_len() > 3 && sb.history_len() > 3 {
            let ha = sa.recent_history(TRANSFER_WINDOW);
            let hb = sb.recent_history(TRANSFER_WINDOW);
            let combined = combine_pairs(
                &sa.recent_history(INTEGRATION_WINDOW),
                &sb.recent_history(INTEGRATION_WINDOW),
            );
            (
                transfer_entropy_proxy(&ha, &hb),
                transfer_entropy_proxy(&hb, &ha),
                integrated_information(&combined),
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        StepMetrics {
            time: time as f64,
            understanding_a_b: self.a.understanding(),
            understanding_b_a: self.b.understanding(),
            phase_a: f64::from(self.a.phase().index()),
            phase_b: f64::from(self.b.phase().index()),
            quality_a,
            quality_b,
            state_alignment: self.state_alignment(),
            shared_space: self.shared_space(),
            energy_a: sa.energy(),
            energy_b: sb.energy(),
            transfer_entropy_a_b: te_ab,
            transfer_entropy_b_a: te_ba,
            integrated_information: phi,
            order_parameter: order_parameter(sa.vector(), sb.vector()),
            mirror_coupling: vector::correlation_or_zero(mirror_a, mirror_b).abs(),
            trust_a: self.recorded_trust(&*self.a),
            trust_b: self.recorded_trust(&*self.b),
        }
    }

    /// Trust as recorded for `agent`: none when the pair runs without trust,
    /// otherwise its level, which reads as full trust for a disabled side.
    fn recorded_trust(&self, agent: &MirrorAgent) -> Option<f64> {
        self.trajectory.has_trust().then(|| agent.trust().level())
    }

    /// Step until an agent disengages or `max_steps` have run.
    pub fn simulate(&mut self, max_steps: u64) -> Result<SimulationOutcome> {
        let mut outcome = SimulationOutcome {
            steps: 0,
            disengaged_at: None,
            resonance_ticks: Vec::new(),
        };
        for _ in 0..max_steps {
            let report = self.step()?;
            outcome.steps += 1;
            if report.is_resonant() {
                outcome.resonance_ticks.push(self.time);
            }
            if self.time % PROGRESS_LOG_INTERVAL == 0 {
                tracing::debug!(
                    time = self.time,
                    understanding_a = report.metrics.understanding_a_b,
                    understanding_b = report.metrics.understanding_b_a,
                    trust_a = ?report.metrics.trust_a,
                    trust_b = ?report.metrics.trust_b,
                    shared_space = report.metrics.shared_space,
                    "progress"
                );
            }
            if !report.continues {
                outcome.disengaged_at = Some(self.time);
                break;
            }
        }
        Ok(outcome)
    }

    /// Step exactly `steps` times, ignoring disengagement.
    pub fn run(&mut self, steps: u64) -> Result<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Changepoints in the order-parameter series.
    ///
    /// Empty until more than [`MIN_TRANSITION_SAMPLES`] steps are recorded.
    pub fn phase_transitions(&self, penalty: f64) -> Vec<usize> {
        if self.trajectory.len() <= MIN_TRANSITION_SAMPLES {
            return Vec::new();
        }
        detect_changepoints(self.trajectory.get(Metric::OrderParameter), penalty)
    }
}
