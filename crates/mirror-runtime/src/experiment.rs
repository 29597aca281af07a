//! Experiment drivers: batches of seeded runs and parameter sweeps.
//!
//! Run `i` of a batch uses seed `base_seed + i`; a paired control run uses
//! `base_seed + i + PAIRED_SEED_OFFSET`. Seed arithmetic wraps at `u64::MAX`.
//! Runs are independent and share no state.

use crate::config::{PairScenario, PAIRED_SEED_OFFSET};
use crate::error::Result;
use crate::regime::{run_regime, UpdateRegime};
use crate::system::MirrorSystem;
use crate::trajectory::{Metric, Trajectory};
use mirror_analysis::ensemble::{summarize_runs, EnsembleSummary};
use mirror_analysis::fit::{fit_series, gradient};
use mirror_analysis::hypothesis::{student_t_test, TTest};
use mirror_analysis::scaling::{mean_abs_acceleration, test_scaling_hypothesis, ScalingReport};
use mirror_core::vector;
use serde::Serialize;

/// Samples averaged for a plateau height.
pub const PLATEAU_WINDOW: usize = 20;
/// Leading samples searched for the burst.
pub const BURST_WINDOW: usize = 30;
/// Gradient below which understanding counts as plateaued.
pub const PLATEAU_GRADIENT: f64 = 0.005;
/// Leading and trailing samples compared for recursive influence.
pub const INFLUENCE_WINDOW: usize = 20;

/// Run one seeded trajectory for exactly `steps` steps.
pub fn run_trajectory(scenario: &PairScenario, seed: u64, steps: u64) -> Result<Trajectory> {
    let (mut a, mut b, rng) = scenario.build(seed)?;
    let mut system = MirrorSystem::new(&mut a, &mut b, scenario.system.clone(), rng)?;
    system.run(steps)?;
    Ok(system.into_trajectory())
}

/// Linear and quadratic R² of one mean trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthFit {
    pub linear_r2: f64,
    pub quadratic_r2: f64,
}

impl GrowthFit {
    fn of(series: &[f64]) -> Result<Self> {
        Ok(Self {
            linear_r2: fit_series(series, 1)?.r_squared,
            quadratic_r2: fit_series(series, 2)?.r_squared,
        })
    }

    /// R² gained by adding the quadratic term.
    pub fn quadratic_improvement(&self) -> f64 {
        self.quadratic_r2 - self.linear_r2
    }
}

/// Simultaneous versus sequential update regimes over many runs.
#[derive(Debug, Clone, Serialize)]
pub struct RegimeComparison {
    pub simultaneous: EnsembleSummary,
    pub sequential: EnsembleSummary,
    pub simultaneous_fit: GrowthFit,
    pub sequential_fit: GrowthFit,
    /// Student t-test on the gradients of the two mean trajectories.
    pub growth_rate_test: TTest,
    pub simultaneous_mean_rate: f64,
    pub sequential_mean_rate: f64,
    pub simultaneous_acceleration: f64,
    pub sequential_acceleration: f64,
    /// Linear fit of sequential against quadratic fit of simultaneous.
    pub scaling: ScalingReport,
}

impl RegimeComparison {
    /// Simultaneous over sequential mean absolute acceleration.
    pub fn acceleration_ratio(&self) -> Option<f64> {
        (self.sequential_acceleration > 0.0)
            .then(|| self.simultaneous_acceleration / self.sequential_acceleration)
    }
}

/// Run `runs` trajectories of each regime and compare their growth.
pub fn compare_regimes(
    scenario: &PairScenario,
    runs: usize,
    steps: u64,
    base_seed: u64,
) -> Result<RegimeComparison> {
    let mut simultaneous_runs = Vec::with_capacity(runs);
    let mut sequential_runs = Vec::with_capacity(runs);
    for i in 0..runs as u64 {
        let seed = base_seed.wrapping_add(i);
        simultaneous_runs.push(run_regime(scenario, UpdateRegime::Simultaneous, seed, steps)?);
        sequential_runs.push(run_regime(
            scenario,
            UpdateRegime::Sequential,
            seed.wrapping_add(PAIRED_SEED_OFFSET),
            steps,
        )?);
        if i % 10 == 0 {
            tracing::debug!(run = i, runs, "regime comparison progress");
        }
    }

    let simultaneous = summarize_runs(&simultaneous_runs)?;
    let sequential = summarize_runs(&sequential_runs)?;
    let sim_rates = gradient(&simultaneous.mean);
    let seq_rates = gradient(&sequential.mean);

    Ok(RegimeComparison {
        simultaneous_fit: GrowthFit::of(&simultaneous.mean)?,
        sequential_fit: GrowthFit::of(&sequential.mean)?,
        growth_rate_test: student_t_test(&seq_rates, &sim_rates)?,
        simultaneous_mean_rate: vector::mean(&sim_rates),
        sequential_mean_rate: vector::mean(&seq_rates),
        simultaneous_acceleration: mean_abs_acceleration(&simultaneous.mean),
        sequential_acceleration: mean_abs_acceleration(&sequential.mean),
        scaling: test_scaling_hypothesis(&sequential.mean, &simultaneous.mean)?,
        simultaneous,
        sequential,
    })
}

/// Plateau height of understanding per complexity level.
#[derive(Debug, Clone, Serialize)]
pub struct ComplexitySweep {
    pub levels: Vec<f64>,
    /// Mean over runs of the last [`PLATEAU_WINDOW`] `understanding_a_b` samples.
    pub plateaus: Vec<f64>,
    /// Correlation between level and plateau (0 if undefined).
    pub correlation: f64,
}

/// Give both agents each complexity level in turn and measure the plateau.
pub fn complexity_sweep(
    scenario: &PairScenario,
    levels: &[f64],
    runs: usize,
    steps: u64,
    base_seed: u64,
) -> Result<ComplexitySweep> {
    let mut plateaus = Vec::with_capacity(levels.len());
    for &level in levels {
        let swept = scenario.clone().with_complexity(level);
        let mut heights = Vec::with_capacity(runs);
        for i in 0..runs as u64 {
            let trajectory = run_trajectory(&swept, base_seed.wrapping_add(i), steps)?;
            heights.push(trajectory.tail_mean(Metric::UnderstandingAB, PLATEAU_WINDOW));
        }
        let plateau = vector::mean(&heights);
        tracing::debug!(complexity = level, plateau, "complexity level done");
        plateaus.push(plateau);
    }
    Ok(ComplexitySweep {
        correlation: vector::correlation_or_zero(levels, &plateaus),
        levels: levels.to_vec(),
        plateaus,
    })
}

/// Burst and plateau timing of understanding per energy depletion rate.
#[derive(Debug, Clone, Serialize)]
pub struct DepletionSweep {
    pub rates: Vec<f64>,
    /// Largest gradient of `understanding_a_b` in the first [`BURST_WINDOW`] samples.
    pub bursts: Vec<f64>,
    /// First step whose gradient drops below [`PLATEAU_GRADIENT`], or the step budget.
    pub plateau_times: Vec<u64>,
    pub burst_correlation: f64,
    pub plateau_correlation: f64,
}

/// Run one seeded trajectory per depletion rate.
pub fn depletion_sweep(
    scenario: &PairScenario,
    rates: &[f64],
    steps: u64,
    seed: u64,
) -> Result<DepletionSweep> {
    let mut bursts = Vec::with_capacity(rates.len());
    let mut plateau_times = Vec::with_capacity(rates.len());
    for &rate in rates {
        let swept = scenario
            .clone()
            .with_system(scenario.system.clone().with_depletion_rate(rate));
        let trajectory = run_trajectory(&swept, seed, steps)?;
        let understanding = trajectory.get(Metric::UnderstandingAB);

        let head = &understanding[..BURST_WINDOW.min(understanding.len())];
        let burst = gradient(head).into_iter().fold(0.0_f64, f64::max);
        let plateau_time = gradient(understanding)
            .iter()
            .position(|&g| g < PLATEAU_GRADIENT)
            .map_or(steps, |i| i as u64);

        tracing::debug!(rate, burst, plateau_time, "depletion rate done");
        bursts.push(burst);
        plateau_times.push(plateau_time);
    }
    let times: Vec<f64> = plateau_times.iter().map(|&t| t as f64).collect();
    Ok(DepletionSweep {
        burst_correlation: vector::correlation_or_zero(rates, &bursts),
        plateau_correlation: vector::correlation_or_zero(rates, &times),
        rates: rates.to_vec(),
        bursts,
        plateau_times,
    })
}

/// Coupling between the two agents' mirrors early and late in a run.
#[derive(Debug, Clone, Serialize)]
pub struct RecursiveInfluence {
    /// `|corr(mirror_a, mirror_b)|` per step.
    pub coupling: Vec<f64>,
    pub early: f64,
    pub late: f64,
    pub understanding: Vec<f64>,
}

impl RecursiveInfluence {
    pub fn ratio(&self) -> Option<f64> {
        (self.late > 0.0).then(|| self.early / self.late)
    }
}

pub fn recursive_influence(scenario: &PairScenario, steps: u64, seed: u64) -> Result<RecursiveInfluence> {
    let trajectory = run_trajectory(scenario, seed, steps)?;
    Ok(RecursiveInfluence {
        early: trajectory.head_mean(Metric::MirrorCoupling, INFLUENCE_WINDOW),
        late: trajectory.tail_mean(Metric::MirrorCoupling, INFLUENCE_WINDOW),
        coupling: trajectory.get(Metric::MirrorCoupling).to_vec(),
        understanding: trajectory.mean_understanding(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_comparison_shapes() {
        let cmp = compare_regimes(&PairScenario::reference(), 3, 40, 4577).unwrap();
        assert_eq!(cmp.simultaneous.runs, 3);
        assert_eq!(cmp.sequential.len(), 40);
        // sequential turns update one agent at a time
        assert!(cmp.simultaneous.mean[9] > cmp.sequential.mean[9]);
        assert!(cmp.simultaneous_fit.quadratic_r2 >= cmp.simultaneous_fit.linear_r2 - 1e-9);
    }

    #[test]
    fn seeds_wrap_near_u64_max() {
        let scenario = PairScenario::reference();
        let cmp = compare_regimes(&scenario, 2, 10, u64::MAX - 500).unwrap();
        assert_eq!(cmp.sequential.runs, 2);

        let sweep = complexity_sweep(&scenario, &[0.5], 2, 10, u64::MAX).unwrap();
        assert_eq!(sweep.plateaus.len(), 1);

        // the paired control of run 1 wraps around to seed 500
        let wrapped = run_regime(&scenario, UpdateRegime::Sequential, 500, 10).unwrap();
        let direct = run_regime(
            &scenario,
            UpdateRegime::Sequential,
            (u64::MAX - 500).wrapping_add(1).wrapping_add(PAIRED_SEED_OFFSET),
            10,
        )
        .unwrap();
        assert_eq!(wrapped, direct);
    }

    #[test]
    fn depletion_sweep_reports_every_rate() {
        let rates = [0.0, 0.004, 0.008];
        let sweep = depletion_sweep(&PairScenario::reference(), &rates, 60, 4577).unwrap();
        assert_eq!(sweep.bursts.len(), 3);
        assert_eq!(sweep.plateau_times.len(), 3);
        assert!(sweep.plateau_times.iter().all(|&t| t <= 60));
        assert!(sweep.bursts.iter().all(|&b| b > 0.0));
    }

    #[test]
    fn recursive_influence_windows() {
        let influence = recursive_influence(&PairScenario::reference(), 50, 4577).unwrap();
        assert_eq!(influence.coupling.len(), 50);
        assert!((0.0..=1.0).contains(&influence.early));
        assert!((0.0..=1.0).contains(&influence.late));
    }
}
