//! Mirroring Demo: reciprocal mirroring experiments.
//!
//! Runs the reference pairing with and without trust, compares the
//! simultaneous and sequential update regimes, and sweeps complexity and
//! energy depletion. Set `RUST_LOG=debug` for per-run progress.

use anyhow::Result;
use mirror_core::trust::TrustModel;
use mirror_runtime::prelude::*;
use tracing_subscriber::EnvFilter;

const SEED: u64 = 4577;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!(seed = SEED, "starting mirroring experiments");

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║  RECIPROCAL MIRRORING: Two Agents, One Shared Space  ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    reference_run()?;
    trust_run()?;
    regime_comparison()?;
    sweeps()?;

    Ok(())
}

fn section(title: &str) {
    println!("── {} {}", title, "─".repeat(50usize.saturating_sub(title.len())));
    println!();
}

fn reference_run() -> Result<()> {
    section("Reference Run");
    let scenario = PairScenario::reference();
    let (mut a, mut b, rng) = scenario.build(SEED)?;
    let mut system = MirrorSystem::new(&mut a, &mut b, scenario.system.clone(), rng)?;
    let outcome = system.simulate(200)?;

    let traj = system.trajectory();
    println!("  Steps run:           {}", outcome.steps);
    match outcome.disengaged_at {
        Some(t) => println!("  Disengaged at:       t={}", t),
        None => println!("  Disengaged at:       never"),
    }
    println!("  Resonant steps:      {}", outcome.resonance_ticks.len());
    println!(
        "  Final understanding: A→B {:.3}, B→A {:.3}",
        system.agent_a().understanding(),
        system.agent_b().understanding()
    );
    println!("  Final phases:        {} / {}", system.agent_a().phase().label(), system.agent_b().phase().label());
    println!("  Final shared space:  {:.3}", traj.tail_mean(Metric::SharedSpace, 1));
    println!("  Mean Φ (last 20):    {:.5}", traj.tail_mean(Metric::IntegratedInformation, 20));
    println!("  Phase transitions:   {:?}", system.phase_transitions(0.1));
    println!();
    Ok(())
}

fn trust_run() -> Result<()> {
    section("Memory-Weighted Trust (0.7 vs 0.3)");
    let scenario = PairScenario::reference().with_trusts(TrustModel::memory_weighted(), 0.7, 0.3);
    let (mut a, mut b, rng) = scenario.build(SEED)?;
    let mut system = MirrorSystem::new(&mut a, &mut b, scenario.system.clone(), rng)?;
    let outcome = system.simulate(200)?;

    let traj = system.trajectory();
    println!("  {:>6}  {:>8}  {:>8}  {:>8}", "t", "trust_a", "trust_b", "shared");
    for t in (0..traj.len()).step_by(25) {
        println!(
            "  {:>6}  {:>8.3}  {:>8.3}  {:>8.3}",
            t,
            traj.get(Metric::TrustA)[t],
            traj.get(Metric::TrustB)[t],
            traj.get(Metric::SharedSpace)[t],
        );
    }
    println!();
    for agent in [system.agent_a(), system.agent_b()] {
        println!(
            "  {}: {} successes, {} betrayals",
            agent.name(),
            agent.trust().successes(),
            agent.trust().betrayals()
        );
    }
    println!("  Steps run: {}", outcome.steps);
    println!();
    Ok(())
}

fn regime_comparison() -> Result<()> {
    section("Simultaneous vs Sequential (30 runs x 150 steps)");
    let cmp = compare_regimes(&PairScenario::reference(), 30, 150, SEED)?;

    for (label, fit, rate, accel) in [
        ("Sequential", cmp.sequential_fit, cmp.sequential_mean_rate, cmp.sequential_acceleration),
        ("Simultaneous", cmp.simultaneous_fit, cmp.simultaneous_mean_rate, cmp.simultaneous_acceleration),
    ] {
        println!("  {}:", label);
        println!("    Linear R²:    {:.3}", fit.linear_r2);
        println!("    Quadratic R²: {:.3}", fit.quadratic_r2);
        println!("    Improvement:  {:.3}", fit.quadratic_improvement());
        println!("    Mean rate:    {:.4}", rate);
        println!("    Mean |accel|: {:.6}", accel);
    }
    println!();
    println!(
        "  Growth rates differ? t = {:.3}, p = {:.4}",
        cmp.growth_rate_test.statistic, cmp.growth_rate_test.p_value
    );
    if let Some(ratio) = cmp.acceleration_ratio() {
        println!("  Acceleration ratio (sim/seq): {:.2}x", ratio);
    }
    println!(
        "  Scaling report: linear R² {:.3}, quadratic R² {:.3}, significant: {}",
        cmp.scaling.linear_r2, cmp.scaling.quadratic_r2, cmp.scaling.significant
    );
    println!();
    Ok(())
}

fn sweeps() -> Result<()> {
    let scenario = PairScenario::reference();

    section("Recursive Influence");
    let influence = recursive_influence(&scenario, 100, SEED)?;
    println!("  Early mirror coupling (first 20): {:.3}", influence.early);
    println!("  Late mirror coupling (last 20):   {:.3}", influence.late);
    if let Some(ratio) = influence.ratio() {
        println!("  Ratio: {:.2}x", ratio);
    }
    println!();

    section("Complexity Ceiling");
    let complexity = complexity_sweep(&scenario, &[0.3, 0.5, 0.7, 0.9], 20, 100, SEED)?;
    for (level, plateau) in complexity.levels.iter().zip(&complexity.plateaus) {
        println!("  Complexity {:.1}: plateau at {:.3}", level, plateau);
    }
    println!("  Correlation: {:.3}", complexity.correlation);
    println!();

    section("Energy Depletion");
    let depletion = depletion_sweep(&scenario, &[0.0, 0.001, 0.002, 0.004, 0.008], 150, SEED)?;
    for ((rate, burst), time) in depletion
        .rates
        .iter()
        .zip(&depletion.bursts)
        .zip(&depletion.plateau_times)
    {
        println!("  Depletion {:.3}: burst {:.3}, plateau at t={}", rate, burst, time);
    }
    println!("  Correlation depletion-burst:   {:.3}", depletion.burst_correlation);
    println!("  Correlation depletion-plateau: {:.3}", depletion.plateau_correlation);
    println!();
    Ok(())
}
