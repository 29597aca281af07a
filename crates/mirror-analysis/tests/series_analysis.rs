//! End-to-end analysis of synthetic trajectories.

use mirror_analysis::prelude::*;

fn saturating(n: usize, rate: f64) -> Vec<f64> {
    (0..n).map(|t| 1.0 - (-rate * t as f64).exp()).collect()
}

#[test]
fn burst_then_plateau_prefers_quadratic_over_linear() {
    let y = saturating(150, 0.05);
    let linear = fit_series(&y, 1).unwrap();
    let quadratic = fit_series(&y, 2).unwrap();
    assert!(quadratic.r_squared > linear.r_squared);
    assert!(quadratic.r_squared <= 1.0);
}

#[test]
fn faster_saturation_has_larger_early_burst() {
    let slow = gradient(&saturating(30, 0.02));
    let fast = gradient(&saturating(30, 0.2));
    let max = |g: &[f64]| g.iter().cloned().fold(f64::MIN, f64::max);
    assert!(max(&fast) > max(&slow));
}

#[test]
fn regime_switch_in_order_parameter_is_detected() {
    // Order parameter jumps from ~0.5 to ~0.9 at step 40.
    let series: Vec<f64> = (0..80)
        .map(|t| (if t < 40 { 0.5 } else { 0.9 }) + 0.001 * ((t * 7) % 5) as f64)
        .collect();
    let cps = detect_changepoints(&series, 0.5);
    assert!(!cps.is_empty());
    assert!((30..=40).contains(&cps[0]), "{:?}", cps);
    assert!(cps.iter().all(|&i| (30..50).contains(&i)), "{:?}", cps);
}

#[test]
fn ensemble_of_runs_feeds_the_scaling_test() {
    let sequential: Vec<Vec<f64>> = (0..5)
        .map(|k| (0..50).map(|t| 0.002 * t as f64 + 0.001 * k as f64).collect())
        .collect();
    let simultaneous: Vec<Vec<f64>> = (0..5)
        .map(|k| (0..50).map(|t| 0.0004 * (t * t) as f64 + 0.001 * k as f64).collect())
        .collect();
    let seq = summarize_runs(&sequential).unwrap();
    let sim = summarize_runs(&simultaneous).unwrap();
    assert_eq!(seq.len(), 50);

    let report = test_scaling_hypothesis(&seq.mean, &sim.mean).unwrap();
    assert!(report.linear_r2 > 0.99);
    assert!(report.quadratic_r2 > 0.99);
    assert!(report.significant);
    assert!(mean_abs_acceleration(&sim.mean) > mean_abs_acceleration(&seq.mean));

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"quadratic_r2\""));
}

#[test]
fn information_proxies_on_aligned_histories() {
    let a: Vec<Vec<f64>> = (0..5)
        .map(|k| (0..8).map(|i| ((i + k) as f64).sin()).collect())
        .collect();
    let te = transfer_entropy_proxy(&a, &a);
    assert!((0.0..=1.0).contains(&te));

    let combined = combine_pairs(&a[2..], &a[2..]);
    let phi = integrated_information(&combined);
    assert!(phi >= 0.0);
}
