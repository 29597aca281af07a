//! Information proxies.
//!
//! Transfer entropy is approximated by lagged absolute correlation, and
//! integrated information by the variance of a combined state in excess
//! of the mean variance of its two halves.

use mirror_core::vector;

/// Mean `|corr(source[i], target[i + 1])|` over all available `i`.
///
/// Returns 0 when either sequence holds fewer than three vectors.
/// Zero-variance pairs count as correlation 0.
pub fn transfer_entropy_proxy<S, T>(source: &[S], target: &[T]) -> f64
where
    S: AsRef<[f64]>,
    T: AsRef<[f64]>,
{
    if source.len() < 3 || target.len() < 3 {
        return 0.0;
    }
    let pairs = (source.len() - 1).min(target.len() - 1);
    let total: f64 = (0..pairs)
        .map(|i| vector::correlation_or_zero(source[i].as_ref(), target[i + 1].as_ref()).abs())
        .sum();
    total / pairs as f64
}

/// Variance-partition proxy for Φ over the most recent combined state.
///
/// `max(0, var(whole) - (var(first half) + var(second half)) / 2)`, using
/// population variances. Returns 0 when fewer than two states are given.
pub fn integrated_information<S: AsRef<[f64]>>(states: &[S]) -> f64 {
    if states.len() < 2 {
        return 0.0;
    }
    let latest = match states.last() {
        Some(s) => s.as_ref(),
        None => return 0.0,
    };
    partition_excess_variance(latest)
}

/// Excess variance of `state` over its halves, floored at 0.
pub fn partition_excess_variance(state: &[f64]) -> f64 {
    let mid = state.len() / 2;
    let whole = vector::variance(state);
    let parts = (vector::variance(&state[..mid]) + vector::variance(&state[mid..])) / 2.0;
    (whole - parts).max(0.0)
}

/// Concatenate paired vectors, e.g. two agents' histories, into combined states.
pub fn combine_pairs<A, B>(a: &[A], b: &[B]) -> Vec<Vec<f64>>
where
    A: AsRef<[f64]>,
    B: AsRef<[f64]>,
{
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.as_ref().iter().chain(y.as_ref()).copied().collect())
        .collect()
}
