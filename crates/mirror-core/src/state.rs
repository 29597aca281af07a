//! State: one agent's internal condition.
//!
//! A state is a unit-norm real vector plus three scalars. The vector is
//! re-normalized on every mutation, falling back to the uniform unit
//! vector if a mutation ever produces the zero vector. Energy only ever
//! decreases after construction and never drops below [`ENERGY_FLOOR`].

use crate::config::StateConfig;
use crate::error::{ensure_range, MirrorError, Result};
use crate::vector;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Lowest energy a state can reach.
pub const ENERGY_FLOOR: f64 = 0.1;

/// Fewest vectors a bounded history may retain.
pub const MIN_HISTORY: usize = 5;

/// How many past vectors a state retains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryLimit {
    Unbounded,
    Bounded(usize),
}

impl Default for HistoryLimit {
    fn default() -> Self {
        HistoryLimit::Bounded(32)
    }
}

impl HistoryLimit {
    /// Reject bounds too short for the lagged history metrics.
    pub fn validate(&self) -> Result<()> {
        match *self {
            HistoryLimit::Bounded(cap) if cap < MIN_HISTORY => Err(MirrorError::invalid_config(
                "history",
                cap.to_string(),
                format!("must retain at least {} vectors", MIN_HISTORY),
            )),
            _ => Ok(()),
        }
    }

    fn admits(&self, len: usize) -> bool {
        match self {
            HistoryLimit::Unbounded => true,
            HistoryLimit::Bounded(cap) => len <= *cap,
        }
    }
}

/// An agent's internal condition.
#[derive(Debug, Clone)]
pub struct State {
    vector: Vec<f64>,
    /// Cognitive complexity in [0, 1].
    complexity: f64,
    /// Willingness to be influenced, in [0, 1].
    openness: f64,
    /// Remaining capacity in [0.1, 1.0].
    energy: f64,
    /// Past vectors, oldest first. Includes the current vector.
    history: VecDeque<Vec<f64>>,
    history_limit: HistoryLimit,
}

impl State {
    /// Build a state from a raw vector, normalizing it.
    pub fn new(vector: Vec<f64>, complexity: f64, openness: f64, energy: f64) -> Result<Self> {
        if vector.is_empty() {
            return Err(MirrorError::EmptyVector);
        }
        ensure_range("complexity", complexity, 0.0, 1.0)?;
        ensure_range("openness", openness, 0.0, 1.0)?;
        ensure_range("energy", energy, ENERGY_FLOOR, 1.0)?;

        let mut state = Self {
            vector: Vec::new(),
            complexity,
            openness,
            energy,
            history: VecDeque::new(),
            history_limit: HistoryLimit::default(),
        };
        state.set_vector(vector);
        Ok(state)
    }

    /// Build a state whose vector is a standard-normal draw of `dimension` components.
    pub fn random<R: Rng + ?Sized>(
        dimension: usize,
        complexity: f64,
        openness: f64,
        energy: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let vector: Vec<f64> = (0..dimension)
            .map(|_| rng.sample::<f64, _>(StandardNormal))
            .collect();
        Self::new(vector, complexity, openness, energy)
    }

    /// Build a random state from configuration.
    pub fn from_config<R: Rng + ?Sized>(config: &StateConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        Ok(Self::random(
            config.dimension,
            config.complexity,
            config.openness,
            config.energy,
            rng,
        )?
        .with_history_limit(config.history))
    }

    /// Change how many past vectors are retained, dropping the oldest if needed.
    pub fn with_history_limit(mut self, limit: HistoryLimit) -> Self {
        self.history_limit = limit;
        self.trim_history();
        self
    }

    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    pub fn vector(&self) -> &[f64] {
        &self.vector
    }

    pub fn complexity(&self) -> f64 {
        self.complexity
    }

    pub fn openness(&self) -> f64 {
        self.openness
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn history_limit(&self) -> HistoryLimit {
        self.history_limit
    }

    /// Number of retained vectors.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Retained vectors, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.history.iter().map(|v| v.as_slice())
    }

    /// The `n` most recent retained vectors, oldest first.
    pub fn recent_history(&self, n: usize) -> Vec<&[f64]> {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip).map(|v| v.as_slice()).collect()
    }

    /// Replace the vector, normalizing and recording it.
    pub fn update(&mut self, new_vector: Vec<f64>) -> Result<()> {
        if new_vector.len() != self.vector.len() {
            return Err(MirrorError::DimensionMismatch {
                expected: self.vector.len(),
                got: new_vector.len(),
            });
        }
        self.set_vector(new_vector);
        Ok(())
    }

    /// Decrease energy linearly, floored at [`ENERGY_FLOOR`].
    ///
    /// Negative rates are ignored so energy never increases.
    pub fn deplete(&mut self, rate: f64) {
        let rate = if rate.is_finite() { rate.max(0.0) } else { 0.0 };
        self.energy = (self.energy - rate).max(ENERGY_FLOOR);
    }

    pub(crate) fn set_vector(&mut self, mut new_vector: Vec<f64>) {
        if vector::normalize_or_uniform(&mut new_vector) {
            tracing::warn!(dimension = new_vector.len(), "degenerate state vector, substituted uniform");
        }
        self.vector = new_vector;
        self.history.push_back(self.vector.clone());
        self.trim_history();
    }

    fn trim_history(&mut self) {
        while !self.history_limit.admits(self.history.len()) {
            self.history.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn construction_normalizes() {
        let s = State::new(vec![3.0, 4.0], 0.5, 0.5, 1.0).unwrap();
        assert!((vector::norm(s.vector()) - 1.0).abs() < 1e-12);
        assert_eq!(s.history_len(), 1);
    }

    #[test]
    fn construction_rejects_out_of_range_scalars() {
        assert!(State::new(vec![1.0], 1.5, 0.5, 1.0).is_err());
        assert!(State::new(vec![1.0], 0.5, -0.1, 1.0).is_err());
        assert!(State::new(vec![1.0], 0.5, 0.5, 0.05).is_err());
        assert!(matches!(
            State::new(Vec::new(), 0.5, 0.5, 1.0),
            Err(MirrorError::EmptyVector)
        ));
    }

    #[test]
    fn zero_vector_becomes_uniform() {
        let s = State::new(vec![0.0; 9], 0.5, 0.5, 1.0).unwrap();
        assert!(s.vector().iter().all(|x| (x - 1.0 / 3.0).abs() < 1e-12));
    }

    #[test]
    fn random_state_is_unit_norm_and_seeded() {
        let mut r1 = StdRng::seed_from_u64(4577);
        let mut r2 = StdRng::seed_from_u64(4577);
        let a = State::random(100, 0.5, 0.7, 1.0, &mut r1).unwrap();
        let b = State::random(100, 0.5, 0.7, 1.0, &mut r2).unwrap();
        assert!((vector::norm(a.vector()) - 1.0).abs() < 1e-9);
        assert_eq!(a.vector(), b.vector());
    }

    #[test]
    fn energy_is_floored_and_never_rises() {
        let mut s = State::new(vec![1.0, 1.0], 0.5, 0.5, 0.3).unwrap();
        s.deplete(0.15);
        assert!((s.energy() - 0.15).abs() < 1e-12);
        s.deplete(0.15);
        assert_eq!(s.energy(), ENERGY_FLOOR);
        s.deplete(-1.0);
        assert_eq!(s.energy(), ENERGY_FLOOR);
    }

    #[test]
    fn bounded_history_keeps_most_recent() {
        let mut s = State::new(vec![1.0, 0.0], 0.5, 0.5, 1.0)
            .unwrap()
            .with_history_limit(HistoryLimit::Bounded(2));
        s.update(vec![0.0, 1.0]).unwrap();
        s.update(vec![1.0, 1.0]).unwrap();
        assert_eq!(s.history_len(), 2);
        let recent = s.recent_history(5);
        assert_eq!(recent.len(), 2);
        assert!((recent[0][1] - 1.0).abs() < 1e-12);
        assert_eq!(recent[1], s.vector());
    }

    #[test]
    fn short_history_limits_are_invalid() {
        assert!(HistoryLimit::Bounded(MIN_HISTORY - 1).validate().is_err());
        assert!(HistoryLimit::Bounded(MIN_HISTORY).validate().is_ok());
        assert!(HistoryLimit::Unbounded.validate().is_ok());
        assert!(HistoryLimit::default().validate().is_ok());
    }

    #[test]
    fn update_rejects_wrong_dimension() {
        let mut s = State::new(vec![1.0, 0.0], 0.5, 0.5, 1.0).unwrap();
        assert!(matches!(
            s.update(vec![1.0]),
            Err(MirrorError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }
}
