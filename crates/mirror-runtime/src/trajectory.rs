//! Trajectory: per-run record of named metric series.
//!
//! A trajectory maps stable snake_case metric names to append-only float
//! series. Every step appends one value to every series, so all series
//! always have the same length. Trust series exist only for runs whose
//! agents carry a trust model.

use crate::error::Result;
use mirror_core::vector;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Trust level recorded for an agent without a trust model.
pub const DISABLED_TRUST: f64 = 1.0;

/// A recorded metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Time,
    UnderstandingAB,
    UnderstandingBA,
    PhaseA,
    PhaseB,
    QualityA,
    QualityB,
    StateAlignment,
    SharedSpace,
    EnergyA,
    EnergyB,
    TransferEntropyAB,
    TransferEntropyBA,
    IntegratedInformation,
    OrderParameter,
    MirrorCoupling,
    TrustA,
    TrustB,
}

impl Metric {
    /// Metrics recorded by every run.
    pub const BASE: [Metric; 16] = [
        Metric::Time,
        Metric::UnderstandingAB,
        Metric::UnderstandingBA,
        Metric::PhaseA,
        Metric::PhaseB,
        Metric::QualityA,
        Metric::QualityB,
        Metric::StateAlignment,
        Metric::SharedSpace,
        Metric::EnergyA,
        Metric::EnergyB,
        Metric::TransferEntropyAB,
        Metric::TransferEntropyBA,
        Metric::IntegratedInformation,
        Metric::OrderParameter,
        Metric::MirrorCoupling,
    ];

    /// Metrics recorded only when trust is enabled.
    pub const TRUST: [Metric; 2] = [Metric::TrustA, Metric::TrustB];

    pub fn key(self) -> &'static str {
        match self {
            Metric::Time => "time",
            Metric::UnderstandingAB => "understanding_a_b",
            Metric::UnderstandingBA => "understanding_b_a",
            Metric::PhaseA => "phase_a",
            Metric::PhaseB => "phase_b",
            Metric::QualityA => "quality_a",
            Metric::QualityB => "quality_b",
            Metric::StateAlignment => "state_alignment",
            Metric::SharedSpace => "shared_space",
            Metric::EnergyA => "energy_a",
            Metric::EnergyB => "energy_b",
            Metric::TransferEntropyAB => "transfer_entropy_a_b",
            Metric::TransferEntropyBA => "transfer_entropy_b_a",
            Metric::IntegratedInformation => "integrated_information",
            Metric::OrderParameter => "order_parameter",
            Metric::MirrorCoupling => "mirror_coupling",
            Metric::TrustA => "trust_a",
            Metric::TrustB => "trust_b",
        }
    }

    pub fn from_key(key: &str) -> Option<Metric> {
        Metric::BASE
            .iter()
            .chain(Metric::TRUST.iter())
            .copied()
            .find(|m| m.key() == key)
    }
}

/// One step's worth of metric values.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StepMetrics {
    pub time: f64,
    pub understanding_a_b: f64,
    pub understanding_b_a: f64,
    pub phase_a: f64,
    pub phase_b: f64,
    pub quality_a: f64,
    pub quality_b: f64,
    pub state_alignment: f64,
    pub shared_space: f64,
    pub energy_a: f64,
    pub energy_b: f64,
    pub transfer_entropy_a_b: f64,
    pub transfer_entropy_b_a: f64,
    pub integrated_information: f64,
    pub order_parameter: f64,
    pub mirror_coupling: f64,
    pub trust_a: Option<f64>,
    pub trust_b: Option<f64>,
}

impl StepMetrics {
    fn value(&self, metric: Metric) -> Option<f64> {
        Some(match metric {
            Metric::Time => self.time,
            Metric::UnderstandingAB => self.understanding_a_b,
            Metric::UnderstandingBA => self.understanding_b_a,
            Metric::PhaseA => self.phase_a,
            Metric::PhaseB => self.phase_b,
            Metric::QualityA => self.quality_a,
            Metric::QualityB => self.quality_b,
            Metric::StateAlignment => self.state_alignment,
            Metric::SharedSpace => self.shared_space,
            Metric::EnergyA => self.energy_a,
            Metric::EnergyB => self.energy_b,
            Metric::TransferEntropyAB => self.transfer_entropy_a_b,
            Metric::TransferEntropyBA => self.transfer_entropy_b_a,
            Metric::IntegratedInformation => self.integrated_information,
            Metric::OrderParameter => self.order_parameter,
            Metric::MirrorCoupling => self.mirror_coupling,
            Metric::TrustA => return self.trust_a,
            Metric::TrustB => return self.trust_b,
        })
    }
}

/// Named metric series of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    series: BTreeMap<Metric, Vec<f64>>,
    len: usize,
}

impl Trajectory {
    /// An empty trajectory with the base metrics, plus trust metrics if requested.
    pub fn new(with_trust: bool) -> Self {
        let mut series: BTreeMap<Metric, Vec<f64>> =
            Metric::BASE.iter().map(|&m| (m, Vec::new())).collect();
        if with_trust {
            series.extend(Metric::TRUST.iter().map(|&m| (m, Vec::new())));
        }
        Self { series, len: 0 }
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn has_trust(&self) -> bool {
        self.series.contains_key(&Metric::TrustA)
    }

    /// Append one step.
    ///
    /// In a pair where only one agent runs trust, the other side is
    /// recorded at [`DISABLED_TRUST`] so every series stays finite and
    /// equal length.
    pub fn push(&mut self, step: &StepMetrics) {
        for (metric, values) in self.series.iter_mut() {
            values.push(step.value(*metric).unwrap_or(DISABLED_TRUST));
        }
        self.len += 1;
    }

    /// The series for `metric`, or an empty slice if it is not recorded.
    pub fn get(&self, metric: Metric) -> &[f64] {
        self.series.get(&metric).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn get_by_key(&self, key: &str) -> Option<&[f64]> {
        let metric = Metric::from_key(key)?;
        self.series.get(&metric).map(|v| v.as_slice())
    }

    /// Recorded metric names in stable order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.series.keys().map(|m| m.key())
    }

    /// Per-step `(understanding_a_b + understanding_b_a) / 2`.
    pub fn mean_understanding(&self) -> Vec<f64> {
        self.get(Metric::UnderstandingAB)
            .iter()
            .zip(self.get(Metric::UnderstandingBA))
            .map(|(a, b)| (a + b) / 2.0)
            .collect()
    }

    /// Mean of the first `n` values of `metric`.
    pub fn head_mean(&self, metric: Metric, n: usize) -> f64 {
        let values = self.get(metric);
        vector::mean(&values[..n.min(values.len())])
    }

    /// Mean of the last `n` values of `metric`.
    pub fn tail_mean(&self, metric: Metric, n: usize) -> f64 {
        let values = self.get(metric);
        vector::mean(&values[values.len().saturating_sub(n)..])
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for Trajectory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.series.len()))?;
        for (metric, values) in &self.series {
            map.serialize_entry(metric.key(), values)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(t: f64) -> StepMetrics {
        StepMetrics {
            time: t,
            understanding_a_b: 0.1 * t,
            understanding_b_a: 0.3 * t,
            phase_a: 1.0,
            phase_b: 1.0,
            quality_a: 0.5,
            quality_b: 0.5,
            state_alignment: 0.2,
            shared_space: 0.0,
            energy_a: 1.0,
            energy_b: 1.0,
            transfer_entropy_a_b: 0.0,
            transfer_entropy_b_a: 0.0,
            integrated_information: 0.0,
            order_parameter: 0.5,
            mirror_coupling: 0.1,
            trust_a: Some(0.5),
            trust_b: Some(0.6),
        }
    }

    #[test]
    fn series_stay_equal_length() {
        let mut traj = Trajectory::new(true);
        for t in 0..5 {
            traj.push(&step(t as f64));
        }
        assert_eq!(traj.len(), 5);
        for key in traj.keys() {
            assert_eq!(traj.get_by_key(key).map(|s| s.len()), Some(5), "{}", key);
        }
    }

    #[test]
    fn trust_keys_only_when_enabled() {
        let mut traj = Trajectory::new(false);
        traj.push(&step(0.0));
        assert!(!traj.has_trust());
        assert!(traj.get_by_key("trust_a").is_none());
        assert!(traj.get(Metric::TrustA).is_empty());
        assert_eq!(traj.keys().count(), Metric::BASE.len());
    }

    #[test]
    fn missing_trust_side_reads_as_full_trust() {
        let mut traj = Trajectory::new(true);
        traj.push(&StepMetrics {
            trust_b: None,
            ..step(0.0)
        });
        assert_eq!(traj.get(Metric::TrustA), &[0.5]);
        assert_eq!(traj.get(Metric::TrustB), &[DISABLED_TRUST]);
        assert!(!traj.to_json().unwrap().contains("null"));
    }

    #[test]
    fn keys_round_trip() {
        for m in Metric::BASE.iter().chain(Metric::TRUST.iter()) {
            assert_eq!(Metric::from_key(m.key()), Some(*m));
        }
        assert_eq!(Metric::from_key("nope"), None);
    }

    #[test]
    fn mean_understanding_and_windows() {
        let mut traj = Trajectory::new(false);
        for t in 0..4 {
            traj.push(&step(t as f64));
        }
        let mean = traj.mean_understanding();
        assert!((mean[2] - 0.4).abs() < 1e-12);
        assert!((traj.head_mean(Metric::Time, 2) - 0.5).abs() < 1e-12);
        assert!((traj.tail_mean(Metric::Time, 2) - 2.5).abs() < 1e-12);
        assert!((traj.tail_mean(Metric::Time, 99) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn serializes_as_name_to_series_map() {
        let mut traj = Trajectory::new(true);
        traj.push(&step(1.0));
        let json = traj.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["time"][0], 1.0);
        assert_eq!(value["trust_b"][0], 0.6);
        assert!(value.get("shared_space").is_some());
    }
}
