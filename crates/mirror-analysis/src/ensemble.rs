//! Aggregation of equal-length runs.

use crate::error::{ensure_len, ensure_same_len, Result};
use mirror_core::vector;
use serde::{Deserialize, Serialize};

/// Per-step mean and standard error across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleSummary {
    pub runs: usize,
    pub mean: Vec<f64>,
    /// Population standard deviation over `sqrt(runs)`.
    pub standard_error: Vec<f64>,
}

impl EnsembleSummary {
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Mean of the last `n` steps of the mean trajectory.
    pub fn tail_mean(&self, n: usize) -> f64 {
        let skip = self.mean.len().saturating_sub(n);
        vector::mean(&self.mean[skip..])
    }
}

/// Summarize runs that all have the same length.
pub fn summarize_runs<S: AsRef<[f64]>>(runs: &[S]) -> Result<EnsembleSummary> {
    ensure_len(runs.len(), 1)?;
    let len = runs[0].as_ref().len();
    for run in runs {
        ensure_same_len(len, run.as_ref().len())?;
    }

    let root_n = (runs.len() as f64).sqrt();
    let mut mean = Vec::with_capacity(len);
    let mut standard_error = Vec::with_capacity(len);
    let mut column = Vec::with_capacity(runs.len());
    for step in 0..len {
        column.clear();
        column.extend(runs.iter().map(|r| r.as_ref()[step]));
        mean.push(vector::mean(&column));
        standard_error.push(vector::std_dev(&column) / root_n);
    }
    Ok(EnsembleSummary {
        runs: runs.len(),
        mean,
        standard_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    #[test]
    fn summarizes_columns() {
        let runs = vec![vec![0.0, 1.0], vec![2.0, 1.0]];
        let s = summarize_runs(&runs).unwrap();
        assert_eq!(s.mean, vec![1.0, 1.0]);
        assert!((s.standard_error[0] - 1.0 / 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(s.standard_error[1], 0.0);
        assert_eq!(s.tail_mean(5), 1.0);
    }

    #[test]
    fn rejects_ragged_or_empty_input() {
        let ragged = vec![vec![0.0, 1.0], vec![2.0]];
        assert_eq!(
            summarize_runs(&ragged),
            Err(AnalysisError::LengthMismatch { left: 2, right: 1 })
        );
        let none: Vec<Vec<f64>> = Vec::new();
        assert!(summarize_runs(&none).is_err());
    }
}
