//! Two-sample t-tests.
//!
//! Both tests are two-sided and use sample variances (`n - 1`
//! denominator). Two-sided p-values come from `statrs`'s Student's t
//! distribution.

use crate::error::{ensure_len, AnalysisError, Result};
use mirror_core::vector;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of a two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTest {
    pub statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: f64,
}

impl TTest {
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Student's t-test assuming equal variances.
pub fn student_t_test(a: &[f64], b: &[f64]) -> Result<TTest> {
    let (na, nb) = sample_sizes(a, b)?;
    let (va, vb) = (sample_variance(a), sample_variance(b));
    let df = na + nb - 2.0;
    let pooled = ((na - 1.0) * va + (nb - 1.0) * vb) / df;
    let se = (pooled * (1.0 / na + 1.0 / nb)).sqrt();
    finish(vector::mean(a) - vector::mean(b), se, df)
}

/// Welch's t-test, not assuming equal variances.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<TTest> {
    let (na, nb) = sample_sizes(a, b)?;
    let (qa, qb) = (sample_variance(a) / na, sample_variance(b) / nb);
    let se = (qa + qb).sqrt();
    let denom = qa * qa / (na - 1.0) + qb * qb / (nb - 1.0);
    // Welch-Satterthwaite; degenerate variances fall back to the pooled df.
    let df = if denom > 0.0 {
        (qa + qb).powi(2) / denom
    } else {
        na + nb - 2.0
    };
    finish(vector::mean(a) - vector::mean(b), se, df)
}

/// Sample variance with `n - 1` denominator.
pub fn sample_variance(v: &[f64]) -> f64 {
    if v.len() < 2 {
        return 0.0;
    }
    let n = v.len() as f64;
    vector::variance(v) * n / (n - 1.0)
}

fn sample_sizes(a: &[f64], b: &[f64]) -> Result<(f64, f64)> {
    ensure_len(a.len(), 2)?;
    ensure_len(b.len(), 2)?;
    Ok((a.len() as f64, b.len() as f64))
}

fn finish(mean_diff: f64, se: f64, df: f64) -> Result<TTest> {
    if se.is_nan() || se <= 0.0 {
        // Both samples constant.
        let (statistic, p_value) = if mean_diff == 0.0 {
            (0.0, 1.0)
        } else {
            (mean_diff.signum() * f64::INFINITY, 0.0)
        };
        return Ok(TTest {
            statistic,
            p_value,
            degrees_of_freedom: df,
        });
    }
    let statistic = mean_diff / se;
    let dist =
        StudentsT::new(0.0, 1.0, df).map_err(|e| AnalysisError::Distribution(e.to_string()))?;
    let p_value = (2.0 * (1.0 - dist.cdf(statistic.abs()))).clamp(0.0, 1.0);
    Ok(TTest {
        statistic,
        p_value,
        degrees_of_freedom: df,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_samples_are_not_significant() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let t = student_t_test(&a, &a).unwrap();
        assert_eq!(t.statistic, 0.0);
        assert!((t.p_value - 1.0).abs() < 1e-12);
        assert_eq!(t.degrees_of_freedom, 8.0);
    }

    #[test]
    fn student_matches_known_value() {
        // t = -3, df = 8, two-sided p ~= 0.01707
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [4.0, 5.0, 6.0, 7.0, 8.0];
        let t = student_t_test(&a, &b).unwrap();
        assert!((t.statistic + 3.0).abs() < 1e-12);
        assert!((t.p_value - 0.01707).abs() < 1e-4, "{}", t.p_value);
        assert!(t.is_significant(0.05));
    }

    #[test]
    fn welch_equals_student_for_equal_sizes_and_variances() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [4.0, 5.0, 6.0, 7.0, 8.0];
        let s = student_t_test(&a, &b).unwrap();
        let w = welch_t_test(&a, &b).unwrap();
        assert!((s.statistic - w.statistic).abs() < 1e-12);
        assert!((w.degrees_of_freedom - 8.0).abs() < 1e-12);
    }

    #[test]
    fn welch_reduces_degrees_of_freedom_for_unequal_variances() {
        let a = [1.0, 1.1, 0.9, 1.0];
        let b = [0.0, 5.0, -5.0, 10.0, -10.0, 3.0];
        let w = welch_t_test(&a, &b).unwrap();
        assert!(w.degrees_of_freedom < 8.0);
        assert!(!w.is_significant(0.05));
    }

    #[test]
    fn constant_samples_are_handled() {
        let t = student_t_test(&[1.0, 1.0], &[1.0, 1.0]).unwrap();
        assert_eq!((t.statistic, t.p_value), (0.0, 1.0));
        let t = welch_t_test(&[1.0, 1.0], &[2.0, 2.0]).unwrap();
        assert_eq!(t.statistic, f64::NEG_INFINITY);
        assert_eq!(t.p_value, 0.0);
    }

    #[test]
    fn tiny_samples_are_rejected() {
        assert_eq!(
            student_t_test(&[1.0], &[1.0, 2.0]),
            Err(AnalysisError::InsufficientData { needed: 2, got: 1 })
        );
    }
}
