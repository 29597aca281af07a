//! Least-squares polynomial fits, R² and discrete gradients.

use crate::error::{ensure_len, ensure_same_len, AnalysisError, Result};
use mirror_core::vector;
use serde::{Deserialize, Serialize};

/// Guard added to the total sum of squares in [`r_squared`].
pub const R_SQUARED_GUARD: f64 = 1e-10;

const PIVOT_EPSILON: f64 = 1e-12;

/// A polynomial with coefficients in ascending order of power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// `coefficients[k]` multiplies `x^k`.
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    pub fn eval_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }
}

/// Least-squares polynomial of `degree` through `(x, y)`.
///
/// Solves the normal equations on `x` rescaled into [-1, 1], then maps
/// the coefficients back.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> Result<Polynomial> {
    ensure_same_len(x.len(), y.len())?;
    let terms = degree + 1;
    ensure_len(x.len(), terms)?;

    let scale = x.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let scale = if scale > 0.0 { scale } else { 1.0 };

    // Normal equations: (VᵀV) c = Vᵀy over powers of the scaled x.
    let mut power_sums = vec![0.0; 2 * degree + 1];
    let mut rhs = vec![0.0; terms];
    for (&xi, &yi) in x.iter().zip(y) {
        let u = xi / scale;
        let mut p = 1.0;
        for (k, sum) in power_sums.iter_mut().enumerate() {
            *sum += p;
            if k < terms {
                rhs[k] += p * yi;
            }
            p *= u;
        }
    }
    let mut matrix: Vec<Vec<f64>> = (0..terms)
        .map(|r| (0..terms).map(|c| power_sums[r + c]).collect())
        .collect();

    let scaled = solve(&mut matrix, &mut rhs)?;
    let coefficients = scaled
        .iter()
        .enumerate()
        .map(|(k, c)| c / scale.powi(k as i32))
        .collect();
    Ok(Polynomial::new(coefficients))
}

/// Gaussian elimination with partial pivoting. Consumes `a` and `b`.
fn solve(a: &mut [Vec<f64>], b: &mut [f64]) -> Result<Vec<f64>> {
    let n = b.len();
    let magnitude = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |m, v| m.max(v.abs()));
    let tolerance = PIVOT_EPSILON * magnitude.max(1.0);

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        let lead = a[pivot][col];
        if lead.is_nan() || lead.abs() <= tolerance {
            return Err(AnalysisError::SingularSystem);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}

/// Coefficient of determination, `1 - SS_res / (SS_tot + 1e-10)`.
pub fn r_squared(y: &[f64], predicted: &[f64]) -> Result<f64> {
    ensure_same_len(y.len(), predicted.len())?;
    ensure_len(y.len(), 1)?;
    let mean = vector::mean(y);
    let ss_res: f64 = y.iter().zip(predicted).map(|(a, p)| (a - p).powi(2)).sum();
    let ss_tot: f64 = y.iter().map(|a| (a - mean).powi(2)).sum();
    Ok(1.0 - ss_res / (ss_tot + R_SQUARED_GUARD))
}

/// A fitted polynomial together with its R².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    pub polynomial: Polynomial,
    pub r_squared: f64,
}

/// Fit a series against its sample index `0, 1, 2, ...`.
pub fn fit_series(y: &[f64], degree: usize) -> Result<Fit> {
    let t = time_points(y.len());
    let polynomial = polyfit(&t, y, degree)?;
    let r_squared = r_squared(y, &polynomial.eval_all(&t))?;
    Ok(Fit {
        polynomial,
        r_squared,
    })
}

/// `0.0, 1.0, ..., (n - 1) as f64`.
pub fn time_points(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// Discrete derivative with unit spacing.
///
/// Central differences inside, one-sided differences at both ends.
/// Series shorter than two samples have zero gradient.
pub fn gradient(y: &[f64]) -> Vec<f64> {
    let n = y.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let mut g = Vec::with_capacity(n);
    g.push(y[1] - y[0]);
    for i in 1..n - 1 {
        g.push((y[i + 1] - y[i - 1]) / 2.0);
    }
    g.push(y[n - 1] - y[n - 2]);
    g
}
