//! Vector utilities for state and mirror vectors.
//!
//! All statistics here are population statistics (divide by `n`).

/// Below this norm a vector is treated as the zero vector.
pub const NORM_EPSILON: f64 = 1e-12;

/// Euclidean norm.
pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Dot product. Extra elements of the longer slice are ignored.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Uniform unit vector of dimension `n`.
pub fn uniform(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / (n as f64).sqrt(); n]
}

/// L2-normalize in place.
///
/// A numerically zero (or non-finite) vector is replaced with the uniform
/// unit vector. Returns `true` when that substitution happened.
pub fn normalize_or_uniform(v: &mut [f64]) -> bool {
    let n = norm(v);
    if n.is_finite() && n > NORM_EPSILON {
        for x in v.iter_mut() {
            *x /= n;
        }
        false
    } else {
        let u = 1.0 / (v.len().max(1) as f64).sqrt();
        for x in v.iter_mut() {
            *x = u;
        }
        true
    }
}

pub fn mean(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / v.len() as f64
}

/// Population variance.
pub fn variance(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    let m = mean(v);
    v.iter().map(|x| (x - m).powi(2)).sum::<f64>() / v.len() as f64
}

/// Population standard deviation.
pub fn std_dev(v: &[f64]) -> f64 {
    variance(v).sqrt()
}

/// Pearson correlation coefficient.
///
/// `None` when the slices differ in length, hold fewer than two elements,
/// or either side has zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.len() < 2 {
        return None;
    }
    let ma = mean(a);
    let mb = mean(b);
    let mut cov = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let dx = x - ma;
        let dy = y - mb;
        cov += dx * dy;
        va += dx * dx;
        vb += dy * dy;
    }
    let denom = (va * vb).sqrt();
    if !denom.is_finite() || denom <= NORM_EPSILON * NORM_EPSILON {
        return None;
    }
    Some((cov / denom).clamp(-1.0, 1.0))
}

/// Pearson correlation with zero variance mapped to `0.0`.
pub fn correlation_or_zero(a: &[f64], b: &[f64]) -> f64 {
    pearson(a, b).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_gives_unit_length() {
        let mut v = vec![3.0, 4.0];
        assert!(!normalize_or_uniform(&mut v));
        assert!((v[0] - 0.6).abs() < 1e-12);
        assert!((v[1] - 0.8).abs() < 1e-12);
        assert!((norm(&v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_falls_back_to_uniform() {
        let mut v = vec![0.0; 4];
        assert!(normalize_or_uniform(&mut v));
        assert!(v.iter().all(|x| (x - 0.5).abs() < 1e-12));
        assert!((norm(&v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nan_vector_falls_back_to_uniform() {
        let mut v = vec![f64::NAN, 1.0];
        assert!(normalize_or_uniform(&mut v));
        assert!(v.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn pearson_of_constant_is_none() {
        let a = [1.0, 1.0, 1.0];
        let b = [1.0, 2.0, 3.0];
        assert!(pearson(&a, &b).is_none());
        assert_eq!(correlation_or_zero(&a, &b), 0.0);
    }

    #[test]
    fn pearson_detects_perfect_relationships() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0];
        let c = [4.0, 3.0, 2.0, 1.0];
        assert!((pearson(&a, &b).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&a, &c).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn population_variance() {
        assert!((variance(&[1.0, 2.0, 3.0, 4.0]) - 1.25).abs() < 1e-12);
        assert_eq!(variance(&[]), 0.0);
    }
}
