//! Order parameter for phase-transition analysis.

use mirror_core::vector;

/// `(corr(a, b) + 1) / 2`, mapping correlation into [0, 1].
///
/// Zero-variance inputs count as correlation 0, giving 0.5.
pub fn order_parameter(a: &[f64], b: &[f64]) -> f64 {
    (vector::correlation_or_zero(a, b) + 1.0) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_correlation_extremes() {
        let a = [1.0, 2.0, 3.0];
        assert!((order_parameter(&a, &[2.0, 4.0, 6.0]) - 1.0).abs() < 1e-12);
        assert!(order_parameter(&a, &[3.0, 2.0, 1.0]).abs() < 1e-12);
        assert_eq!(order_parameter(&a, &[1.0, 1.0, 1.0]), 0.5);
    }
}
