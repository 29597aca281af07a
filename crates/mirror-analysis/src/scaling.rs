//! Scaling-hypothesis test: does one trajectory grow linearly while the
//! other grows quadratically, and do their growth rates differ?

use crate::error::Result;
use crate::fit::{fit_series, gradient};
use crate::hypothesis::student_t_test;
use serde::{Deserialize, Serialize};

/// Significance level used by [`ScalingReport::significant`].
pub const SIGNIFICANCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingReport {
    /// R² of a linear fit to the sequential series.
    pub linear_r2: f64,
    /// R² of a quadratic fit to the simultaneous series.
    pub quadratic_r2: f64,
    /// Student t statistic comparing the two gradients.
    pub t_statistic: f64,
    pub p_value: f64,
    /// `p_value < 0.05`.
    pub significant: bool,
}

/// Fit the sequential series linearly and the simultaneous series
/// quadratically, then t-test their discrete derivatives.
pub fn test_scaling_hypothesis(sequential: &[f64], simultaneous: &[f64]) -> Result<ScalingReport> {
    let linear = fit_series(sequential, 1)?;
    let quadratic = fit_series(simultaneous, 2)?;
    let test = student_t_test(&gradient(sequential), &gradient(simultaneous))?;
    Ok(ScalingReport {
        linear_r2: linear.r_squared,
        quadratic_r2: quadratic.r_squared,
        t_statistic: test.statistic,
        p_value: test.p_value,
        significant: test.p_value < SIGNIFICANCE,
    })
}

/// Mean absolute second derivative.
pub fn mean_abs_acceleration(y: &[f64]) -> f64 {
    let accel = gradient(&gradient(y));
    if accel.is_empty() {
        return 0.0;
    }
    accel.iter().map(|a| a.abs()).sum::<f64>() / accel.len() as f64
}
