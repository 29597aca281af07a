//! Mirror Analysis Prelude: convenient imports for common usage.
//!
//! ```rust
//! use mirror_analysis::prelude::*;
//! ```

pub use crate::error::{AnalysisError, Result};

pub use crate::information::{combine_pairs, integrated_information, transfer_entropy_proxy};

pub use crate::changepoint::detect_changepoints;

pub use crate::order::order_parameter;

pub use crate::fit::{fit_series, gradient, polyfit, r_squared, time_points, Fit, Polynomial};

pub use crate::hypothesis::{student_t_test, welch_t_test, TTest};

pub use crate::scaling::{mean_abs_acceleration, test_scaling_hypothesis, ScalingReport};

pub use crate::ensemble::{summarize_runs, EnsembleSummary};
