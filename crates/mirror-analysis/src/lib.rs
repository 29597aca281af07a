//! # Mirror Analysis
//!
//! Stateless functions over recorded float sequences.
//!
//! - [`information`]: transfer-entropy and integrated-information proxies
//! - [`changepoint`]: sliding-window mean-shift detector
//! - [`order`]: correlation order parameter
//! - [`fit`]: least-squares polynomials, R², discrete gradient
//! - [`hypothesis`]: Student and Welch two-sample t-tests
//! - [`scaling`]: linear-vs-quadratic scaling report
//! - [`ensemble`]: mean and standard error across runs
//!
//! None of these are exact information-theoretic quantities; they are
//! correlation and variance proxies.
//!
//! ```rust
//! use mirror_analysis::prelude::*;
//!
//! let y: Vec<f64> = (0..10).map(|t| 2.0 * t as f64 + 1.0).collect();
//! let x: Vec<f64> = (0..10).map(|t| t as f64).collect();
//! let line = polyfit(&x, &y, 1).unwrap();
//! assert!((line.eval(20.0) - 41.0).abs() < 1e-9);
//! ```

pub mod error;
pub mod information;
pub mod changepoint;
pub mod order;
pub mod fit;
pub mod hypothesis;
pub mod scaling;
pub mod ensemble;
pub mod prelude;
