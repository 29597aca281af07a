//! Error types for mirror operations.
//!
//! Errors only arise while building states, agents and systems from
//! parameters. Once a run is underway every degenerate numeric case is
//! clamped or substituted instead of surfacing as an error.

use thiserror::Error;

/// Result type for mirror operations.
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Errors that can occur while constructing mirror components.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("State vector is empty")]
    EmptyVector,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

// Convenience constructors
impl MirrorError {
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        MirrorError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MirrorError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }
}

/// Check that `value` lies in `[min, max]` (and is finite).
pub(crate) fn ensure_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(MirrorError::out_of_range(field, min, max, value))
    }
}
