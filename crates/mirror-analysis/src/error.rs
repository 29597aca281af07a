//! Error types for the analysis layer.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data: need at least {needed} samples, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Singular system: least-squares fit is not determined")]
    SingularSystem,

    #[error("Distribution error: {0}")]
    Distribution(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

pub(crate) fn ensure_len(got: usize, needed: usize) -> Result<()> {
    if got < needed {
        return Err(AnalysisError::InsufficientData { needed, got });
    }
    Ok(())
}

pub(crate) fn ensure_same_len(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(AnalysisError::LengthMismatch { left, right });
    }
    Ok(())
}
