//! Error types for simulation runs.

use mirror_analysis::error::AnalysisError;
use mirror_core::error::MirrorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error(transparent)]
    Mirror(#[from] MirrorError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
