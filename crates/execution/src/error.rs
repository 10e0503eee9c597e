//! Execution error types.

use crate::config::ConfigError;
use crate::orchestrator::Stage;
use clmm_liq_domain::MathError;
use clmm_liq_protocols::error::{BuildError, FetchError, SubmitError};
use thiserror::Error;

/// Cause of a failed request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

impl RequestError {
    /// True when a referenced account does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_not_found(),
            Self::Build(BuildError::Fetch(e)) => e.is_not_found(),
            _ => false,
        }
    }
}

/// Top-level error for a batch run.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("request {index} failed at {stage}: {source}")]
    RequestFailed {
        index: usize,
        stage: Stage,
        source: RequestError,
    },
}
