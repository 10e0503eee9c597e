//! Outcome of a batch run.

use crate::error::{ExecutionError, RequestError};
use chrono::{DateTime, Utc};
use clmm_liq_protocols::instructions::LiquidityQuote;
use serde::{Deserialize, Serialize};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::fmt;
use uuid::Uuid;

/// Step of a request at which processing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    FetchPool,
    FetchConfig,
    FetchPosition,
    PriceMath,
    Build,
    Sign,
    Submit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FetchPool => "fetch pool",
            Self::FetchConfig => "fetch config",
            Self::FetchPosition => "fetch position",
            Self::PriceMath => "price math",
            Self::Build => "build",
            Self::Sign => "sign",
            Self::Submit => "submit",
        };
        write!(f, "{name}")
    }
}

/// A confirmed liquidity increase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// Position of the request in the input list.
    pub index: usize,
    /// Pool state account.
    pub pool: Pubkey,
    /// Position that received the liquidity.
    pub position: Pubkey,
    /// Transaction signature. Never broadcast when simulating.
    pub signature: Signature,
    /// Token bounds the transaction was built with.
    pub quote: LiquidityQuote,
    /// When the submitter returned.
    pub confirmed_at: DateTime<Utc>,
}

/// The request that stopped the run.
#[derive(Debug)]
pub struct RunFailure {
    /// Position of the failed request in the input list.
    pub index: usize,
    /// Step that raised the error.
    pub stage: Stage,
    pub error: RequestError,
}

/// Result of [`Orchestrator::run`](super::Orchestrator::run).
///
/// `outcomes` holds one entry per completed request, in input order. When
/// `failure` is set, no request after its index was attempted.
#[derive(Debug)]
pub struct RunReport {
    /// Identifier shared by every log line of the run.
    pub run_id: Uuid,
    pub outcomes: Vec<SubmissionOutcome>,
    pub failure: Option<RunFailure>,
}

impl RunReport {
    pub(crate) fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            outcomes: Vec::new(),
            failure: None,
        }
    }

    /// Number of requests that completed.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Outcomes of a fully successful run, or the error that aborted it.
    pub fn into_result(self) -> Result<Vec<SubmissionOutcome>, ExecutionError> {
        match self.failure {
            None => Ok(self.outcomes),
            Some(RunFailure {
                index,
                stage,
                error,
            }) => Err(ExecutionError::RequestFailed {
                index,
                stage,
                source: error,
            }),
        }
    }
}
