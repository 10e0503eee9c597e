//! Error types for chain access, instruction building and submission.

use crate::accounts::AccountKind;
use clmm_liq_domain::MathError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Errors raised while reading on-chain state.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{kind} account {address} not found")]
    NotFound { kind: AccountKind, address: Pubkey },

    #[error("{kind} account {address} is owned by {owner}, not the configured program")]
    WrongOwner {
        kind: AccountKind,
        address: Pubkey,
        owner: Pubkey,
    },

    #[error("failed to decode {kind} account {address}: {reason}")]
    Decode {
        kind: AccountKind,
        address: Pubkey,
        reason: String,
    },

    #[error("rpc request failed: {0:#}")]
    Rpc(#[from] anyhow::Error),
}

impl FetchError {
    /// True when the account simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors raised while building an instruction set.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid tick range [{tick_lower}, {tick_upper}]")]
    InvalidRange { tick_lower: i32, tick_upper: i32 },

    #[error("liquidity delta must be positive")]
    ZeroLiquidity,

    #[error(
        "slippage exceeded for token {token}: pool requires {required}, tolerance allows {maximum}"
    )]
    SlippageExceeded {
        token: u8,
        required: u64,
        maximum: u64,
    },

    #[error("failed to encode token instruction: {0}")]
    TokenInstruction(String),

    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Errors raised while signing or submitting a transaction.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no signers supplied")]
    NoSigners,

    #[error("failed to fetch blockhash: {0:#}")]
    Blockhash(anyhow::Error),

    #[error("failed to sign transaction: {0}")]
    Signing(String),

    #[error("simulation failed: {err}")]
    Simulation { err: String, logs: Vec<String> },

    #[error("transaction failed: {0:#}")]
    Send(anyhow::Error),
}
