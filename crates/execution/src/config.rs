//! Run configuration and keypair loading.

use clmm_liq_domain::value_objects::Slippage;
use serde::Deserialize;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroize;

/// Errors raised while loading configuration. All are fatal before any request runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid pubkey for {field}: {value:?}")]
    InvalidPubkey { field: String, value: String },

    #[error("unknown commitment level {0:?}")]
    InvalidCommitment(String),

    #[error("request {index} has zero liquidity")]
    ZeroLiquidity { index: usize },

    #[error("invalid keypair file {path}: {reason}")]
    Keypair { path: PathBuf, reason: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    url: Option<String>,
    program_id: String,
    commitment: Option<String>,
    #[serde(default)]
    increase_liquidity: Vec<RawRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRequest {
    pool_id: String,
    position_id: String,
    liquidity: u128,
    slippage_bps: Slippage,
}

/// One liquidity increase to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRequest {
    /// Pool state account.
    pub pool: Pubkey,
    /// Personal position account to add liquidity to.
    pub position: Pubkey,
    /// Liquidity units to add. Always positive.
    pub liquidity_delta: u128,
    /// Tolerance applied to both token amounts.
    pub slippage: Slippage,
}

/// Validated batch configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// RPC endpoint, unless supplied on the command line.
    pub url: Option<String>,
    /// Deployed AMM program.
    pub program_id: Pubkey,
    /// Commitment for reads and confirmations. Defaults to `confirmed`.
    pub commitment: CommitmentConfig,
    /// Requests in execution order.
    pub requests: Vec<PositionRequest>,
}

impl RunConfig {
    /// Reads and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&contents)?;
        debug!(
            path = %path.display(),
            requests = config.requests.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(contents)?;

        let requests = raw
            .increase_liquidity
            .into_iter()
            .enumerate()
            .map(|(index, request)| {
                if request.liquidity == 0 {
                    return Err(ConfigError::ZeroLiquidity { index });
                }
                Ok(PositionRequest {
                    pool: parse_pubkey(&format!("increaseLiquidity[{index}].poolId"), &request.pool_id)?,
                    position: parse_pubkey(
                        &format!("increaseLiquidity[{index}].positionId"),
                        &request.position_id,
                    )?,
                    liquidity_delta: request.liquidity,
                    slippage: request.slippage_bps,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            url: raw.url,
            program_id: parse_pubkey("programId", &raw.program_id)?,
            commitment: parse_commitment(raw.commitment.as_deref())?,
            requests,
        })
    }
}

fn parse_pubkey(field: &str, value: &str) -> Result<Pubkey, ConfigError> {
    Pubkey::from_str(value).map_err(|_| ConfigError::InvalidPubkey {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_commitment(value: Option<&str>) -> Result<CommitmentConfig, ConfigError> {
    match value {
        None | Some("confirmed") => Ok(CommitmentConfig::confirmed()),
        Some("processed") => Ok(CommitmentConfig::processed()),
        Some("finalized") => Ok(CommitmentConfig::finalized()),
        Some(other) => Err(ConfigError::InvalidCommitment(other.to_string())),
    }
}

/// Loads a keypair stored as a JSON array of 64 bytes.
///
/// The file contents are wiped from memory once the keypair is built.
pub fn load_keypair(path: impl AsRef<Path>) -> Result<Keypair, ConfigError> {
    let path = path.as_ref();
    let invalid = |reason: String| ConfigError::Keypair {
        path: path.to_path_buf(),
        reason,
    };

    let mut contents = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let parsed = serde_json::from_str::<Vec<u8>>(&contents);
    contents.zeroize();

    let mut bytes = parsed.map_err(|e| invalid(e.to_string()))?;
    let keypair = if bytes.is_empty() {
        Err(invalid("keypair file is empty".to_string()))
    } else {
        Keypair::try_from(bytes.as_slice()).map_err(|e| invalid(e.to_string()))
    };
    bytes.zeroize();
    keypair
}
