//! Thin async wrapper around the Solana RPC client.

use anyhow::{Context, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};
use tracing::debug;

/// Outcome of a transaction simulation.
#[derive(Debug, Clone, Default)]
pub struct SimulationOutcome {
    /// Error reported by the runtime, if any.
    pub err: Option<String>,
    /// Program logs.
    pub logs: Vec<String>,
    /// Compute units consumed.
    pub units_consumed: Option<u64>,
}

/// RPC provider shared by the fetcher and the submitter.
pub struct RpcProvider {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcProvider {
    /// Creates a provider for `url` using `commitment` for reads and confirmations.
    pub fn new(url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        let url = url.into();
        debug!(url = %url, commitment = ?commitment.commitment, "Creating RPC provider");
        Self {
            client: RpcClient::new_with_commitment(url, commitment),
            commitment,
        }
    }

    /// Fetches an account, returning `None` when it does not exist.
    pub async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        let response = self
            .client
            .get_account_with_commitment(address, self.commitment)
            .await
            .with_context(|| format!("Failed to fetch account {address}"))?;
        Ok(response.value)
    }

    /// Returns the rent-exempt minimum for an account of `data_len` bytes.
    pub async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        self.client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .context("Failed to fetch rent-exempt minimum")
    }

    /// Returns the latest blockhash.
    pub async fn get_latest_blockhash(&self) -> Result<Hash> {
        self.client
            .get_latest_blockhash()
            .await
            .context("Failed to get recent blockhash")
    }

    /// Simulates a signed transaction.
    pub async fn simulate_transaction(&self, transaction: &Transaction) -> Result<SimulationOutcome> {
        let response = self
            .client
            .simulate_transaction(transaction)
            .await
            .context("Failed to simulate transaction")?;
        let value = response.value;
        Ok(SimulationOutcome {
            err: value.err.map(|e| format!("{e:?}")),
            logs: value.logs.unwrap_or_default(),
            units_consumed: value.units_consumed,
        })
    }

    /// Sends a signed transaction and waits for confirmation.
    pub async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        self.client
            .send_and_confirm_transaction(transaction)
            .await
            .context("Failed to send transaction")
    }
}
