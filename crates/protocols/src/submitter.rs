//! Signing and submission of instruction sets.

use crate::error::SubmitError;
use crate::rpc::RpcProvider;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Options applied to every submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitOptions {
    /// Simulate instead of sending. The returned signature is never broadcast.
    pub simulate: bool,
}

/// Signers of one transaction. The first entry pays the fee.
pub struct SignerSet<'a> {
    signers: Vec<&'a (dyn Signer + Send + Sync)>,
}

impl<'a> SignerSet<'a> {
    /// Authority first, then `extra`, keeping only the first signer per pubkey.
    pub fn assemble(authority: &'a (dyn Signer + Send + Sync), extra: &'a [Keypair]) -> Self {
        let mut signers: Vec<&'a (dyn Signer + Send + Sync)> = vec![authority];
        for keypair in extra {
            let pubkey = keypair.pubkey();
            if signers.iter().all(|signer| signer.pubkey() != pubkey) {
                signers.push(keypair);
            }
        }
        Self { signers }
    }

    /// Fee payer.
    pub fn payer(&self) -> Option<Pubkey> {
        self.signers.first().map(|signer| signer.pubkey())
    }

    /// Signer pubkeys in signing order.
    pub fn pubkeys(&self) -> Vec<Pubkey> {
        self.signers.iter().map(|signer| signer.pubkey()).collect()
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    /// Signs `instructions` as one transaction against `blockhash`.
    pub fn sign(
        &self,
        instructions: &[Instruction],
        blockhash: Hash,
    ) -> Result<Transaction, SubmitError> {
        let payer = self.payer().ok_or(SubmitError::NoSigners)?;
        let mut transaction = Transaction::new_with_payer(instructions, Some(&payer));
        transaction
            .try_sign(&self.signers, blockhash)
            .map_err(|e| SubmitError::Signing(e.to_string()))?;
        Ok(transaction)
    }
}

/// Submits an instruction set as one atomic transaction.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    async fn submit(
        &self,
        instructions: &[Instruction],
        signers: &SignerSet<'_>,
        options: &SubmitOptions,
    ) -> Result<Signature, SubmitError>;
}

/// [`TransactionSubmitter`] that sends through RPC and waits for confirmation.
pub struct RpcSubmitter {
    provider: Arc<RpcProvider>,
}

impl RpcSubmitter {
    pub fn new(provider: Arc<RpcProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl TransactionSubmitter for RpcSubmitter {
    async fn submit(
        &self,
        instructions: &[Instruction],
        signers: &SignerSet<'_>,
        options: &SubmitOptions,
    ) -> Result<Signature, SubmitError> {
        debug!(
            instructions = instructions.len(),
            signers = signers.len(),
            simulate = options.simulate,
            "Submitting transaction"
        );

        let blockhash = self
            .provider
            .get_latest_blockhash()
            .await
            .map_err(SubmitError::Blockhash)?;
        let transaction = signers.sign(instructions, blockhash)?;

        if options.simulate {
            let outcome = self
                .provider
                .simulate_transaction(&transaction)
                .await
                .map_err(SubmitError::Send)?;
            if let Some(err) = outcome.err {
                warn!(error = %err, "Simulation failed");
                return Err(SubmitError::Simulation {
                    err,
                    logs: outcome.logs,
                });
            }
            info!(units_consumed = ?outcome.units_consumed, "Simulation successful");
            return transaction
                .signatures
                .first()
                .copied()
                .ok_or(SubmitError::NoSigners);
        }

        self.provider
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(SubmitError::Send)
    }
}
