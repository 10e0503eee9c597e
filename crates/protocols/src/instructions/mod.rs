//! Instruction builders for the AMM program.

/// `increase_liquidity` builder.
pub mod increase_liquidity;

pub use increase_liquidity::{IncreaseLiquidityBuilder, LiquidityQuote};

use solana_sdk::{instruction::Instruction, signature::Keypair};

/// Instructions for one request plus the extra signers they need.
///
/// The authority is never part of `signers`; the caller adds it.
#[derive(Debug)]
pub struct BuildResult {
    /// Instructions to submit as one transaction, in order.
    pub instructions: Vec<Instruction>,
    /// Ephemeral signers, such as wrapped SOL accounts.
    pub signers: Vec<Keypair>,
    /// Token bounds encoded into the instruction.
    pub quote: LiquidityQuote,
}
