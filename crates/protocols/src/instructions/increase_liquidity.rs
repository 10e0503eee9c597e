//! `increase_liquidity` for an existing personal position.

use super::BuildResult;
use crate::accounts::PositionSnapshot;
use crate::constants::{NATIVE_MINT, TOKEN_ACCOUNT_LEN, TOKEN_PROGRAM_ID};
use crate::error::BuildError;
use crate::pda;
use crate::pool::AmmPool;
use clmm_liq_domain::MathError;
use clmm_liq_domain::math::liquidity_math::{TokenQuote, get_amounts_for_liquidity};
use clmm_liq_domain::math::tick_math::{get_sqrt_price_at_tick, is_valid_tick};
use clmm_liq_domain::value_objects::Slippage;
use serde::{Deserialize, Serialize};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
};
use solana_system_interface::instruction::create_account;
use spl_associated_token_account::get_associated_token_address;
use spl_token::instruction::{close_account, initialize_account};
use tracing::debug;

/// Anchor discriminator of `increase_liquidity`, `sha256("global:increase_liquidity")[..8]`.
pub const INCREASE_LIQUIDITY_DISCRIMINATOR: [u8; 8] = [46, 156, 243, 118, 13, 205, 251, 178];

/// Token bounds for both sides of a liquidity increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityQuote {
    /// Bounds for token 0, debited from `token_account_0`.
    pub token_0: TokenQuote,
    /// Bounds for token 1, debited from `token_account_1`.
    pub token_1: TokenQuote,
}

/// Builds the instruction set that adds liquidity to a position.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncreaseLiquidityBuilder;

/// Owner-side token account for one pool token.
struct FundingAccount {
    address: Pubkey,
    /// Ephemeral account that wraps native SOL for this transaction only.
    wrapped: Option<Keypair>,
}

impl FundingAccount {
    fn for_mint(authority: &Pubkey, mint: &Pubkey) -> Self {
        if *mint == NATIVE_MINT {
            let keypair = Keypair::new();
            return Self {
                address: keypair.pubkey(),
                wrapped: Some(keypair),
            };
        }
        Self {
            address: get_associated_token_address(authority, mint),
            wrapped: None,
        }
    }
}

impl IncreaseLiquidityBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Quotes `liquidity_delta` at the pool's current price and encodes the
    /// instructions that add it to `position`.
    ///
    /// # Errors
    /// `ZeroLiquidity` and `InvalidRange` for bad inputs, `SlippageExceeded`
    /// when the rounded-up debit of either token is outside the tolerance.
    pub async fn build(
        &self,
        authority: &Pubkey,
        pool: &AmmPool,
        position: &PositionSnapshot,
        liquidity_delta: u128,
        slippage: Slippage,
    ) -> Result<BuildResult, BuildError> {
        let tick_lower = position.tick_lower_index;
        let tick_upper = position.tick_upper_index;

        if liquidity_delta == 0 {
            return Err(BuildError::ZeroLiquidity);
        }
        if tick_lower > tick_upper || !is_valid_tick(tick_lower) || !is_valid_tick(tick_upper) {
            return Err(BuildError::InvalidRange {
                tick_lower,
                tick_upper,
            });
        }

        let quote = quote(pool, tick_lower, tick_upper, liquidity_delta, slippage)?;
        debug!(
            pool = %pool.address(),
            tick_lower,
            tick_upper,
            liquidity_delta,
            required_0 = quote.token_0.required,
            required_1 = quote.token_1.required,
            "Quoted liquidity increase"
        );

        let state = pool.pool_state();
        let account_0 = FundingAccount::for_mint(authority, &state.token_mint_0);
        let account_1 = FundingAccount::for_mint(authority, &state.token_mint_1);

        let program_id = *pool.ctx().program_id();
        let pool_id = *pool.address();
        let accounts = vec![
            AccountMeta::new_readonly(*authority, true), // payer
            AccountMeta::new_readonly(state.amm_config, false), // amm_config
            AccountMeta::new(position.address, false), // personal_position
            AccountMeta::new(pool_id, false), // pool_state
            AccountMeta::new(
                pda::protocol_position(&program_id, &pool_id, tick_lower, tick_upper),
                false,
            ), // protocol_position
            AccountMeta::new(pda::tick_state(&program_id, &pool_id, tick_lower), false),
            AccountMeta::new(pda::tick_state(&program_id, &pool_id, tick_upper), false),
            AccountMeta::new(
                pda::tick_bitmap(&program_id, &pool_id, tick_lower, state.tick_spacing),
                false,
            ),
            AccountMeta::new(
                pda::tick_bitmap(&program_id, &pool_id, tick_upper, state.tick_spacing),
                false,
            ),
            AccountMeta::new(account_0.address, false), // token_account_0
            AccountMeta::new(account_1.address, false), // token_account_1
            AccountMeta::new(state.token_vault_0, false),
            AccountMeta::new(state.token_vault_1, false),
            AccountMeta::new(state.observation_key, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ];

        let mut data = Vec::with_capacity(40);
        data.extend_from_slice(&INCREASE_LIQUIDITY_DISCRIMINATOR);
        data.extend_from_slice(&quote.token_0.required.to_le_bytes()); // amount_0_desired
        data.extend_from_slice(&quote.token_1.required.to_le_bytes()); // amount_1_desired
        data.extend_from_slice(&quote.token_0.minimum.to_le_bytes());
        data.extend_from_slice(&quote.token_1.minimum.to_le_bytes());

        let increase_ix = Instruction {
            program_id,
            accounts,
            data,
        };

        let mut instructions = Vec::with_capacity(4);
        let mut signers = Vec::new();
        let mut closes = Vec::new();
        for (account, required) in [
            (account_0, quote.token_0.required),
            (account_1, quote.token_1.required),
        ] {
            let Some(keypair) = account.wrapped else {
                continue;
            };
            let rent = pool
                .state_fetcher()
                .minimum_balance_for_rent_exemption(TOKEN_ACCOUNT_LEN)
                .await?;
            let lamports = rent
                .checked_add(required)
                .ok_or(MathError::Overflow("wrapped SOL lamports"))?;
            let wrapped = keypair.pubkey();

            debug!(account = %wrapped, lamports, "Wrapping native SOL");
            instructions.push(create_account(
                authority,
                &wrapped,
                lamports,
                TOKEN_ACCOUNT_LEN as u64,
                &TOKEN_PROGRAM_ID,
            ));
            instructions.push(
                initialize_account(&TOKEN_PROGRAM_ID, &wrapped, &NATIVE_MINT, authority)
                    .map_err(|e| BuildError::TokenInstruction(e.to_string()))?,
            );
            closes.push(
                close_account(&TOKEN_PROGRAM_ID, &wrapped, authority, authority, &[])
                    .map_err(|e| BuildError::TokenInstruction(e.to_string()))?,
            );
            signers.push(keypair);
        }
        instructions.push(increase_ix);
        instructions.extend(closes);

        Ok(BuildResult {
            instructions,
            signers,
            quote,
        })
    }
}

fn quote(
    pool: &AmmPool,
    tick_lower: i32,
    tick_upper: i32,
    liquidity_delta: u128,
    slippage: Slippage,
) -> Result<LiquidityQuote, BuildError> {
    let amounts = get_amounts_for_liquidity(
        pool.pool_state().sqrt_price_x64,
        get_sqrt_price_at_tick(tick_lower)?,
        get_sqrt_price_at_tick(tick_upper)?,
        liquidity_delta,
    )?;

    let token_0 = TokenQuote::new(&amounts.amount_0, slippage)?;
    let token_1 = TokenQuote::new(&amounts.amount_1, slippage)?;
    for (token, quote) in [(0u8, &token_0), (1u8, &token_1)] {
        if !quote.within_tolerance() {
            return Err(BuildError::SlippageExceeded {
                token,
                required: quote.required,
                maximum: quote.maximum,
            });
        }
    }

    Ok(LiquidityQuote { token_0, token_1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{ConfigSnapshot, PoolSnapshot};
    use crate::context::ChainContext;
    use crate::fetcher::InMemoryStateFetcher;
    use crate::submitter::SubmitOptions;
    use clmm_liq_domain::math::tick_math::Q64;
    use std::sync::Arc;

    const RENT: u64 = 2_039_280;

    fn pool_with_mint_0(mint_0: Pubkey) -> AmmPool {
        let program_id = Pubkey::new_unique();
        let ctx = Arc::new(ChainContext::new(program_id, SubmitOptions::default()));

        let pool_state = PoolSnapshot {
            amm_config: Pubkey::new_unique(),
            token_mint_0: mint_0,
            token_mint_1: Pubkey::new_unique(),
            token_vault_0: Pubkey::new_unique(),
            token_vault_1: Pubkey::new_unique(),
            observation_key: Pubkey::new_unique(),
            mint_decimals_0: 9,
            mint_decimals_1: 9,
            tick_spacing: 10,
            liquidity: 1_000_000,
            sqrt_price_x64: Q64,
            tick_current: 0,
        };
        let amm_config = ConfigSnapshot {
            index: 0,
            protocol_fee_rate: 120_000,
            trade_fee_rate: 2_500,
            tick_spacing: 10,
        };

        AmmPool::new(
            ctx,
            Pubkey::new_unique(),
            pool_state,
            amm_config,
            Arc::new(InMemoryStateFetcher::new(RENT)),
        )
    }

    fn position(pool: &AmmPool, tick_lower: i32, tick_upper: i32) -> PositionSnapshot {
        PositionSnapshot {
            address: Pubkey::new_unique(),
            nft_mint: Pubkey::new_unique(),
            pool_id: *pool.address(),
            tick_lower_index: tick_lower,
            tick_upper_index: tick_upper,
            liquidity: 10_000,
            fee_growth_inside_0_last_x64: 0,
            fee_growth_inside_1_last_x64: 0,
            token_fees_owed_0: 0,
            token_fees_owed_1: 0,
        }
    }

    #[test]
    fn test_discriminator_matches_anchor_sighash() {
        use sha2::{Digest, Sha256};

        let hash = Sha256::digest(b"global:increase_liquidity");
        assert_eq!(&hash[..8], &INCREASE_LIQUIDITY_DISCRIMINATOR);
    }

    #[tokio::test]
    async fn test_build_inside_range() {
        let pool = pool_with_mint_0(Pubkey::new_unique());
        let position = position(&pool, -100, 100);
        let authority = Pubkey::new_unique();

        let result = IncreaseLiquidityBuilder::new()
            .build(&authority, &pool, &position, 1000, Slippage::from_bps(50))
            .await
            .unwrap();

        assert!(result.signers.is_empty());
        assert_eq!(result.instructions.len(), 1);
        assert_eq!(result.quote.token_0.required, 5);
        assert_eq!(result.quote.token_1.required, 5);

        let ix = &result.instructions[0];
        assert_eq!(ix.program_id, *pool.ctx().program_id());
        assert_eq!(ix.accounts.len(), 15);
        assert_eq!(ix.accounts[0].pubkey, authority);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.accounts[2].pubkey, position.address);
        assert_eq!(ix.accounts[3].pubkey, *pool.address());
        assert_eq!(
            ix.accounts[9].pubkey,
            get_associated_token_address(&authority, &pool.pool_state().token_mint_0)
        );
        assert_eq!(ix.accounts[14].pubkey, TOKEN_PROGRAM_ID);

        assert_eq!(ix.data.len(), 40);
        assert_eq!(&ix.data[..8], &INCREASE_LIQUIDITY_DISCRIMINATOR);
        assert_eq!(&ix.data[8..16], &5u64.to_le_bytes());
        assert_eq!(&ix.data[16..24], &5u64.to_le_bytes());
        assert_eq!(&ix.data[24..32], &4u64.to_le_bytes());
        assert_eq!(&ix.data[32..40], &4u64.to_le_bytes());
    }

    #[tokio::test]
    async fn test_zero_slippage_with_fractional_amount_fails() {
        let pool = pool_with_mint_0(Pubkey::new_unique());
        let position = position(&pool, -100, 100);

        let err = IncreaseLiquidityBuilder::new()
            .build(&Pubkey::new_unique(), &pool, &position, 1000, Slippage::from_bps(0))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BuildError::SlippageExceeded {
                token: 0,
                required: 5,
                maximum: 4
            }
        ));
    }

    #[tokio::test]
    async fn test_inverted_range_rejected() {
        let pool = pool_with_mint_0(Pubkey::new_unique());
        let position = position(&pool, 100, -100);

        let err = IncreaseLiquidityBuilder::new()
            .build(&Pubkey::new_unique(), &pool, &position, 1000, Slippage::from_bps(50))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BuildError::InvalidRange {
                tick_lower: 100,
                tick_upper: -100
            }
        ));
    }

    #[tokio::test]
    async fn test_out_of_domain_tick_rejected() {
        let pool = pool_with_mint_0(Pubkey::new_unique());
        let position = position(&pool, -100, 500_000);

        let err = IncreaseLiquidityBuilder::new()
            .build(&Pubkey::new_unique(), &pool, &position, 1000, Slippage::from_bps(50))
            .await
            .unwrap_err();

        assert!(matches!(err, BuildError::InvalidRange { .. }));
    }

    #[tokio::test]
    async fn test_zero_liquidity_rejected() {
        let pool = pool_with_mint_0(Pubkey::new_unique());
        let position = position(&pool, -100, 100);

        let err = IncreaseLiquidityBuilder::new()
            .build(&Pubkey::new_unique(), &pool, &position, 0, Slippage::from_bps(50))
            .await
            .unwrap_err();

        assert!(matches!(err, BuildError::ZeroLiquidity));
    }

    #[tokio::test]
    async fn test_native_mint_wraps_through_ephemeral_account() {
        let pool = pool_with_mint_0(NATIVE_MINT);
        let position = position(&pool, -100, 100);
        let authority = Pubkey::new_unique();

        let result = IncreaseLiquidityBuilder::new()
            .build(&authority, &pool, &position, 1000, Slippage::from_bps(50))
            .await
            .unwrap();

        assert_eq!(result.signers.len(), 1);
        assert_eq!(result.instructions.len(), 4);

        let wrapped = result.signers[0].pubkey();
        let create = &result.instructions[0];
        assert_eq!(create.program_id, solana_system_interface::program::ID);
        assert_eq!(create.accounts[1].pubkey, wrapped);
        assert_eq!(&create.data[4..12], &(RENT + 5).to_le_bytes());

        assert_eq!(result.instructions[1].program_id, TOKEN_PROGRAM_ID);
        assert_eq!(result.instructions[1].accounts[1].pubkey, NATIVE_MINT);

        let increase = &result.instructions[2];
        assert_eq!(increase.accounts[9].pubkey, wrapped);

        let close = &result.instructions[3];
        assert_eq!(close.program_id, TOKEN_PROGRAM_ID);
        assert_eq!(close.accounts[0].pubkey, wrapped);
        assert_eq!(close.accounts[1].pubkey, authority);
        assert!(close.accounts[2].is_signer);
    }
}
