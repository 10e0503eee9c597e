use super::{AccountKind, AccountLayout, decode_layout};
use crate::error::FetchError;
use borsh::{BorshDeserialize, BorshSerialize};
use clmm_liq_domain::MathError;
use clmm_liq_domain::value_objects::Price;
use solana_sdk::{account::Account, pubkey::Pubkey};

/// Leading fields of the pool state account, in on-chain order.
#[derive(BorshDeserialize, BorshSerialize, Debug, Clone)]
pub(crate) struct PoolStateLayout {
    #[allow(dead_code)]
    pub bump: u8,
    pub amm_config: [u8; 32],
    #[allow(dead_code)]
    pub owner: [u8; 32],
    pub token_mint_0: [u8; 32],
    pub token_mint_1: [u8; 32],
    pub token_vault_0: [u8; 32],
    pub token_vault_1: [u8; 32],
    pub observation_key: [u8; 32],
    pub mint_decimals_0: u8,
    pub mint_decimals_1: u8,
    pub tick_spacing: u16,
    pub liquidity: u128,
    pub sqrt_price_x64: u128,
    pub tick_current: i32,
}

impl AccountLayout for PoolStateLayout {
    const KIND: AccountKind = AccountKind::Pool;
    const DISCRIMINATOR: [u8; 8] = [247, 237, 227, 245, 215, 195, 222, 70];
}

/// Pool state as read at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    /// Config account holding the fee tier.
    pub amm_config: Pubkey,
    /// Mint of token 0.
    pub token_mint_0: Pubkey,
    /// Mint of token 1.
    pub token_mint_1: Pubkey,
    /// Pool-owned account holding token 0.
    pub token_vault_0: Pubkey,
    /// Pool-owned account holding token 1.
    pub token_vault_1: Pubkey,
    /// Price observation account, written on every liquidity change.
    pub observation_key: Pubkey,
    /// Decimals of token 0.
    pub mint_decimals_0: u8,
    /// Decimals of token 1.
    pub mint_decimals_1: u8,
    /// Only ticks that are multiples of this value can be initialized.
    pub tick_spacing: u16,
    /// Liquidity active at the current tick.
    pub liquidity: u128,
    /// Current sqrt price as a Q64.64 fixed-point number.
    pub sqrt_price_x64: u128,
    /// Tick that contains the current price.
    pub tick_current: i32,
}

impl PoolSnapshot {
    /// Decodes a pool state account owned by `program_id`.
    pub fn decode(address: &Pubkey, account: &Account, program_id: &Pubkey) -> Result<Self, FetchError> {
        let layout: PoolStateLayout = decode_layout(address, account, program_id)?;
        Ok(Self::from(layout))
    }

    /// Current price of token 0 in token 1.
    pub fn price(&self) -> Result<Price, MathError> {
        Price::from_sqrt_price_x64(self.sqrt_price_x64, self.mint_decimals_0, self.mint_decimals_1)
    }
}

impl From<PoolStateLayout> for PoolSnapshot {
    fn from(layout: PoolStateLayout) -> Self {
        Self {
            amm_config: Pubkey::new_from_array(layout.amm_config),
            token_mint_0: Pubkey::new_from_array(layout.token_mint_0),
            token_mint_1: Pubkey::new_from_array(layout.token_mint_1),
            token_vault_0: Pubkey::new_from_array(layout.token_vault_0),
            token_vault_1: Pubkey::new_from_array(layout.token_vault_1),
            observation_key: Pubkey::new_from_array(layout.observation_key),
            mint_decimals_0: layout.mint_decimals_0,
            mint_decimals_1: layout.mint_decimals_1,
            tick_spacing: layout.tick_spacing,
            liquidity: layout.liquidity,
            sqrt_price_x64: layout.sqrt_price_x64,
            tick_current: layout.tick_current,
        }
    }
}

#[cfg(test)]
impl From<&PoolSnapshot> for PoolStateLayout {
    fn from(snapshot: &PoolSnapshot) -> Self {
        Self {
            bump: 255,
            amm_config: snapshot.amm_config.to_bytes(),
            owner: [0u8; 32],
            token_mint_0: snapshot.token_mint_0.to_bytes(),
            token_mint_1: snapshot.token_mint_1.to_bytes(),
            token_vault_0: snapshot.token_vault_0.to_bytes(),
            token_vault_1: snapshot.token_vault_1.to_bytes(),
            observation_key: snapshot.observation_key.to_bytes(),
            mint_decimals_0: snapshot.mint_decimals_0,
            mint_decimals_1: snapshot.mint_decimals_1,
            tick_spacing: snapshot.tick_spacing,
            liquidity: snapshot.liquidity,
            sqrt_price_x64: snapshot.sqrt_price_x64,
            tick_current: snapshot.tick_current,
        }
    }
}
