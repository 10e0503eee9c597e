use super::{AccountKind, AccountLayout, decode_layout};
use crate::error::FetchError;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{account::Account, pubkey::Pubkey};

#[derive(BorshDeserialize, BorshSerialize, Debug, Clone)]
pub(crate) struct PersonalPositionLayout {
    #[allow(dead_code)]
    pub bump: u8,
    pub nft_mint: [u8; 32],
    pub pool_id: [u8; 32],
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,
    pub liquidity: u128,
    pub fee_growth_inside_0_last_x64: u128,
    pub fee_growth_inside_1_last_x64: u128,
    pub token_fees_owed_0: u64,
    pub token_fees_owed_1: u64,
}

impl AccountLayout for PersonalPositionLayout {
    const KIND: AccountKind = AccountKind::Position;
    const DISCRIMINATOR: [u8; 8] = [70, 111, 150, 126, 230, 15, 25, 117];
}

/// A liquidity provider's position, as read at one instant.
///
/// `tick_lower_index <= tick_upper_index` is expected but not enforced here;
/// the instruction builder rejects inverted ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSnapshot {
    /// Address the snapshot was read from.
    pub address: Pubkey,
    /// Mint of the NFT that proves ownership.
    pub nft_mint: Pubkey,
    /// Pool the position belongs to.
    pub pool_id: Pubkey,
    /// Lower tick of the range, inclusive.
    pub tick_lower_index: i32,
    /// Upper tick of the range, exclusive.
    pub tick_upper_index: i32,
    /// Liquidity currently provided by the position.
    pub liquidity: u128,
    pub fee_growth_inside_0_last_x64: u128,
    pub fee_growth_inside_1_last_x64: u128,
    /// Uncollected token 0 fees.
    pub token_fees_owed_0: u64,
    /// Uncollected token 1 fees.
    pub token_fees_owed_1: u64,
}

impl PositionSnapshot {
    /// Decodes a personal position account owned by `program_id`.
    pub fn decode(address: &Pubkey, account: &Account, program_id: &Pubkey) -> Result<Self, FetchError> {
        let layout: PersonalPositionLayout = decode_layout(address, account, program_id)?;
        Ok(Self {
            address: *address,
            nft_mint: Pubkey::new_from_array(layout.nft_mint),
            pool_id: Pubkey::new_from_array(layout.pool_id),
            tick_lower_index: layout.tick_lower_index,
            tick_upper_index: layout.tick_upper_index,
            liquidity: layout.liquidity,
            fee_growth_inside_0_last_x64: layout.fee_growth_inside_0_last_x64,
            fee_growth_inside_1_last_x64: layout.fee_growth_inside_1_last_x64,
            token_fees_owed_0: layout.token_fees_owed_0,
            token_fees_owed_1: layout.token_fees_owed_1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::encode_layout;
    use crate::accounts::pool_state::PoolStateLayout;

    #[test]
    fn test_decode_position_keeps_inverted_range() {
        let program_id = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let layout = PersonalPositionLayout {
            bump: 255,
            nft_mint: Pubkey::new_unique().to_bytes(),
            pool_id: pool.to_bytes(),
            tick_lower_index: 120,
            tick_upper_index: -120,
            liquidity: 42,
            fee_growth_inside_0_last_x64: 0,
            fee_growth_inside_1_last_x64: 0,
            token_fees_owed_0: 7,
            token_fees_owed_1: 9,
        };
        let account = encode_layout(&layout, &program_id);
        let address = Pubkey::new_unique();

        let position = PositionSnapshot::decode(&address, &account, &program_id).unwrap();
        assert_eq!(position.address, address);
        assert_eq!(position.pool_id, pool);
        assert_eq!(position.tick_lower_index, 120);
        assert_eq!(position.tick_upper_index, -120);
        assert_eq!(position.liquidity, 42);
        assert_eq!(position.token_fees_owed_1, 9);
    }

    #[test]
    fn test_pool_account_is_not_a_position() {
        let program_id = Pubkey::new_unique();
        let pool = PoolStateLayout {
            bump: 255,
            amm_config: [9; 32],
            owner: [9; 32],
            token_mint_0: [9; 32],
            token_mint_1: [9; 32],
            token_vault_0: [9; 32],
            token_vault_1: [9; 32],
            observation_key: [9; 32],
            mint_decimals_0: 9,
            mint_decimals_1: 6,
            tick_spacing: 10,
            liquidity: 1,
            sqrt_price_x64: 1 << 64,
            tick_current: 0,
        };
        let account = encode_layout(&pool, &program_id);

        let err = PositionSnapshot::decode(&Pubkey::new_unique(), &account, &program_id).unwrap_err();
        assert!(matches!(
            err,
            FetchError::Decode {
                kind: AccountKind::Position,
                ..
            }
        ));
    }
}
