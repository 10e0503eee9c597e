use super::{AccountKind, AccountLayout, decode_layout};
use crate::error::FetchError;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{account::Account, pubkey::Pubkey};

#[derive(BorshDeserialize, BorshSerialize, Debug, Clone)]
pub(crate) struct AmmConfigLayout {
    #[allow(dead_code)]
    pub bump: u8,
    pub index: u16,
    #[allow(dead_code)]
    pub owner: [u8; 32],
    pub protocol_fee_rate: u32,
    pub trade_fee_rate: u32,
    pub tick_spacing: u16,
}

impl AccountLayout for AmmConfigLayout {
    const KIND: AccountKind = AccountKind::AmmConfig;
    const DISCRIMINATOR: [u8; 8] = [218, 244, 33, 104, 203, 203, 43, 111];
}

/// Fee tier and spacing shared by the pools that reference it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot {
    /// Index the config was created with.
    pub index: u16,
    /// Protocol share of trade fees, in hundredths of a bip.
    pub protocol_fee_rate: u32,
    /// Trade fee, in hundredths of a bip.
    pub trade_fee_rate: u32,
    /// Tick spacing of pools created under this config.
    pub tick_spacing: u16,
}

impl ConfigSnapshot {
    /// Decodes a config account owned by `program_id`.
    pub fn decode(address: &Pubkey, account: &Account, program_id: &Pubkey) -> Result<Self, FetchError> {
        let layout: AmmConfigLayout = decode_layout(address, account, program_id)?;
        Ok(Self {
            index: layout.index,
            protocol_fee_rate: layout.protocol_fee_rate,
            trade_fee_rate: layout.trade_fee_rate,
            tick_spacing: layout.tick_spacing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::encode_layout;

    #[test]
    fn test_decode_amm_config() {
        let program_id = Pubkey::new_unique();
        let layout = AmmConfigLayout {
            bump: 254,
            index: 3,
            owner: Pubkey::new_unique().to_bytes(),
            protocol_fee_rate: 120_000,
            trade_fee_rate: 2_500,
            tick_spacing: 60,
        };
        let account = encode_layout(&layout, &program_id);

        let config = ConfigSnapshot::decode(&Pubkey::new_unique(), &account, &program_id).unwrap();
        assert_eq!(config.index, 3);
        assert_eq!(config.protocol_fee_rate, 120_000);
        assert_eq!(config.trade_fee_rate, 2_500);
        assert_eq!(config.tick_spacing, 60);
    }
}
