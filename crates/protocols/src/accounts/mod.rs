//! Program account layouts.
//!
//! Raw account bytes are decoded exactly once, at the fetch boundary, into the
//! typed snapshots below. Only the leading fields the client needs are
//! declared; trailing bytes are ignored.

/// Pool configuration account.
pub mod amm_config;
/// Personal (NFT-backed) position account.
pub mod personal_position;
/// Pool state account.
pub mod pool_state;

pub use amm_config::ConfigSnapshot;
pub use personal_position::PositionSnapshot;
pub use pool_state::PoolSnapshot;

use crate::constants::ACCOUNT_DISCRIMINATOR_LEN;
use crate::error::FetchError;
use borsh::BorshDeserialize;
use solana_sdk::{account::Account, pubkey::Pubkey};
use std::fmt;

/// Kind of program account, used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Pool,
    AmmConfig,
    Position,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool => write!(f, "pool"),
            Self::AmmConfig => write!(f, "amm config"),
            Self::Position => write!(f, "position"),
        }
    }
}

/// On-chain layout of one program account kind.
///
/// Only the leading fields are declared. `DISCRIMINATOR` is the Anchor tag,
/// `sha256("account:<Name>")[..8]`, that every account of this kind starts with.
pub(crate) trait AccountLayout: BorshDeserialize {
    const KIND: AccountKind;
    const DISCRIMINATOR: [u8; ACCOUNT_DISCRIMINATOR_LEN];
}

/// Checks ownership and the discriminator, then decodes the layout prefix.
pub(crate) fn decode_layout<L: AccountLayout>(
    address: &Pubkey,
    account: &Account,
    program_id: &Pubkey,
) -> Result<L, FetchError> {
    let kind = L::KIND;
    if account.owner != *program_id {
        return Err(FetchError::WrongOwner {
            kind,
            address: *address,
            owner: account.owner,
        });
    }

    let decode_error = |reason: String| FetchError::Decode {
        kind,
        address: *address,
        reason,
    };

    let (discriminator, mut body) = account
        .data
        .split_at_checked(ACCOUNT_DISCRIMINATOR_LEN)
        .ok_or_else(|| decode_error(format!("account data is {} bytes", account.data.len())))?;
    if discriminator != L::DISCRIMINATOR {
        return Err(decode_error(format!(
            "discriminator {discriminator:?} is not a {kind} account"
        )));
    }

    L::deserialize(&mut body).map_err(|e| decode_error(e.to_string()))
}

#[cfg(test)]
pub(crate) fn encode_layout<L: AccountLayout + borsh::BorshSerialize>(
    layout: &L,
    program_id: &Pubkey,
) -> Account {
    let mut data = L::DISCRIMINATOR.to_vec();
    data.extend(borsh::to_vec(layout).expect("layout serializes"));
    // trailing fields the client does not declare
    data.extend([0u8; 64]);
    Account {
        lamports: 1_000_000,
        data,
        owner: *program_id,
        executable: false,
        rent_epoch: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    fn account_discriminator(name: &str) -> [u8; ACCOUNT_DISCRIMINATOR_LEN] {
        let hash = Sha256::digest(format!("account:{name}").as_bytes());
        let mut discriminator = [0u8; ACCOUNT_DISCRIMINATOR_LEN];
        discriminator.copy_from_slice(&hash[..ACCOUNT_DISCRIMINATOR_LEN]);
        discriminator
    }

    #[test]
    fn test_discriminators_match_anchor_account_names() {
        assert_eq!(
            pool_state::PoolStateLayout::DISCRIMINATOR,
            account_discriminator("PoolState")
        );
        assert_eq!(
            amm_config::AmmConfigLayout::DISCRIMINATOR,
            account_discriminator("AmmConfig")
        );
        assert_eq!(
            personal_position::PersonalPositionLayout::DISCRIMINATOR,
            account_discriminator("PersonalPositionState")
        );
    }
}
