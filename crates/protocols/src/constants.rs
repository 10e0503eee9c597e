//! Program ids and account sizes used by the instruction builders.

pub use spl_token::ID as TOKEN_PROGRAM_ID;
pub use spl_token::native_mint::ID as NATIVE_MINT;

/// Size of an SPL token account.
pub const TOKEN_ACCOUNT_LEN: usize = 165;

/// Size of the Anchor account discriminator that prefixes program accounts.
pub const ACCOUNT_DISCRIMINATOR_LEN: usize = 8;
