//! On-chain access for the concentrated-liquidity AMM program.
//!
//! This crate provides:
//! - RPC plumbing and typed account snapshots
//! - Program-derived address derivation
//! - The `increase_liquidity` instruction builder
//! - Transaction signing and submission

/// Prelude module for convenient imports.
pub mod prelude;

/// Program account layouts and snapshots.
pub mod accounts;
/// Program ids and account sizes.
pub mod constants;
/// Shared chain context.
pub mod context;
/// Error types.
pub mod error;
/// Account fetchers.
pub mod fetcher;
/// Instruction builders.
pub mod instructions;
/// Program-derived addresses.
pub mod pda;
/// Aggregated pool view.
pub mod pool;
/// RPC provider.
pub mod rpc;
/// Transaction submission.
pub mod submitter;
