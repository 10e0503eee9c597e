//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use clmm_liq_protocols::prelude::*;
//! ```

// Accounts
pub use crate::accounts::{AccountKind, ConfigSnapshot, PoolSnapshot, PositionSnapshot};

// Context
pub use crate::context::ChainContext;

// Errors
pub use crate::error::{BuildError, FetchError, SubmitError};

// Fetchers
pub use crate::fetcher::{InMemoryStateFetcher, RpcStateFetcher, StateFetcher};

// Instructions
pub use crate::instructions::{BuildResult, IncreaseLiquidityBuilder, LiquidityQuote};

// Pool
pub use crate::pool::AmmPool;

// RPC
pub use crate::rpc::{RpcProvider, SimulationOutcome};

// Submission
pub use crate::submitter::{RpcSubmitter, SignerSet, SubmitOptions, TransactionSubmitter};
