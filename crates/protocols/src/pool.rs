//! Aggregated view over a pool and the configuration it references.

use crate::accounts::{ConfigSnapshot, PoolSnapshot};
use crate::context::ChainContext;
use crate::fetcher::StateFetcher;
use clmm_liq_domain::MathError;
use clmm_liq_domain::value_objects::Price;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

/// A pool ready for instruction building.
pub struct AmmPool {
    ctx: Arc<ChainContext>,
    address: Pubkey,
    pool_state: PoolSnapshot,
    amm_config: ConfigSnapshot,
    state_fetcher: Arc<dyn StateFetcher>,
}

impl AmmPool {
    /// Assembles a pool from snapshots that were already fetched.
    pub fn new(
        ctx: Arc<ChainContext>,
        address: Pubkey,
        pool_state: PoolSnapshot,
        amm_config: ConfigSnapshot,
        state_fetcher: Arc<dyn StateFetcher>,
    ) -> Self {
        Self {
            ctx,
            address,
            pool_state,
            amm_config,
            state_fetcher,
        }
    }

    pub fn ctx(&self) -> &Arc<ChainContext> {
        &self.ctx
    }

    pub fn address(&self) -> &Pubkey {
        &self.address
    }

    pub fn pool_state(&self) -> &PoolSnapshot {
        &self.pool_state
    }

    pub fn amm_config(&self) -> &ConfigSnapshot {
        &self.amm_config
    }

    pub fn state_fetcher(&self) -> &Arc<dyn StateFetcher> {
        &self.state_fetcher
    }

    /// Current price of token 0 in token 1.
    pub fn token_price(&self) -> Result<Price, MathError> {
        self.pool_state.price()
    }
}
