//! Typed access to on-chain program accounts.

use crate::accounts::{AccountKind, ConfigSnapshot, PoolSnapshot, PositionSnapshot};
use crate::error::FetchError;
use crate::rpc::RpcProvider;
use async_trait::async_trait;
use solana_sdk::{account::Account, pubkey::Pubkey};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Resolves account addresses to decoded snapshots.
#[async_trait]
pub trait StateFetcher: Send + Sync {
    /// Fetches a pool state account.
    async fn fetch_pool(&self, address: &Pubkey) -> Result<PoolSnapshot, FetchError>;

    /// Fetches a pool configuration account.
    async fn fetch_config(&self, address: &Pubkey) -> Result<ConfigSnapshot, FetchError>;

    /// Fetches a personal position account.
    async fn fetch_position(&self, address: &Pubkey) -> Result<PositionSnapshot, FetchError>;

    /// Lamports an account of `data_len` bytes needs to be rent exempt.
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64, FetchError>;
}

/// [`StateFetcher`] backed by RPC reads.
pub struct RpcStateFetcher {
    provider: Arc<RpcProvider>,
    program_id: Pubkey,
}

impl RpcStateFetcher {
    /// Creates a fetcher that only accepts accounts owned by `program_id`.
    pub fn new(provider: Arc<RpcProvider>, program_id: Pubkey) -> Self {
        Self {
            provider,
            program_id,
        }
    }

    async fn fetch_account(&self, kind: AccountKind, address: &Pubkey) -> Result<Account, FetchError> {
        debug!(kind = %kind, address = %address, "Fetching account");
        self.provider
            .get_account(address)
            .await?
            .ok_or(FetchError::NotFound {
                kind,
                address: *address,
            })
    }
}

#[async_trait]
impl StateFetcher for RpcStateFetcher {
    async fn fetch_pool(&self, address: &Pubkey) -> Result<PoolSnapshot, FetchError> {
        let account = self.fetch_account(AccountKind::Pool, address).await?;
        PoolSnapshot::decode(address, &account, &self.program_id)
    }

    async fn fetch_config(&self, address: &Pubkey) -> Result<ConfigSnapshot, FetchError> {
        let account = self.fetch_account(AccountKind::AmmConfig, address).await?;
        ConfigSnapshot::decode(address, &account, &self.program_id)
    }

    async fn fetch_position(&self, address: &Pubkey) -> Result<PositionSnapshot, FetchError> {
        let account = self.fetch_account(AccountKind::Position, address).await?;
        PositionSnapshot::decode(address, &account, &self.program_id)
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64, FetchError> {
        Ok(self
            .provider
            .get_minimum_balance_for_rent_exemption(data_len)
            .await?)
    }
}

/// [`StateFetcher`] over fixed snapshots, recording every lookup in order.
///
/// Useful for offline dry runs and tests.
pub struct InMemoryStateFetcher {
    pools: HashMap<Pubkey, PoolSnapshot>,
    configs: HashMap<Pubkey, ConfigSnapshot>,
    positions: HashMap<Pubkey, PositionSnapshot>,
    rent_exempt_lamports: u64,
    lookups: RwLock<Vec<(AccountKind, Pubkey)>>,
}

impl InMemoryStateFetcher {
    /// Creates an empty store.
    pub fn new(rent_exempt_lamports: u64) -> Self {
        Self {
            pools: HashMap::new(),
            configs: HashMap::new(),
            positions: HashMap::new(),
            rent_exempt_lamports,
            lookups: RwLock::new(Vec::new()),
        }
    }

    /// Adds a pool snapshot.
    #[must_use]
    pub fn with_pool(mut self, address: Pubkey, pool: PoolSnapshot) -> Self {
        self.pools.insert(address, pool);
        self
    }

    /// Adds a config snapshot.
    #[must_use]
    pub fn with_config(mut self, address: Pubkey, config: ConfigSnapshot) -> Self {
        self.configs.insert(address, config);
        self
    }

    /// Adds a position snapshot.
    #[must_use]
    pub fn with_position(mut self, address: Pubkey, position: PositionSnapshot) -> Self {
        self.positions.insert(address, position);
        self
    }

    /// Every lookup made so far, in call order.
    pub async fn lookups(&self) -> Vec<(AccountKind, Pubkey)> {
        self.lookups.read().await.clone()
    }

    async fn lookup<T: Clone>(
        &self,
        kind: AccountKind,
        store: &HashMap<Pubkey, T>,
        address: &Pubkey,
    ) -> Result<T, FetchError> {
        self.lookups.write().await.push((kind, *address));
        store.get(address).cloned().ok_or(FetchError::NotFound {
            kind,
            address: *address,
        })
    }
}

#[async_trait]
impl StateFetcher for InMemoryStateFetcher {
    async fn fetch_pool(&self, address: &Pubkey) -> Result<PoolSnapshot, FetchError> {
        self.lookup(AccountKind::Pool, &self.pools, address).await
    }

    async fn fetch_config(&self, address: &Pubkey) -> Result<ConfigSnapshot, FetchError> {
        self.lookup(AccountKind::AmmConfig, &self.configs, address).await
    }

    async fn fetch_position(&self, address: &Pubkey) -> Result<PositionSnapshot, FetchError> {
        self.lookup(AccountKind::Position, &self.positions, address).await
    }

    async fn minimum_balance_for_rent_exemption(&self, _data_len: usize) -> Result<u64, FetchError> {
        Ok(self.rent_exempt_lamports)
    }
}
