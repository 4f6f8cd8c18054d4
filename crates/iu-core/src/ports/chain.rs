use alloy_primitives::{Address, U256};
use async_trait::async_trait;

/// Read-only access to the chain node. Values are smallest units.
#[async_trait]
pub trait ChainReaderPort: Send + Sync {
    async fn native_balance(&self, owner: Address) -> anyhow::Result<U256>;

    /// ERC-20 `balanceOf(owner)` on `token`.
    async fn token_balance(&self, token: Address, owner: Address) -> anyhow::Result<U256>;
}
