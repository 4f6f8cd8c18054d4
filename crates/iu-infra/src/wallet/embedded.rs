use std::sync::Arc;

use async_trait::async_trait;
use iu_core::ports::ActiveWalletPort;
use iu_core::{Address, SubmissionId, TransactionRequest, WalletKind};
use serde_json::json;
use tracing::{debug, info, warn};

use super::hex_quantity;
use crate::rpc::JsonRpcClient;

/// Provider-managed key that signs and broadcasts its own transactions.
pub struct EmbeddedWallet {
    client: Arc<JsonRpcClient>,
    address: Address,
}

impl EmbeddedWallet {
    pub fn new(client: Arc<JsonRpcClient>, address: Address) -> Self {
        Self { client, address }
    }
}

#[async_trait]
impl ActiveWalletPort for EmbeddedWallet {
    fn kind(&self) -> WalletKind {
        WalletKind::Embedded
    }

    fn address(&self) -> Address {
        self.address
    }

    /// Ready once the signer exposes this address.
    async fn is_ready(&self) -> bool {
        match self
            .client
            .call::<_, Vec<Address>>("eth_accounts", json!([]))
            .await
        {
            Ok(accounts) => {
                let ready = accounts.contains(&self.address);
                debug!(ready, accounts = accounts.len(), "embedded wallet readiness");
                ready
            }
            Err(err) => {
                warn!(error = %err, "embedded wallet readiness check failed");
                false
            }
        }
    }

    async fn send_transaction(&self, request: TransactionRequest) -> anyhow::Result<SubmissionId> {
        let tx = json!({
            "from": self.address,
            "to": request.to,
            "data": request.data,
            "value": hex_quantity(request.value),
        });
        let hash: String = self.client.call("eth_sendTransaction", json!([tx])).await?;
        info!(%hash, "transaction broadcast");
        Ok(SubmissionId(hash))
    }
}
