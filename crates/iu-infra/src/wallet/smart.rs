use std::sync::Arc;

use async_trait::async_trait;
use iu_core::ports::ActiveWalletPort;
use iu_core::{Address, SubmissionId, TransactionRequest, WalletKind};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::hex_quantity;
use crate::rpc::{parse_quantity, JsonRpcClient};

/// ERC-7677 paymaster service attached to relayed calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sponsorship {
    pub url: String,
    pub policy_id: Option<String>,
}

/// Contract wallet whose calls go through an EIP-5792 relayer.
pub struct SmartWallet {
    relayer: Arc<JsonRpcClient>,
    address: Address,
    chain_id: u64,
    sponsorship: Option<Sponsorship>,
}

/// `wallet_sendCalls` returns a bare id in early drafts and `{ id }` since 2.0.
#[derive(Deserialize)]
#[serde(untagged)]
enum SendCallsResult {
    Id(String),
    Object { id: String },
}

impl SmartWallet {
    pub fn new(
        relayer: Arc<JsonRpcClient>,
        address: Address,
        chain_id: u64,
        sponsorship: Option<Sponsorship>,
    ) -> Self {
        Self {
            relayer,
            address,
            chain_id,
            sponsorship,
        }
    }

    fn capabilities(&self) -> Value {
        match &self.sponsorship {
            Some(sponsorship) => {
                let mut service = json!({ "url": sponsorship.url });
                if let Some(policy_id) = &sponsorship.policy_id {
                    service["context"] = json!({ "policyId": policy_id });
                }
                json!({ "paymasterService": service })
            }
            None => json!({}),
        }
    }
}

#[async_trait]
impl ActiveWalletPort for SmartWallet {
    fn kind(&self) -> WalletKind {
        WalletKind::Smart
    }

    fn address(&self) -> Address {
        self.address
    }

    /// Ready once the relayer answers for the configured chain.
    async fn is_ready(&self) -> bool {
        let raw = match self.relayer.call::<_, String>("eth_chainId", json!([])).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "relayer readiness check failed");
                return false;
            }
        };
        match parse_quantity("eth_chainId", &raw) {
            Ok(chain_id) => {
                let ready = chain_id == iu_core::U256::from(self.chain_id);
                debug!(ready, %chain_id, expected = self.chain_id, "smart wallet readiness");
                ready
            }
            Err(err) => {
                warn!(error = %err, "relayer returned an unreadable chain id");
                false
            }
        }
    }

    async fn send_transaction(&self, request: TransactionRequest) -> anyhow::Result<SubmissionId> {
        let params = json!({
            "version": "2.0.0",
            "chainId": format!("0x{:x}", self.chain_id),
            "from": self.address,
            "atomicRequired": true,
            "calls": [{
                "to": request.to,
                "data": request.data,
                "value": hex_quantity(request.value),
            }],
            "capabilities": self.capabilities(),
        });
        let result: SendCallsResult = self.relayer.call("wallet_sendCalls", json!([params])).await?;
        let id = match result {
            SendCallsResult::Id(id) | SendCallsResult::Object { id } => id,
        };
        info!(%id, sponsored = self.sponsorship.is_some(), "calls relayed");
        Ok(SubmissionId(id))
    }
}
