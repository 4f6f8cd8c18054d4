use std::sync::Arc;

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::session::{Session, WalletKind};
use crate::wallet::{SubmissionId, TransactionRequest};

/// The one wallet that drives balance reads and transfers for a session.
#[async_trait]
pub trait ActiveWalletPort: Send + Sync {
    fn kind(&self) -> WalletKind;

    fn address(&self) -> Address;

    /// Whether the wallet can sign or relay right now.
    async fn is_ready(&self) -> bool;

    /// Submit a call. Errors carry the wallet/relayer message verbatim.
    async fn send_transaction(&self, request: TransactionRequest)
        -> anyhow::Result<SubmissionId>;
}

/// Binds a session to its active wallet. The concrete variant is picked at
/// startup; this only looks up the session's address for that variant.
pub trait WalletConnectorPort: Send + Sync {
    fn connect(&self, session: &Session) -> anyhow::Result<Arc<dyn ActiveWalletPort>>;
}
