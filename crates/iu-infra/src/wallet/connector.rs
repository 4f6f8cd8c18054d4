use std::sync::Arc;

use anyhow::anyhow;
use iu_core::ports::{ActiveWalletPort, WalletConnectorPort};
use iu_core::{Session, WalletKind};

use super::{EmbeddedWallet, SmartWallet, Sponsorship};
use crate::rpc::JsonRpcClient;

/// Wallet variant chosen at startup.
pub enum WalletBackend {
    Embedded {
        signer: Arc<JsonRpcClient>,
    },
    Smart {
        relayer: Arc<JsonRpcClient>,
        chain_id: u64,
        sponsorship: Option<Sponsorship>,
    },
}

impl WalletBackend {
    pub fn kind(&self) -> WalletKind {
        match self {
            WalletBackend::Embedded { .. } => WalletKind::Embedded,
            WalletBackend::Smart { .. } => WalletKind::Smart,
        }
    }
}

/// Binds a session to the linked wallet of the configured kind.
pub struct ConfiguredWalletConnector {
    backend: WalletBackend,
}

impl ConfiguredWalletConnector {
    pub fn new(backend: WalletBackend) -> Self {
        Self { backend }
    }
}

impl WalletConnectorPort for ConfiguredWalletConnector {
    fn connect(&self, session: &Session) -> anyhow::Result<Arc<dyn ActiveWalletPort>> {
        let kind = self.backend.kind();
        let linked = session
            .wallet(kind)
            .ok_or_else(|| anyhow!("no {kind} wallet is linked to this account"))?;

        let wallet: Arc<dyn ActiveWalletPort> = match &self.backend {
            WalletBackend::Embedded { signer } => {
                Arc::new(EmbeddedWallet::new(signer.clone(), linked.address))
            }
            WalletBackend::Smart {
                relayer,
                chain_id,
                sponsorship,
            } => Arc::new(SmartWallet::new(
                relayer.clone(),
                linked.address,
                *chain_id,
                sponsorship.clone(),
            )),
        };
        Ok(wallet)
    }
}
