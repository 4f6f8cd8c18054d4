//! Balance reader.
//!
//! Reads the native and token balances of the active wallet and publishes
//! them as one [`BalanceSnapshot`]. A failed read never touches the
//! published snapshot, so the dashboard keeps showing the last good values.

use std::sync::Arc;
use std::time::Duration;

use iu_core::ports::{ActiveWalletPort, ChainReaderPort, ClockPort, NotifierPort};
use iu_core::{BalanceSnapshot, Erc20Token, NativeCurrency, TokenAmount};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

#[derive(Debug, thiserror::Error)]
pub enum BalanceError {
    #[error("wallet is not ready")]
    WalletNotReady,
    #[error("failed to read {symbol} balance: {cause:#}")]
    Read {
        symbol: String,
        cause: anyhow::Error,
    },
}

#[derive(Clone)]
pub struct RefreshBalances {
    chain: Arc<dyn ChainReaderPort>,
    clock: Arc<dyn ClockPort>,
    notifier: Arc<dyn NotifierPort>,
    token: Erc20Token,
    native: NativeCurrency,
    latest: Arc<RwLock<Option<BalanceSnapshot>>>,
}

impl RefreshBalances {
    pub fn new(
        chain: Arc<dyn ChainReaderPort>,
        clock: Arc<dyn ClockPort>,
        notifier: Arc<dyn NotifierPort>,
        token: Erc20Token,
        native: NativeCurrency,
    ) -> Self {
        Self {
            chain,
            clock,
            notifier,
            token,
            native,
            latest: Arc::new(RwLock::new(None)),
        }
    }

    /// Most recent successful snapshot.
    pub async fn latest(&self) -> Option<BalanceSnapshot> {
        self.latest.read().await.clone()
    }

    pub async fn clear(&self) {
        *self.latest.write().await = None;
    }

    pub async fn execute(
        &self,
        wallet: &dyn ActiveWalletPort,
    ) -> Result<BalanceSnapshot, BalanceError> {
        let owner = wallet.address();
        let span = info_span!("usecase.refresh_balances.execute", %owner);
        async {
            if !wallet.is_ready().await {
                return Err(BalanceError::WalletNotReady);
            }

            let native = self
                .chain
                .native_balance(owner)
                .await
                .map_err(|cause| BalanceError::Read {
                    symbol: self.native.symbol.clone(),
                    cause,
                })?;
            let token = self
                .chain
                .token_balance(self.token.address, owner)
                .await
                .map_err(|cause| BalanceError::Read {
                    symbol: self.token.symbol.clone(),
                    cause,
                })?;

            let snapshot = BalanceSnapshot {
                token: TokenAmount::new(token, self.token.decimals, self.token.symbol.clone()),
                native: TokenAmount::new(native, self.native.decimals, self.native.symbol.clone()),
                fetched_at: self.clock.now(),
            };
            *self.latest.write().await = Some(snapshot.clone());
            info!(token = %snapshot.token, native = %snapshot.native, "balances refreshed");
            Ok(snapshot)
        }
        .instrument(span)
        .await
    }

    /// Refreshes after `delay` on a background task. Failures are logged
    /// and alerted; nothing guards against overlapping refreshes.
    pub fn schedule(&self, wallet: Arc<dyn ActiveWalletPort>, delay: Duration) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match this.execute(wallet.as_ref()).await {
                Ok(_) => {}
                Err(BalanceError::WalletNotReady) => debug!("skipping scheduled refresh, wallet not ready"),
                Err(err) => {
                    warn!(error = %err, "scheduled balance refresh failed");
                    this.notifier.alert(&err.to_string());
                }
            }
        })
    }
}
