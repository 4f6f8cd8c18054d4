//! Transfer submitter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use iu_core::ports::{ActiveWalletPort, ClockPort};
use iu_core::wallet::{erc20, parse_address, short_address, units};
use iu_core::{Erc20Token, SendForm, TransactionRequest, TransferError, TransferRecord, U256};
use tracing::{info, info_span, warn, Instrument};

/// Use case for sending the dashboard token to another address.
///
/// ## Behavior
/// - Validates recipient and amount before touching the wallet
/// - Rejects a second submission while one is in flight
/// - Encodes `transfer(address,uint256)` against the configured token
/// - Classifies relayer gas-prefund failures separately
pub struct SubmitTransfer {
    token: Erc20Token,
    clock: Arc<dyn ClockPort>,
    in_progress: AtomicBool,
}

/// Clears the in-progress flag when dropped.
struct InProgressGuard<'a>(&'a AtomicBool);

impl<'a> InProgressGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InProgressGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SubmitTransfer {
    pub fn new(token: Erc20Token, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            token,
            clock,
            in_progress: AtomicBool::new(false),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    pub async fn execute(
        &self,
        wallet: &dyn ActiveWalletPort,
        form: &SendForm,
    ) -> Result<TransferRecord, TransferError> {
        let recipient = parse_address(&form.recipient).ok_or(TransferError::InvalidRecipient)?;
        let amount = units::parse_amount(&form.amount, self.token.decimals)?;
        let _guard = InProgressGuard::acquire(&self.in_progress).ok_or(TransferError::InProgress)?;

        let span = info_span!(
            "usecase.submit_transfer.execute",
            wallet = %wallet.kind(),
            %recipient,
            %amount
        );
        async {
            if !wallet.is_ready().await {
                return Err(TransferError::WalletNotReady);
            }

            let request = TransactionRequest {
                to: self.token.address,
                data: erc20::encode_transfer(recipient, amount),
                value: U256::ZERO,
            };
            let submission_id = wallet.send_transaction(request).await.map_err(|err| {
                warn!(error = %format!("{err:#}"), "transfer submission failed");
                TransferError::from_submission_message(format!("{err:#}"))
            })?;

            let description = format!(
                "Sent {} {} to {}",
                units::to_fixed(amount, self.token.decimals, 2),
                self.token.symbol,
                short_address(&recipient)
            );
            info!(%submission_id, "transfer submitted");
            Ok(TransferRecord {
                description,
                submission_id,
                sent_at: self.clock.now(),
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use iu_core::{Address, SubmissionId, WalletKind};
    use mockall::mock;

    mock! {
        pub Wallet {}

        #[async_trait]
        impl ActiveWalletPort for Wallet {
            fn kind(&self) -> WalletKind;
            fn address(&self) -> Address;
            async fn is_ready(&self) -> bool;
            async fn send_transaction(&self, request: TransactionRequest) -> anyhow::Result<SubmissionId>;
        }
    }

    struct EpochClock;

    impl ClockPort for EpochClock {
        fn now(&self) -> DateTime<Utc> {
            DateTime::<Utc>::UNIX_EPOCH
        }
    }

    const RECIPIENT: &str = "0x1111111111111111111111111111111111111111";

    fn use_case() -> SubmitTransfer {
        SubmitTransfer::new(Erc20Token::default(), Arc::new(EpochClock))
    }

    fn wallet_expecting_no_calls() -> MockWallet {
        let mut wallet = MockWallet::new();
        wallet.expect_kind().return_const(WalletKind::Embedded);
        wallet.expect_is_ready().times(0);
        wallet.expect_send_transaction().times(0);
        wallet
    }

    #[tokio::test]
    async fn malformed_recipient_is_rejected_before_network() {
        let wallet = wallet_expecting_no_calls();
        let err = use_case()
            .execute(&wallet, &SendForm::new("0x1234", "5"))
            .await
            .unwrap_err();
        assert_eq!(err, TransferError::InvalidRecipient);
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected_before_network() {
        let wallet = wallet_expecting_no_calls();
        let err = use_case()
            .execute(&wallet, &SendForm::new(RECIPIENT, "0"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::InvalidAmount(_)));
    }

    #[tokio::test]
    async fn sends_encoded_transfer_to_token_contract() {
        let mut wallet = MockWallet::new();
        wallet.expect_kind().return_const(WalletKind::Smart);
        wallet.expect_is_ready().returning(|| true);
        wallet
            .expect_send_transaction()
            .withf(|req| {
                req.to == Erc20Token::default().address
                    && req.value == U256::ZERO
                    && req.data[..4] == [0xa9, 0x05, 0x9c, 0xbb]
            })
            .times(1)
            .returning(|_| Ok(SubmissionId("0xabc".into())));

        let record = use_case()
            .execute(&wallet, &SendForm::new(RECIPIENT, "12.5"))
            .await
            .unwrap();

        assert_eq!(record.description, "Sent 12.50 USDC to 0x1111…1111");
        assert_eq!(record.submission_id, SubmissionId("0xabc".into()));
    }

    #[tokio::test]
    async fn prefund_error_maps_to_gas_sponsorship() {
        let mut wallet = MockWallet::new();
        wallet.expect_kind().return_const(WalletKind::Smart);
        wallet.expect_is_ready().returning(|| true);
        wallet
            .expect_send_transaction()
            .returning(|_| Err(anyhow::anyhow!("rpc error -32500: AA21 didn't pay prefund")));

        let submitter = use_case();
        let err = submitter
            .execute(&wallet, &SendForm::new(RECIPIENT, "1"))
            .await
            .unwrap_err();

        assert!(matches!(err, TransferError::GasSponsorship(_)));
        assert!(!submitter.is_in_progress());
    }

    #[tokio::test]
    async fn unready_wallet_is_reported() {
        let mut wallet = MockWallet::new();
        wallet.expect_kind().return_const(WalletKind::Embedded);
        wallet.expect_is_ready().returning(|| false);
        wallet.expect_send_transaction().times(0);

        let err = use_case()
            .execute(&wallet, &SendForm::new(RECIPIENT, "1"))
            .await
            .unwrap_err();
        assert_eq!(err, TransferError::WalletNotReady);
    }

    #[test]
    fn guard_rejects_reentry_until_dropped() {
        let flag = AtomicBool::new(false);
        let guard = InProgressGuard::acquire(&flag).unwrap();
        assert!(InProgressGuard::acquire(&flag).is_none());
        drop(guard);
        assert!(InProgressGuard::acquire(&flag).is_some());
    }
}
