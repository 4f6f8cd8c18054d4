//! Transfer form, activity records and transfer errors.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wallet::units::AmountError;
use crate::wallet::SubmissionId;

/// Relayer error fragments meaning the sponsored account could not prefund gas.
const GAS_PREFUND_MARKERS: [&str; 2] = ["aa21", "prefund"];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SendForm {
    pub recipient: String,
    pub amount: String,
}

impl SendForm {
    pub fn new(recipient: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    pub fn clear(&mut self) {
        self.recipient.clear();
        self.amount.clear();
    }
}

/// One line of the in-memory activity list. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub description: String,
    pub submission_id: SubmissionId,
    pub sent_at: DateTime<Utc>,
}

impl fmt::Display for TransferRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("recipient must be a 0x-prefixed address with 40 hex characters")]
    InvalidRecipient,
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),
    #[error("a transfer is already in progress")]
    InProgress,
    #[error("wallet is not ready yet, try again in a moment")]
    WalletNotReady,
    #[error("gas sponsorship was rejected by the relayer, the transfer was not sent: {0}")]
    GasSponsorship(String),
    #[error("transfer failed: {0}")]
    Submission(String),
}

impl TransferError {
    /// Maps a raw wallet/relayer error message onto a user-facing error.
    pub fn from_submission_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_ascii_lowercase();
        if GAS_PREFUND_MARKERS.iter().any(|m| lowered.contains(m)) {
            TransferError::GasSponsorship(message)
        } else {
            TransferError::Submission(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefund_errors_are_classified_as_gas_sponsorship() {
        let err = TransferError::from_submission_message(
            "UserOperation reverted during simulation with reason: AA21 didn't pay prefund",
        );
        assert!(matches!(err, TransferError::GasSponsorship(_)));

        let err = TransferError::from_submission_message("Account did not PREFUND the entrypoint");
        assert!(matches!(err, TransferError::GasSponsorship(_)));
    }

    #[test]
    fn other_errors_stay_generic() {
        let err = TransferError::from_submission_message("nonce too low");
        assert_eq!(err, TransferError::Submission("nonce too low".into()));
    }

    #[test]
    fn clearing_the_form_empties_both_fields() {
        let mut form = SendForm::new("0xabc", "1");
        form.clear();
        assert_eq!(form, SendForm::default());
    }
}
