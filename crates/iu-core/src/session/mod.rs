//! Authenticated session models
//!
//! A [`Session`] is created when the identity provider reports a successful
//! login and is dropped on logout. It carries the wallets the provider linked
//! to the account; which one drives balances and transfers is decided by the
//! wallet connector chosen at startup.

use std::fmt;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Provider-issued user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Wallet flavour linked to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    /// Provider-managed key, signs and broadcasts its own transactions.
    Embedded,
    /// Contract wallet whose calls are relayed, optionally with sponsored gas.
    Smart,
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletKind::Embedded => f.write_str("embedded"),
            WalletKind::Smart => f.write_str("smart"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedWallet {
    pub address: Address,
    pub kind: WalletKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: Option<String>,
    /// Role mirrored in the provider's custom metadata, if any.
    pub metadata_role: Option<Role>,
    pub wallets: Vec<LinkedWallet>,
}

impl Session {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            email: None,
            metadata_role: None,
            wallets: Vec::new(),
        }
    }

    pub fn wallet(&self, kind: WalletKind) -> Option<&LinkedWallet> {
        self.wallets.iter().find(|w| w.kind == kind)
    }
}

/// What the identity provider currently reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    NotReady,
    Unauthenticated,
    Authenticated(Session),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_lookup_by_kind() {
        let mut session = Session::new(UserId::from("did:privy:abc"));
        session.wallets.push(LinkedWallet {
            address: Address::repeat_byte(0x11),
            kind: WalletKind::Smart,
        });

        assert!(session.wallet(WalletKind::Embedded).is_none());
        assert_eq!(
            session.wallet(WalletKind::Smart).map(|w| w.address),
            Some(Address::repeat_byte(0x11))
        );
    }

    #[test]
    fn user_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&UserId::new("u-1")).unwrap();
        assert_eq!(json, "\"u-1\"");
    }
}
