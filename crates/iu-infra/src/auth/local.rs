//! Local identity provider
//!
//! Stands in for the hosted auth/wallet provider on a terminal: the account
//! (user id, email, linked wallets) comes from configuration, and the signed
//! in flag plus custom metadata are kept in the local key-value store.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use iu_core::ports::{AuthProviderPort, KeyValueStorePort};
use iu_core::{Address, AuthStatus, LinkedWallet, Role, Session, UserId, WalletKind};
use tracing::{info, warn};

const SESSION_KEY: &str = "auth:session";

fn metadata_role_key(user_id: &UserId) -> String {
    format!("auth:metadata:{user_id}:role")
}

/// Account the provider signs in as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalIdentity {
    pub user_id: UserId,
    pub email: Option<String>,
    pub embedded_wallet: Option<Address>,
    pub smart_wallet: Option<Address>,
}

pub struct LocalAuthProvider {
    store: Arc<dyn KeyValueStorePort>,
    /// `None` until an account is configured; the provider reports not ready.
    identity: Option<LocalIdentity>,
}

impl LocalAuthProvider {
    pub fn new(store: Arc<dyn KeyValueStorePort>, identity: Option<LocalIdentity>) -> Self {
        Self { store, identity }
    }

    async fn session_for(&self, identity: &LocalIdentity) -> anyhow::Result<Session> {
        let metadata_role = match self.store.get(&metadata_role_key(&identity.user_id)).await? {
            Some(raw) => match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(err) => {
                    warn!(error = %err, "ignoring unreadable metadata role");
                    None
                }
            },
            None => None,
        };

        let wallets = [
            (identity.embedded_wallet, WalletKind::Embedded),
            (identity.smart_wallet, WalletKind::Smart),
        ]
        .into_iter()
        .filter_map(|(address, kind)| address.map(|address| LinkedWallet { address, kind }))
        .collect();

        Ok(Session {
            user_id: identity.user_id.clone(),
            email: identity.email.clone(),
            metadata_role,
            wallets,
        })
    }
}

#[async_trait]
impl AuthProviderPort for LocalAuthProvider {
    async fn status(&self) -> anyhow::Result<AuthStatus> {
        let Some(identity) = &self.identity else {
            return Ok(AuthStatus::NotReady);
        };
        match self.store.get(SESSION_KEY).await? {
            Some(user_id) if user_id == identity.user_id.as_str() => {
                Ok(AuthStatus::Authenticated(self.session_for(identity).await?))
            }
            _ => Ok(AuthStatus::Unauthenticated),
        }
    }

    async fn login(&self) -> anyhow::Result<Session> {
        let identity = self
            .identity
            .as_ref()
            .ok_or_else(|| anyhow!("no account configured, set [auth] user_id"))?;
        self.store.set(SESSION_KEY, identity.user_id.as_str()).await?;
        info!(user_id = %identity.user_id, "signed in");
        self.session_for(identity).await
    }

    async fn logout(&self) -> anyhow::Result<()> {
        self.store.remove(SESSION_KEY).await?;
        info!("signed out");
        Ok(())
    }

    async fn update_metadata(&self, user_id: &UserId, role: Role) -> anyhow::Result<()> {
        self.store.set(&metadata_role_key(user_id), role.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    fn identity() -> LocalIdentity {
        LocalIdentity {
            user_id: UserId::from("did:local:ana"),
            email: Some("ana@example.com".into()),
            embedded_wallet: Some(Address::repeat_byte(1)),
            smart_wallet: None,
        }
    }

    #[tokio::test]
    async fn unconfigured_provider_is_not_ready() {
        let provider = LocalAuthProvider::new(Arc::new(MemoryKeyValueStore::new()), None);

        assert_eq!(provider.status().await.unwrap(), AuthStatus::NotReady);
        assert!(provider.login().await.is_err());
    }

    #[tokio::test]
    async fn login_then_logout() {
        let provider =
            LocalAuthProvider::new(Arc::new(MemoryKeyValueStore::new()), Some(identity()));
        assert_eq!(provider.status().await.unwrap(), AuthStatus::Unauthenticated);

        let session = provider.login().await.unwrap();
        assert_eq!(session.wallets.len(), 1);
        assert_eq!(
            provider.status().await.unwrap(),
            AuthStatus::Authenticated(session)
        );

        provider.logout().await.unwrap();
        assert_eq!(provider.status().await.unwrap(), AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn metadata_role_shows_up_in_session() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let provider = LocalAuthProvider::new(store, Some(identity()));

        provider
            .update_metadata(&identity().user_id, Role::Entrepreneur)
            .await
            .unwrap();
        let session = provider.login().await.unwrap();

        assert_eq!(session.metadata_role, Some(Role::Entrepreneur));
    }
}
