use std::sync::Arc;

use anyhow::Context;
use iu_core::ports::{KeyValueStorePort, ProfileStorePort};
use iu_core::{Role, Session};
use tracing::{debug, info, info_span, warn, Instrument};

use super::{role_cache_key, PENDING_ROLE_KEY};

/// Outcome of a role lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleResolution {
    pub role: Option<Role>,
    /// Role picked on the login screen, consumed by this lookup.
    pub pending: Option<Role>,
}

/// Use case for finding the stored role of an authenticated user.
///
/// ## Behavior
/// - Local cache first, then provider metadata, then the profile store
/// - A role found outside the cache is written back to the cache
/// - The pending role key is consumed only after the lookup succeeded
pub struct ResolveRole {
    local_store: Arc<dyn KeyValueStorePort>,
    profiles: Arc<dyn ProfileStorePort>,
}

impl ResolveRole {
    pub fn new(local_store: Arc<dyn KeyValueStorePort>, profiles: Arc<dyn ProfileStorePort>) -> Self {
        Self {
            local_store,
            profiles,
        }
    }

    pub async fn execute(&self, session: &Session) -> anyhow::Result<RoleResolution> {
        let span = info_span!("usecase.resolve_role.execute", user_id = %session.user_id);
        async {
            let role = self.lookup(session).await?;
            let pending = self.take_pending().await?;
            info!(role = ?role, pending = ?pending, "role resolved");
            Ok(RoleResolution { role, pending })
        }
        .instrument(span)
        .await
    }

    async fn lookup(&self, session: &Session) -> anyhow::Result<Option<Role>> {
        let key = role_cache_key(&session.user_id);
        if let Some(raw) = self.local_store.get(&key).await? {
            match raw.parse::<Role>() {
                Ok(role) => {
                    debug!(%role, "role found in local cache");
                    return Ok(Some(role));
                }
                Err(err) => warn!(error = %err, "ignoring unreadable cached role"),
            }
        }

        let role = match session.metadata_role {
            Some(role) => Some(role),
            None => self
                .profiles
                .fetch_profile(&session.user_id)
                .await
                .context("profile lookup failed")?
                .map(|profile| profile.role),
        };

        if let Some(role) = role {
            self.local_store.set(&key, role.as_str()).await?;
        }
        Ok(role)
    }

    async fn take_pending(&self) -> anyhow::Result<Option<Role>> {
        let Some(raw) = self.local_store.get(PENDING_ROLE_KEY).await? else {
            return Ok(None);
        };
        self.local_store.remove(PENDING_ROLE_KEY).await?;
        Ok(raw.parse::<Role>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::session::test_support::MockProfiles;
    use iu_core::{UserId, UserProfile};
    use iu_infra::storage::MemoryKeyValueStore;

    fn session() -> Session {
        Session::new(UserId::from("u-1"))
    }

    fn profile(role: Role) -> UserProfile {
        UserProfile {
            id: UserId::from("u-1"),
            role,
            wallet_address: None,
            email: None,
            legal_name: None,
            country: None,
            phone: None,
            document_type: None,
            document_number: None,
        }
    }

    #[tokio::test]
    async fn cached_role_wins_without_remote_call() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set("role:u-1", "entrepreneur").await.unwrap();
        let mut profiles = MockProfiles::new();
        profiles.expect_fetch_profile().times(0);

        let use_case = ResolveRole::new(store, Arc::new(profiles));
        let resolution = use_case.execute(&session()).await.unwrap();

        assert_eq!(resolution.role, Some(Role::Entrepreneur));
    }

    #[tokio::test]
    async fn remote_role_is_written_back_to_cache() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut profiles = MockProfiles::new();
        profiles
            .expect_fetch_profile()
            .times(1)
            .returning(|_| Ok(Some(profile(Role::Investor))));

        let use_case = ResolveRole::new(store.clone(), Arc::new(profiles));
        let resolution = use_case.execute(&session()).await.unwrap();

        assert_eq!(resolution.role, Some(Role::Investor));
        assert_eq!(
            store.get("role:u-1").await.unwrap().as_deref(),
            Some("investor")
        );
    }

    #[tokio::test]
    async fn metadata_role_skips_profile_store() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut profiles = MockProfiles::new();
        profiles.expect_fetch_profile().times(0);
        let mut session = session();
        session.metadata_role = Some(Role::Entrepreneur);

        let use_case = ResolveRole::new(store, Arc::new(profiles));
        let resolution = use_case.execute(&session).await.unwrap();

        assert_eq!(resolution.role, Some(Role::Entrepreneur));
    }

    #[tokio::test]
    async fn pending_role_is_consumed() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(PENDING_ROLE_KEY, "inversionista").await.unwrap();
        let mut profiles = MockProfiles::new();
        profiles.expect_fetch_profile().returning(|_| Ok(None));

        let use_case = ResolveRole::new(store.clone(), Arc::new(profiles));
        let resolution = use_case.execute(&session()).await.unwrap();

        assert_eq!(
            resolution,
            RoleResolution {
                role: None,
                pending: Some(Role::Investor),
            }
        );
        assert!(store.get(PENDING_ROLE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remote_failure_keeps_pending_role() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(PENDING_ROLE_KEY, "investor").await.unwrap();
        let mut profiles = MockProfiles::new();
        profiles
            .expect_fetch_profile()
            .returning(|_| Err(anyhow::anyhow!("connection refused")));

        let use_case = ResolveRole::new(store.clone(), Arc::new(profiles));
        let err = use_case.execute(&session()).await.unwrap_err();

        assert!(err.to_string().contains("profile lookup failed"));
        assert!(store.get(PENDING_ROLE_KEY).await.unwrap().is_some());
    }
}
