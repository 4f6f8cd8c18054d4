use async_trait::async_trait;
use iu_core::ports::ProfileStorePort;
use iu_core::{UserId, UserProfile};
use tracing::debug;

/// Local-only mode: no hosted table, the role lives in the local cache and
/// provider metadata.
#[derive(Debug, Default)]
pub struct DisabledProfileStore;

#[async_trait]
impl ProfileStorePort for DisabledProfileStore {
    async fn fetch_profile(&self, user_id: &UserId) -> anyhow::Result<Option<UserProfile>> {
        debug!(%user_id, "profile store disabled, nothing to fetch");
        Ok(None)
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> anyhow::Result<()> {
        debug!(user_id = %profile.id, "profile store disabled, skipping upsert");
        Ok(())
    }
}
