use async_trait::async_trait;

use crate::profile::UserProfile;
use crate::session::UserId;

/// Hosted `users` table keyed by user id.
#[async_trait]
pub trait ProfileStorePort: Send + Sync {
    async fn fetch_profile(&self, user_id: &UserId) -> anyhow::Result<Option<UserProfile>>;

    /// Insert or merge the row for `profile.id`.
    async fn upsert_profile(&self, profile: &UserProfile) -> anyhow::Result<()>;
}
