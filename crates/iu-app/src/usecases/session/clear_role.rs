use std::sync::Arc;

use iu_core::ports::KeyValueStorePort;
use iu_core::UserId;
use tracing::debug;

use super::role_cache_key;

/// Use case for dropping a user's cached role on logout.
pub struct ClearRoleCache {
    local_store: Arc<dyn KeyValueStorePort>,
}

impl ClearRoleCache {
    pub fn new(local_store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { local_store }
    }

    pub async fn execute(&self, user_id: &UserId) -> anyhow::Result<()> {
        debug!(%user_id, "clearing cached role");
        self.local_store.remove(&role_cache_key(user_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iu_infra::storage::MemoryKeyValueStore;

    #[tokio::test]
    async fn removes_only_the_users_key() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set("role:a", "investor").await.unwrap();
        store.set("role:b", "entrepreneur").await.unwrap();

        ClearRoleCache::new(store.clone())
            .execute(&UserId::from("a"))
            .await
            .unwrap();

        assert!(store.get("role:a").await.unwrap().is_none());
        assert!(store.get("role:b").await.unwrap().is_some());
    }
}
