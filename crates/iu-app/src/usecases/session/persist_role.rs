use std::sync::Arc;

use anyhow::Context;
use iu_core::ports::{AuthProviderPort, KeyValueStorePort, ProfileStorePort};
use iu_core::{Address, OnboardingForm, Role, Session, UserProfile};
use tracing::{info, info_span, warn, Instrument};

use super::role_cache_key;

/// Use case for storing the role chosen during onboarding.
///
/// ## Behavior
/// - Upserts the profile row first; a failure stops here and nothing local
///   is written, so the cache never claims a role the store does not have
/// - Mirrors the role into provider metadata (failure is only logged)
/// - Caches the role locally under the user-scoped key
pub struct PersistRole {
    local_store: Arc<dyn KeyValueStorePort>,
    profiles: Arc<dyn ProfileStorePort>,
    auth: Arc<dyn AuthProviderPort>,
}

impl PersistRole {
    pub fn new(
        local_store: Arc<dyn KeyValueStorePort>,
        profiles: Arc<dyn ProfileStorePort>,
        auth: Arc<dyn AuthProviderPort>,
    ) -> Self {
        Self {
            local_store,
            profiles,
            auth,
        }
    }

    pub async fn execute(
        &self,
        session: &Session,
        role: Role,
        form: &OnboardingForm,
        wallet_address: Option<Address>,
    ) -> anyhow::Result<()> {
        let span = info_span!("usecase.persist_role.execute", user_id = %session.user_id, %role);
        async {
            let profile = UserProfile::from_onboarding(session, role, form, wallet_address);
            self.profiles
                .upsert_profile(&profile)
                .await
                .context("failed to save profile")?;

            if let Err(err) = self.auth.update_metadata(&session.user_id, role).await {
                warn!(error = %err, "provider metadata update failed");
            }

            self.local_store
                .set(&role_cache_key(&session.user_id), role.as_str())
                .await?;
            info!("role persisted");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
