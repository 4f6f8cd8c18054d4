use async_trait::async_trait;

use crate::role::Role;
use crate::session::{AuthStatus, Session, UserId};

/// Identity provider capability.
///
/// Implementations wrap the hosted auth/wallet provider. The metadata update
/// is part of the trait rather than an optional extra, so callers never
/// check whether the provider supports it.
#[async_trait]
pub trait AuthProviderPort: Send + Sync {
    /// Current provider status (not ready, signed out, or signed in).
    async fn status(&self) -> anyhow::Result<AuthStatus>;

    /// Run the provider login flow and return the new session.
    async fn login(&self) -> anyhow::Result<Session>;

    async fn logout(&self) -> anyhow::Result<()>;

    /// Mirror the role into the provider's custom user metadata.
    async fn update_metadata(&self, user_id: &UserId, role: Role) -> anyhow::Result<()>;
}
