//! Role bookkeeping use cases
//!
//! The role is cached in local storage under a key scoped by user id, and
//! mirrored to the hosted profile store and the provider metadata.

pub mod clear_role;
pub mod persist_role;
pub mod resolve_role;

pub use clear_role::ClearRoleCache;
pub use persist_role::PersistRole;
pub use resolve_role::{ResolveRole, RoleResolution};

use iu_core::UserId;

/// Role picked on the login screen, waiting for authentication.
pub const PENDING_ROLE_KEY: &str = "pending_role";

/// Local-storage key of the cached role for `user_id`.
pub fn role_cache_key(user_id: &UserId) -> String {
    format!("role:{user_id}")
}
