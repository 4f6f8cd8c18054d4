//! Use cases driven by the dashboard controller.

pub mod refresh_balances;
pub mod session;
pub mod submit_transfer;

pub use refresh_balances::{BalanceError, RefreshBalances};
pub use session::{ClearRoleCache, PersistRole, ResolveRole, RoleResolution};
pub use submit_transfer::SubmitTransfer;
