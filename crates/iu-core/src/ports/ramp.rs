use alloy_primitives::Address;
use async_trait::async_trait;

/// Fiat on/off-ramp launcher.
///
/// Both methods return the URL that was opened.
#[async_trait]
pub trait RampPort: Send + Sync {
    /// Buy tokens into `address`.
    async fn open_on_ramp(&self, address: Address) -> anyhow::Result<String>;

    /// Cash tokens out of `address`.
    async fn open_off_ramp(&self, address: Address) -> anyhow::Result<String>;
}
