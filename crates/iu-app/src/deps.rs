//! # Application Dependencies
//!
//! Dependency grouping for controller construction.
//!
//! **Note**: This is NOT a Builder pattern. No build steps, no default
//! values, no hidden logic: just parameter grouping.

use std::sync::Arc;

use iu_core::ports::*;

/// Application dependency grouping (non-Builder, just parameter grouping)
///
/// All dependencies are required. A deployment without a hosted profile
/// store passes an adapter that stores nothing.
pub struct AppDeps {
    // Identity
    pub auth: Arc<dyn AuthProviderPort>,

    // Persistence
    pub local_store: Arc<dyn KeyValueStorePort>,
    pub profiles: Arc<dyn ProfileStorePort>,

    // Chain
    pub chain: Arc<dyn ChainReaderPort>,
    pub wallet_connector: Arc<dyn WalletConnectorPort>,

    // Outer surfaces
    pub ramp: Arc<dyn RampPort>,
    pub notifier: Arc<dyn NotifierPort>,

    // System
    pub clock: Arc<dyn ClockPort>,
}
