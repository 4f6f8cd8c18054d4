//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and the hosted services it talks to: identity provider, chain node,
//! wallet relayer, profile database and local device storage. Every
//! capability is resolved once at wiring time and injected as a trait
//! object, so use cases never probe an SDK for optional methods.

mod auth;
mod chain;
mod clock;
mod key_value;
mod notifier;
mod profile;
mod ramp;
mod wallet;

pub use auth::AuthProviderPort;
pub use chain::ChainReaderPort;
pub use clock::ClockPort;
pub use key_value::KeyValueStorePort;
pub use notifier::NotifierPort;
pub use profile::ProfileStorePort;
pub use ramp::RampPort;
pub use wallet::{ActiveWalletPort, WalletConnectorPort};
