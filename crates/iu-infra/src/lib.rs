//! # iu-infra
//!
//! Adapters behind the iu-core ports: local storage, JSON-RPC chain and
//! wallet access, the hosted profile table, the local identity provider and
//! terminal-facing outputs.

pub mod auth;
pub mod notifier;
pub mod profile;
pub mod ramp;
pub mod rpc;
pub mod storage;
pub mod time;
pub mod wallet;

pub use auth::{LocalAuthProvider, LocalIdentity};
pub use notifier::TerminalNotifier;
pub use profile::{DisabledProfileStore, PostgrestProfileStore};
pub use ramp::TerminalRampLauncher;
pub use rpc::{JsonRpcChainReader, JsonRpcClient, RpcError};
pub use storage::{FileKeyValueStore, MemoryKeyValueStore};
pub use time::SystemClock;
pub use wallet::{ConfiguredWalletConnector, EmbeddedWallet, SmartWallet, Sponsorship, WalletBackend};
