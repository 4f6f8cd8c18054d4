//! Active wallet adapters.
//!
//! One variant is picked at startup from configuration. Both talk JSON-RPC:
//! the embedded wallet to a signer that broadcasts its own transactions, the
//! smart wallet to a relayer that bundles calls and may sponsor gas.

mod connector;
mod embedded;
mod smart;

pub use connector::{ConfiguredWalletConnector, WalletBackend};
pub use embedded::EmbeddedWallet;
pub use smart::{SmartWallet, Sponsorship};

use iu_core::U256;

fn hex_quantity(value: U256) -> String {
    format!("0x{value:x}")
}
