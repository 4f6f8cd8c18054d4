//! Identity provider adapters.

mod local;

pub use local::{LocalAuthProvider, LocalIdentity};
