//! Hosted user-profile adapters.

mod disabled;
mod postgrest;

pub use disabled::DisabledProfileStore;
pub use postgrest::PostgrestProfileStore;
