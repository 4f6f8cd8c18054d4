//! Local key-value storage adapters.

mod file_kv;
mod memory_kv;

pub use file_kv::{FileKeyValueStore, DEFAULT_STORE_FILE};
pub use memory_kv::MemoryKeyValueStore;

use std::path::PathBuf;

/// Platform data directory for InvestUp, e.g. `~/.local/share/investup`.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("investup"))
}
