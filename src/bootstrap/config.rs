//! # Configuration Loader
//!
//! Reads the TOML file and maps it onto the [`AppConfig`] DTO. Accepts
//! whatever is in the file: defaults and validation happen in wiring.

use anyhow::Context;
use std::path::{Path, PathBuf};

use iu_core::config::AppConfig;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `~/.config/investup/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("investup").join(CONFIG_FILE_NAME))
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Loads the explicit path, or the default path when it exists. Without
/// either, every value is left empty for wiring to fill in.
pub fn load_config_or_empty(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => load_config(&path),
        _ => Ok(AppConfig::empty()),
    }
}
