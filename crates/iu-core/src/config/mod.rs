//! # Configuration DTO
//!
//! ## Responsibilities
//!
//! - Define the configuration data structure
//! - Provide the TOML → DTO mapping
//!
//! ## Prohibited
//!
//! - No validation: addresses and URLs stay raw strings here
//! - No default value calculation: missing keys become empty values
//!
//! Turning these facts into typed values (and filling in Polygon defaults)
//! is the job of the wiring layer.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory for local storage and logs (may be empty)
    pub data_dir: PathBuf,

    /// Public chain node used for balance reads
    pub rpc_url: String,
    pub chain_id: u64,
    pub native_symbol: String,

    /// ERC-20 token shown on the dashboard
    pub token_address: String,
    pub token_symbol: String,
    pub token_decimals: u8,

    /// `embedded` or `smart`
    pub wallet_kind: String,
    /// JSON-RPC endpoint of the embedded signer
    pub wallet_rpc_url: String,
    /// Smart-wallet relayer endpoint
    pub relayer_url: String,
    /// Paymaster policy used to sponsor relayed calls
    pub sponsorship_policy_id: String,
    pub paymaster_url: String,

    /// Locally configured identity
    pub auth_user_id: String,
    pub auth_email: String,
    pub auth_embedded_wallet: String,
    pub auth_smart_wallet: String,

    /// Hosted profile store (empty URL disables it)
    pub profile_store_url: String,
    pub profile_store_table: String,
    /// Name of the environment variable holding the API key
    pub profile_store_api_key_env: String,

    pub on_ramp_url: String,
    pub off_ramp_url: String,

    pub post_transfer_refresh_ms: u64,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// Must NOT contain any validation or default value logic.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let int_at = |section: &str, key: &str| -> i64 {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
        };

        Ok(Self {
            data_dir: PathBuf::from(str_at("app", "data_dir")),
            rpc_url: str_at("chain", "rpc_url"),
            chain_id: int_at("chain", "chain_id") as u64,
            native_symbol: str_at("chain", "native_symbol"),
            token_address: str_at("token", "address"),
            token_symbol: str_at("token", "symbol"),
            token_decimals: int_at("token", "decimals") as u8,
            wallet_kind: str_at("wallet", "kind"),
            wallet_rpc_url: str_at("wallet", "rpc_url"),
            relayer_url: str_at("wallet", "relayer_url"),
            sponsorship_policy_id: str_at("wallet", "sponsorship_policy_id"),
            paymaster_url: str_at("wallet", "paymaster_url"),
            auth_user_id: str_at("auth", "user_id"),
            auth_email: str_at("auth", "email"),
            auth_embedded_wallet: str_at("auth", "embedded_wallet"),
            auth_smart_wallet: str_at("auth", "smart_wallet"),
            profile_store_url: str_at("profile_store", "url"),
            profile_store_table: str_at("profile_store", "table"),
            profile_store_api_key_env: str_at("profile_store", "api_key_env"),
            on_ramp_url: str_at("links", "on_ramp_url"),
            off_ramp_url: str_at("links", "off_ramp_url"),
            post_transfer_refresh_ms: int_at("app", "post_transfer_refresh_ms") as u64,
            request_timeout_secs: int_at("app", "request_timeout_secs") as u64,
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self::default()
    }
}
