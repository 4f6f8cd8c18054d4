//! # Dependency Injection
//!
//! ## Responsibilities
//!
//! - Fill missing configuration values with the Polygon/USDC defaults
//! - Turn raw configuration strings into typed values (addresses, URLs)
//! - Create infra adapters and inject them into [`AppDeps`]
//!
//! ## Prohibited
//!
//! - No business logic: what happens on login, onboarding or transfer is
//!   decided by the controller
//!
//! This is the only place that depends on iu-infra and iu-app at once.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use iu_app::{AppDeps, ControllerSettings};
use iu_core::config::AppConfig;
use iu_core::ports::*;
use iu_core::wallet::{parse_address, POLYGON_CHAIN_ID, POLYGON_USDC};
use iu_core::{Address, Erc20Token, NativeCurrency, UserId};
use iu_infra::storage::default_data_dir;
use iu_infra::{
    ConfiguredWalletConnector, DisabledProfileStore, FileKeyValueStore, JsonRpcChainReader,
    JsonRpcClient, LocalAuthProvider, LocalIdentity, PostgrestProfileStore, Sponsorship,
    SystemClock, TerminalNotifier, TerminalRampLauncher, WalletBackend,
};
use tracing::info;

pub const DEFAULT_RPC_URL: &str = "https://polygon-rpc.com";
pub const DEFAULT_SIGNER_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_PROFILE_TABLE: &str = "users";
pub const DEFAULT_PROFILE_KEY_ENV: &str = "INVESTUP_PROFILE_STORE_KEY";
pub const DEFAULT_POST_TRANSFER_REFRESH_MS: u64 = 3_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
/// Largest exponent with `10^decimals` still inside `uint256`.
pub const MAX_TOKEN_DECIMALS: u8 = 77;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    #[error("Chain configuration invalid: {0}")]
    Chain(String),

    #[error("Token configuration invalid: {0}")]
    Token(String),

    #[error("Wallet configuration invalid: {0}")]
    Wallet(String),

    #[error("Account configuration invalid: {0}")]
    Auth(String),

    #[error("Profile store configuration invalid: {0}")]
    ProfileStore(String),

    #[error("Ramp links invalid: {0}")]
    Links(String),
}

/// Everything the controller needs.
pub struct Wired {
    pub deps: AppDeps,
    pub settings: ControllerSettings,
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn optional_address(field: &str, value: &str) -> WiringResult<Option<Address>> {
    non_empty(value)
        .map(|raw| {
            parse_address(raw).ok_or_else(|| WiringError::Auth(format!("{field} {raw:?} is not an address")))
        })
        .transpose()
}

fn network_name(chain_id: u64) -> String {
    match chain_id {
        POLYGON_CHAIN_ID => "Polygon".to_string(),
        80002 => "Polygon Amoy".to_string(),
        other => format!("Chain {other}"),
    }
}

/// Data directory from config, or the platform default.
pub fn resolve_data_dir(config: &AppConfig) -> WiringResult<PathBuf> {
    if !config.data_dir.as_os_str().is_empty() {
        return Ok(config.data_dir.clone());
    }
    default_data_dir()
        .ok_or_else(|| WiringError::DataDir("no platform data directory, set [app] data_dir".into()))
}

fn chain_id(config: &AppConfig) -> u64 {
    if config.chain_id == 0 {
        POLYGON_CHAIN_ID
    } else {
        config.chain_id
    }
}

fn request_timeout(config: &AppConfig) -> Duration {
    match config.request_timeout_secs {
        0 => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        secs => Duration::from_secs(secs),
    }
}

/// Token, native currency and timing settings.
pub fn resolve_settings(config: &AppConfig) -> WiringResult<ControllerSettings> {
    let token_address = match non_empty(&config.token_address) {
        Some(raw) => parse_address(raw)
            .ok_or_else(|| WiringError::Token(format!("address {raw:?} is not an address")))?,
        None => POLYGON_USDC,
    };
    let defaults = Erc20Token::default();
    let decimals = match config.token_decimals {
        0 => defaults.decimals,
        d if d > MAX_TOKEN_DECIMALS => {
            return Err(WiringError::Token(format!(
                "decimals {d} exceeds the maximum of {MAX_TOKEN_DECIMALS}"
            )))
        }
        d => d,
    };
    let token = Erc20Token {
        address: token_address,
        symbol: or_default(&config.token_symbol, &defaults.symbol).to_string(),
        decimals,
    };
    let native_defaults = NativeCurrency::default();
    let native = NativeCurrency {
        symbol: or_default(&config.native_symbol, &native_defaults.symbol).to_string(),
        decimals: native_defaults.decimals,
    };
    let post_transfer_refresh = Duration::from_millis(match config.post_transfer_refresh_ms {
        0 => DEFAULT_POST_TRANSFER_REFRESH_MS,
        ms => ms,
    });

    Ok(ControllerSettings {
        token,
        native,
        network_name: network_name(chain_id(config)),
        post_transfer_refresh,
    })
}

fn rpc_client(url: &str, timeout: Duration, err: fn(String) -> WiringError) -> WiringResult<Arc<JsonRpcClient>> {
    JsonRpcClient::new(url, timeout)
        .map(Arc::new)
        .map_err(|e| err(e.to_string()))
}

fn create_wallet_backend(config: &AppConfig, timeout: Duration) -> WiringResult<WalletBackend> {
    match or_default(&config.wallet_kind, "embedded") {
        "embedded" => Ok(WalletBackend::Embedded {
            signer: rpc_client(
                or_default(&config.wallet_rpc_url, DEFAULT_SIGNER_URL),
                timeout,
                WiringError::Wallet,
            )?,
        }),
        "smart" => {
            let relayer_url = non_empty(&config.relayer_url).ok_or_else(|| {
                WiringError::Wallet("wallet.kind = \"smart\" requires wallet.relayer_url".into())
            })?;
            let sponsorship = match (
                non_empty(&config.paymaster_url),
                non_empty(&config.sponsorship_policy_id),
            ) {
                (Some(url), policy_id) => Some(Sponsorship {
                    url: url.to_string(),
                    policy_id: policy_id.map(str::to_string),
                }),
                (None, Some(_)) => {
                    return Err(WiringError::Wallet(
                        "wallet.sponsorship_policy_id requires wallet.paymaster_url".into(),
                    ))
                }
                (None, None) => None,
            };
            Ok(WalletBackend::Smart {
                relayer: rpc_client(relayer_url, timeout, WiringError::Wallet)?,
                chain_id: chain_id(config),
                sponsorship,
            })
        }
        other => Err(WiringError::Wallet(format!(
            "unknown wallet kind {other:?}, expected \"embedded\" or \"smart\""
        ))),
    }
}

fn create_identity(config: &AppConfig) -> WiringResult<Option<LocalIdentity>> {
    let Some(user_id) = non_empty(&config.auth_user_id) else {
        return Ok(None);
    };
    Ok(Some(LocalIdentity {
        user_id: UserId::new(user_id),
        email: non_empty(&config.auth_email).map(str::to_string),
        embedded_wallet: optional_address("auth.embedded_wallet", &config.auth_embedded_wallet)?,
        smart_wallet: optional_address("auth.smart_wallet", &config.auth_smart_wallet)?,
    }))
}

fn create_profile_store(
    config: &AppConfig,
    timeout: Duration,
    env: &dyn Fn(&str) -> Option<String>,
) -> WiringResult<Arc<dyn ProfileStorePort>> {
    let Some(url) = non_empty(&config.profile_store_url) else {
        info!("profile store not configured, roles stay local");
        return Ok(Arc::new(DisabledProfileStore));
    };
    let key_env = or_default(&config.profile_store_api_key_env, DEFAULT_PROFILE_KEY_ENV);
    let api_key = env(key_env)
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| WiringError::ProfileStore(format!("environment variable {key_env} is not set")))?;
    let store = PostgrestProfileStore::new(
        url,
        or_default(&config.profile_store_table, DEFAULT_PROFILE_TABLE),
        api_key,
        timeout,
    )
    .map_err(|e| WiringError::ProfileStore(format!("{e:#}")))?;
    Ok(Arc::new(store))
}

/// Create all adapters and group them for the controller.
pub fn wire_dependencies(config: &AppConfig) -> WiringResult<Wired> {
    wire_with_env(config, &|key| std::env::var(key).ok())
}

pub fn wire_with_env(
    config: &AppConfig,
    env: &dyn Fn(&str) -> Option<String>,
) -> WiringResult<Wired> {
    let settings = resolve_settings(config)?;
    let data_dir = resolve_data_dir(config)?;
    let timeout = request_timeout(config);

    // Step 1: local storage
    let local_store: Arc<dyn KeyValueStorePort> =
        Arc::new(FileKeyValueStore::with_defaults(data_dir.clone()));

    // Step 2: chain access
    let chain_client = rpc_client(
        or_default(&config.rpc_url, DEFAULT_RPC_URL),
        timeout,
        WiringError::Chain,
    )?;
    let chain: Arc<dyn ChainReaderPort> = Arc::new(JsonRpcChainReader::new(chain_client));
    let backend = create_wallet_backend(config, timeout)?;
    info!(kind = %backend.kind(), "wallet backend selected");
    let wallet_connector: Arc<dyn WalletConnectorPort> =
        Arc::new(ConfiguredWalletConnector::new(backend));

    // Step 3: identity and profiles
    let auth: Arc<dyn AuthProviderPort> = Arc::new(LocalAuthProvider::new(
        local_store.clone(),
        create_identity(config)?,
    ));
    let profiles = create_profile_store(config, timeout, env)?;

    // Step 4: outer surfaces
    let ramp: Arc<dyn RampPort> = Arc::new(
        TerminalRampLauncher::new(
            non_empty(&config.on_ramp_url),
            non_empty(&config.off_ramp_url),
            settings.network_name.to_lowercase(),
            settings.token.symbol.clone(),
        )
        .map_err(|e| WiringError::Links(format!("{e:#}")))?,
    );

    let deps = AppDeps {
        auth,
        local_store,
        profiles,
        chain,
        wallet_connector,
        ramp,
        notifier: Arc::new(TerminalNotifier),
        clock: Arc::new(SystemClock),
    };

    Ok(Wired { deps, settings })
}
