//! Application configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Pairing gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingConfig {
    /// Sign-client gateway base URL.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
}

fn default_gateway_url() -> String {
    "http://127.0.0.1:8100".to_string()
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
        }
    }
}

/// Custody API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustodyConfig {
    /// Custody API base URL.
    #[serde(default = "default_custody_base_url")]
    pub base_url: String,
    /// API key. If unset, loaded from the BRIDGE_CUSTODY_API_KEY env var.
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_custody_base_url() -> String {
    "https://api.fireblocks.io".to_string()
}

impl Default for CustodyConfig {
    fn default() -> Self {
        Self {
            base_url: default_custody_base_url(),
            api_key: None,
        }
    }
}

impl CustodyConfig {
    /// Resolve the API key: config value > BRIDGE_CUSTODY_API_KEY env var.
    pub fn resolve_api_key(&self) -> AppResult<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var("BRIDGE_CUSTODY_API_KEY").map_err(|_| {
            AppError::Config(
                "Custody API key not set (config custody.api_key or BRIDGE_CUSTODY_API_KEY)"
                    .to_string(),
            )
        })
    }
}

/// Recurring order configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersConfig {
    /// Seconds between recurring order firings. Default: 12.
    #[serde(default = "default_order_interval_secs")]
    pub interval_secs: u64,
    /// Legacy behavior: a disconnect cancels every order process-wide
    /// instead of only the disconnected session's orders. Default: false.
    #[serde(default)]
    pub clear_all_on_disconnect: bool,
}

fn default_order_interval_secs() -> u64 {
    12
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_order_interval_secs(),
            clear_all_on_disconnect: false,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listen port.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    /// Chain key resolved to a CAIP-2 identifier at startup.
    #[serde(default = "default_chain")]
    pub chain: String,
    /// Pairing gateway configuration.
    #[serde(default)]
    pub pairing: PairingConfig,
    /// Custody API configuration.
    #[serde(default)]
    pub custody: CustodyConfig,
    /// Recurring order configuration.
    #[serde(default)]
    pub orders: OrdersConfig,
}

fn default_listen_port() -> u16 {
    5000
}

fn default_chain() -> String {
    "goerli".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            chain: default_chain(),
            pairing: PairingConfig::default(),
            custody: CustodyConfig::default(),
            orders: OrdersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}
