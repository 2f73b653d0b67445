use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    #[serde(default)]
    pub rotation: LogRotation,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    pub fee: FeeConfig,
    #[serde(default)]
    pub mempool: MempoolConfig,
    /// Human-readable labels accepted in place of asset hex
    #[serde(default)]
    pub assets: Vec<AssetLabelConfig>,
}

/// Log file rotation period
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Privileged route protection
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AdminConfig {
    /// Bearer token required on admin routes. `None` leaves them open.
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FeeConfig {
    /// Hex id of the asset fees are denominated in
    pub reference_asset: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MempoolConfig {
    pub enabled: bool,
}

impl Default for MempoolConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AssetLabelConfig {
    pub label: String,
    pub asset: String,
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        Self::load_from_path(&format!("config/{}.yaml", env))
    }

    pub fn load_from_path(config_path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_string(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: config_path.to_string(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}
