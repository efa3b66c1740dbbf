//! Configuration: session storage keys, expiry leeway and server address
//!
//! Loaded from YAML (`CARREPAIR_CONFIG`) with environment overrides.

use crate::error::CarRepairError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the YAML config file
pub const CONFIG_PATH_ENV: &str = "CARREPAIR_CONFIG";

/// Environment variable overriding the listen address
pub const LISTEN_ADDR_ENV: &str = "CARREPAIR_ADDR";

/// Default listen address for the API server
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8787";

/// Keys under which the persisted session lives in local storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionKeys {
    pub token: String,
    pub refresh_token: String,
    pub user: String,
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self {
            token: "@CarRepair:token".to_string(),
            refresh_token: "@CarRepair:refreshToken".to_string(),
            user: "@CarRepair:user".to_string(),
        }
    }
}

impl SessionKeys {
    /// All keys that make up a session, in removal order
    pub fn all(&self) -> [&str; 3] {
        [&self.token, &self.refresh_token, &self.user]
    }
}

/// Settings for the session token guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GuardConfig {
    pub keys: SessionKeys,
    /// Seconds added to `exp` before comparing with the clock
    pub leeway_seconds: u64,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub listen_addr: String,
    pub session: GuardConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            session: GuardConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a YAML document; missing fields take their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CarRepairError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CarRepairError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CarRepairError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load from `CARREPAIR_CONFIG` (if set), then apply `CARREPAIR_ADDR`
    pub fn from_env() -> Result<Self, CarRepairError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                tracing::info!(path = %path, "loading configuration");
                Self::load(path)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ADDR_ENV) {
            config.listen_addr = addr;
        }

        Ok(config)
    }
}
