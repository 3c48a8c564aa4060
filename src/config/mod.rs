//! Configuration loading and management
//!
//! Settings come from an optional YAML file (named by `CLUB_API_CONFIG`) with
//! environment variables layered on top. The data-store url and key have no
//! defaults and must be provided by one of the two sources.

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const CONFIG_FILE_VAR: &str = "CLUB_API_CONFIG";
pub const STORE_URL_VAR: &str = "SUPABASE_URL";
pub const STORE_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Connection settings for the external data API
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl StoreConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// The key is a credential, keep it out of logs.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    /// Include raw data-store errors in the `data` member of 500 responses
    #[serde(default)]
    pub expose_upstream_errors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from process environment only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides(|name| std::env::var(name).ok())
    }

    /// YAML file (if `CLUB_API_CONFIG` is set), then environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_FILE_VAR) {
            Ok(path) if !path.is_empty() => Self::from_yaml_file(&path)?,
            _ => Self::default(),
        };
        base.with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Apply variables from `lookup` on top of `self` and check required settings
    ///
    /// Empty variables are treated as unset.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(url) = var(STORE_URL_VAR) {
            self.store.url = url;
        }
        if let Some(key) = var(STORE_KEY_VAR) {
            self.store.api_key = key;
        }
        if let Some(host) = var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(secs) = var("STORE_TIMEOUT_SECS") {
            self.store.request_timeout_secs =
                secs.parse().map_err(|_| ConfigError::InvalidValue {
                    name: "STORE_TIMEOUT_SECS",
                    value: secs.clone(),
                })?;
        }
        if let Some(flag) = var("EXPOSE_UPSTREAM_ERRORS") {
            self.expose_upstream_errors = matches!(flag.as_str(), "true" | "1");
        }

        if self.store.url.is_empty() {
            return Err(ConfigError::MissingVar(STORE_URL_VAR));
        }
        if self.store.api_key.is_empty() {
            return Err(ConfigError::MissingVar(STORE_KEY_VAR));
        }

        Ok(self)
    }
}
