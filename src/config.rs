//! Service configuration

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration, loaded from a YAML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Tabular backend settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the REST backend holding the `jobs` and `edges` tables.
    /// When unset the server runs on the built-in demo dataset.
    pub base_url: Option<String>,
    /// Bearer token for the backend
    pub api_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}
