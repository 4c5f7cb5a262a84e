use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{Result, SlidegateError};

/// Main configuration structure for Slidegate
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Inbound HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound generative API configuration
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Config {
    /// Read and parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SlidegateError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content)
            .map_err(|e| SlidegateError::Config(format!("Failed to parse config: {e}")))
    }

    /// Overlay process environment variables on top of the file config
    pub fn apply_process_env(&mut self) {
        self.apply_env(|name| std::env::var(name).ok());
    }

    /// Overlay environment-style overrides using the given lookup
    ///
    /// Recognized: `PORT`, `GEMINI_BASE_URL`, `GEMINI_API_VERSION` and the
    /// variable named by `provider.api_key_env`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!("Ignoring invalid PORT value '{port}': {e}"),
            }
        }

        if let Some(base_url) = lookup("GEMINI_BASE_URL") {
            self.provider.base_url = base_url;
        }
        self.provider.base_url = self.provider.base_url.trim_end_matches('/').to_string();

        if let Some(version) = lookup("GEMINI_API_VERSION") {
            self.provider.api_version = version.trim().to_string();
        }

        if let Some(key) = lookup(&self.provider.api_key_env) {
            self.provider.api_key = Some(key);
        }
        self.provider.api_key = self
            .provider
            .api_key
            .take()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
    }
}

/// Inbound HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the prebuilt client bundle
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Largest accepted API request body (attachments arrive inline)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Parse `host:port` into a socket address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| SlidegateError::Config(format!("Invalid listen address: {e}")))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_max_body_bytes() -> usize {
    64 * 1024 * 1024
}

/// Generative API (Gemini) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// API base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API version path segment
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// API key; the environment variable named by `api_key_env` wins
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name for the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            api_key: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_version() -> String {
    "v1beta".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}
