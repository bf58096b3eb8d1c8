/// Endpoint and credential configuration for the Binance REST API.
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::BinanceError;

pub const API_KEY_VAR: &str = "BINANCE_API_KEY";
pub const API_SECRET_VAR: &str = "BINANCE_API_SECRET";
pub const API_BASE_VAR: &str = "BINANCE_API_BASE";

/// Supported Binance spot environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Testnet,
}

impl Environment {
    pub fn api_base(&self) -> &'static str {
        match self {
            Environment::Production => "https://api.binance.com",
            Environment::Testnet => "https://testnet.binance.vision",
        }
    }
}

fn default_api_base() -> String {
    Environment::Production.api_base().to_string()
}

/// REST base URL plus optional API credentials.
///
/// Fixed once handed to a repository; the client never mutates it.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    /// `recvWindow` in milliseconds sent with signed requests.
    #[serde(default)]
    pub recv_window: Option<u64>,
}

impl ClientConfig {
    /// Public (unauthenticated) configuration for an environment.
    pub fn from_environment(environment: Environment) -> Self {
        Self {
            api_base: environment.api_base().to_string(),
            api_key: None,
            api_secret: None,
            recv_window: None,
        }
    }

    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        self.api_key = Some(api_key.into());
        self.api_secret = Some(api_secret.into());
        self
    }

    pub fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window = Some(recv_window_ms);
        self
    }

    /// Read `BINANCE_API_KEY`, `BINANCE_API_SECRET` and `BINANCE_API_BASE`.
    ///
    /// Missing credentials yield a public configuration; a missing base URL
    /// falls back to production.
    pub fn from_env() -> Self {
        Self {
            api_base: std::env::var(API_BASE_VAR).unwrap_or_else(|_| default_api_base()),
            api_key: std::env::var(API_KEY_VAR).ok(),
            api_secret: std::env::var(API_SECRET_VAR).ok(),
            recv_window: None,
        }
    }

    /// Load a JSON configuration file.
    ///
    /// ```json
    /// { "api_key": "...", "api_secret": "...", "api_base": "https://testnet.binance.vision" }
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BinanceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            BinanceError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            BinanceError::Config(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    /// True when both an API key and secret are present, i.e. signed
    /// endpoints can be called. Purely local; no network access.
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.api_key) && present(&self.api_secret)
    }

    /// Parse `api_base`, rejecting anything that is not an absolute http(s) URL.
    pub fn base_url(&self) -> Result<url::Url, BinanceError> {
        let url = url::Url::parse(&self.api_base)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(BinanceError::Config(format!(
                "Unsupported scheme '{other}' in api_base {}",
                self.api_base
            ))),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_environment(Environment::Production)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("recv_window", &self.recv_window)
            .finish()
    }
}
