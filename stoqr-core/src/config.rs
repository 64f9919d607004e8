//! Client configuration
//!
//! Values come from three layers, lowest priority first:
//! built-in defaults, an optional TOML file, and explicit overrides
//! (command-line flags / environment, applied by the binary).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// HTTP method used for the withdraw endpoint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawMethod {
    /// What the deployed API accepts
    #[default]
    Get,
    Post,
}

impl FromStr for WithdrawMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(WithdrawMethod::Get),
            "post" => Ok(WithdrawMethod::Post),
            other => Err(ConfigError::Invalid(format!(
                "withdraw method must be 'get' or 'post', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for WithdrawMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WithdrawMethod::Get => write!(f, "get"),
            WithdrawMethod::Post => write!(f, "post"),
        }
    }
}

/// Resolved configuration used by the API client and the UI
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the items API, e.g. `http://localhost:8080/api`
    pub api_url: String,
    /// Base URL of the client that QR codes point at
    pub public_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    pub withdraw_method: WithdrawMethod,
    /// Auto-refresh interval for the item list (None = disabled)
    pub refresh: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            public_url: DEFAULT_PUBLIC_URL.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            withdraw_method: WithdrawMethod::default(),
            refresh: None,
        }
    }
}

/// On-disk configuration; every field is optional
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub public_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub withdraw_method: Option<WithdrawMethod>,
    pub refresh_secs: Option<u64>,
}

impl FileConfig {
    /// `<config_dir>/stoqr/config.toml`, falling back to the working directory
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("stoqr").join("config.toml")
    }

    /// Parse a config file. A missing file yields the empty config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl ClientConfig {
    /// Overlay file values on top of the defaults
    pub fn from_file(file: FileConfig) -> Self {
        let mut config = Self::default();
        config.apply(file);
        config
    }

    /// Overlay every value present in `layer`
    pub fn apply(&mut self, layer: FileConfig) {
        if let Some(api_url) = layer.api_url {
            self.api_url = api_url;
        }
        if let Some(public_url) = layer.public_url {
            self.public_url = public_url;
        }
        if let Some(ms) = layer.timeout_ms {
            self.timeout = Duration::from_millis(ms);
        }
        if let Some(method) = layer.withdraw_method {
            self.withdraw_method = method;
        }
        if let Some(secs) = layer.refresh_secs {
            self.refresh = (secs > 0).then(|| Duration::from_secs(secs));
        }
    }

    /// Check URLs and timeout, normalising trailing slashes
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.api_url = normalize_base(&self.api_url, "api_url")?;
        self.public_url = normalize_base(&self.public_url, "public_url")?;

        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout must be positive".into()));
        }

        Ok(self)
    }
}

fn normalize_base(raw: &str, field: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ConfigError::Invalid(format!("{} '{}': {}", field, raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid(format!(
            "{} must use http or https, got '{}'",
            field,
            url.scheme()
        )));
    }

    Ok(trimmed.to_string())
}
