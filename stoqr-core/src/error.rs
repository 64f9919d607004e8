//! Error types for API requests and configuration

use std::path::PathBuf;

use thiserror::Error;

/// Classified failure of a single API request.
///
/// Errors are cloneable so they can travel inside result actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The requested item does not exist (404)
    #[error("Item not found")]
    NotFound,

    /// The server rejected the request (4xx other than 404)
    #[error("Rejected by server ({status}): {message}")]
    Validation { status: u16, message: String },

    /// The server failed to handle the request (5xx)
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// No response within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Connection, DNS or transport failure
    #[error("API unreachable: {0}")]
    Unreachable(String),

    /// Response body was not the expected JSON
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Request URL could not be built from the base URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client itself could not be set up (TLS backend, resolver)
    #[error("HTTP client unavailable: {0}")]
    Client(String),
}

impl ApiError {
    /// Classify an HTTP status that is not a success
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => ApiError::NotFound,
            400..=499 => ApiError::Validation { status, message },
            _ => ApiError::Server { status, message },
        }
    }

    /// Stable tag for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound => "not_found",
            ApiError::Validation { .. } => "validation",
            ApiError::Server { .. } => "server_error",
            ApiError::Timeout => "timeout",
            ApiError::Unreachable(_) => "unreachable",
            ApiError::Decode(_) => "decode",
            ApiError::InvalidUrl(_) => "invalid_url",
            ApiError::Client(_) => "client",
        }
    }

    /// Whether a mutation that failed this way may still have been applied.
    ///
    /// Only a 4xx answer or a request that could not be built proves that
    /// nothing changed.
    pub fn may_have_applied(&self) -> bool {
        matches!(
            self,
            ApiError::Server { .. } | ApiError::Timeout | ApiError::Unreachable(_) | ApiError::Decode(_)
        )
    }

    /// Whether the user can act on this error (fix input, pick another item)
    pub fn is_user_facing(&self) -> bool {
        matches!(self, ApiError::NotFound | ApiError::Validation { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if let Some(status) = err.status() {
            ApiError::from_status(status.as_u16(), err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidUrl(err.to_string())
        } else {
            ApiError::Unreachable(err.to_string())
        }
    }
}

/// Errors that can occur when loading client configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
