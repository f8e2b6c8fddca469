//! Error types for ghfolio-core.
//!
//! This module defines the canonical error type for the library. Fetch
//! failures are only ever surfaced by the GitHub client; the fetch cache
//! absorbs them and substitutes fallback data.

use std::path::PathBuf;

/// Coarse classification of an [`Error`], used when logging absorbed failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced a response (unreachable, DNS, timeout).
    Transport,
    /// A response arrived but was unusable (non-2xx status, malformed body).
    Response,
    /// The request was rejected before being sent (bad subject, bad URL).
    Request,
    /// Local failure unrelated to the remote API (config, I/O).
    Local,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Transport => "transport",
            Self::Response => "response",
            Self::Request => "request",
            Self::Local => "local",
        };
        f.write_str(label)
    }
}

/// The main error type for ghfolio-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP request could not be completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Request timeout.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// The API answered with a non-success status.
    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus {
        /// Numeric status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Subject key cannot be used as a path segment.
    #[error("invalid subject key: {0:?}")]
    InvalidSubject(String),

    /// URL could not be built or parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Invalid configuration values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Classify this error for logging.
    #[must_use]
    pub const fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) | Self::Timeout(_) => FailureKind::Transport,
            Self::HttpStatus { .. } | Self::Decode(_) => FailureKind::Response,
            Self::InvalidSubject(_) | Self::InvalidUrl(_) => FailureKind::Request,
            Self::Config(_)
            | Self::ConfigNotFound(_)
            | Self::InvalidConfig(_)
            | Self::Io(_)
            | Self::Toml(_)
            | Self::TomlSerialize(_) => FailureKind::Local,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// A specialized Result type for ghfolio-core operations.
pub type Result<T> = std::result::Result<T, Error>;
