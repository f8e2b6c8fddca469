//! Configuration types and loading.
//!
//! This module provides configuration structures for ghfolio: the default
//! subject, API access, cache policy, and rotation behaviour.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::github::{DEFAULT_API_URL, MAX_PER_PAGE};
use crate::rotation::{DEFAULT_PERIOD, DEFAULT_WINDOW_SIZE};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "GHFOLIO_CONFIG";

/// File name looked up in the working directory and the user config dir.
pub const CONFIG_FILE_NAME: &str = "ghfolio.toml";

/// Main configuration for ghfolio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    /// Whose portfolio to show.
    #[serde(default)]
    pub profile: ProfileConfig,

    /// API access.
    #[serde(default)]
    pub api: ApiConfig,

    /// Cache policy.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Rotation behaviour.
    #[serde(default)]
    pub rotation: RotationConfig,
}

/// Subject and query settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    /// Default subject key (account name).
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Number of repositories to request.
    #[serde(default = "default_repo_limit")]
    pub repo_limit: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            subject: default_subject(),
            repo_limit: default_repo_limit(),
        }
    }
}

/// GitHub API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// API root URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `User-Agent` header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Name of an environment variable holding a read-only API token.
    #[serde(default = "default_token_env", skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
            token_env: default_token_env(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Token read from the configured environment variable, if set and non-empty.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        let name = self.token_env.as_deref().filter(|name| !name.is_empty())?;
        std::env::var(name)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

/// Fetch cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Entry lifetime in seconds. Unset means entries live for the process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_seconds: Option<u64>,

    /// Share one request between concurrent lookups of the same key.
    #[serde(default = "default_true")]
    pub single_flight: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: None,
            single_flight: true,
        }
    }
}

impl CacheConfig {
    /// Entry lifetime as a [`Duration`].
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_seconds.map(Duration::from_secs)
    }
}

/// Rotation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotationConfig {
    /// Number of simultaneously visible items.
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Auto-advance period in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            interval_ms: default_interval_ms(),
        }
    }
}

impl RotationConfig {
    /// Auto-advance period as a [`Duration`].
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_subject() -> String {
    "octocat".to_string()
}

const fn default_repo_limit() -> usize {
    6
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_user_agent() -> String {
    format!("ghfolio/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_timeout_seconds() -> u64 {
    10
}

#[allow(clippy::unnecessary_wraps)]
fn default_token_env() -> Option<String> {
    Some("GITHUB_TOKEN".to_string())
}

const fn default_true() -> bool {
    true
}

const fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

#[allow(clippy::cast_possible_truncation)]
const fn default_interval_ms() -> u64 {
    DEFAULT_PERIOD.as_millis() as u64
}

impl FolioConfig {
    /// Load configuration from the default path.
    ///
    /// Default paths checked in order:
    /// 1. `$GHFOLIO_CONFIG` environment variable
    /// 2. `./ghfolio.toml` (current directory)
    /// 3. `~/.config/ghfolio/ghfolio.toml` (Linux/macOS)
    /// 4. `%APPDATA%\ghfolio\ghfolio.toml` (Windows)
    ///
    /// If no configuration file exists, writes a default one to the user's
    /// config directory and returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing an existing config fails.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }

        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Self::load_from(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("ghfolio").join(CONFIG_FILE_NAME);
            if user_config.exists() {
                return Self::load_from(&user_config);
            }

            if let Err(e) = Self::create_default_config_file(&user_config) {
                tracing::warn!(
                    "Failed to create default config at {}: {}",
                    user_config.display(),
                    e
                );
            } else {
                tracing::info!("Created default config at {}", user_config.display());
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist, parsing fails, or a value
    /// is out of range.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ConfigNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;

        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if directory or file creation fails.
    fn create_default_config_file(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_content = toml::to_string_pretty(&Self::default())?;
        std::fs::write(path, toml_content)?;

        Ok(())
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first offending value.
    pub fn validate(&self) -> Result<()> {
        if self.profile.subject.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "profile.subject cannot be empty".to_string(),
            ));
        }
        if !(1..=MAX_PER_PAGE).contains(&self.profile.repo_limit) {
            return Err(Error::InvalidConfig(format!(
                "profile.repo_limit must be between 1 and {MAX_PER_PAGE}, got {}",
                self.profile.repo_limit
            )));
        }
        if Url::parse(&self.api.base_url).is_err() {
            return Err(Error::InvalidConfig(format!(
                "api.base_url is not a valid URL: {}",
                self.api.base_url
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(Error::InvalidConfig(
                "api.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.rotation.window_size == 0 {
            return Err(Error::InvalidConfig(
                "rotation.window_size must be at least 1".to_string(),
            ));
        }
        if self.rotation.interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "rotation.interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
