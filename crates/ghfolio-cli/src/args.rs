//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use ghfolio_core::FolioConfig;

/// Rotating GitHub portfolio in the terminal
///
/// Fetches a GitHub profile and its repositories, orders the repositories by
/// stars, and cycles a window over them.
#[derive(Debug, Parser)]
#[command(name = "ghfolio")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// GitHub account to show (overrides the configured subject)
    #[arg(value_name = "USER")]
    pub user: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, searches for ghfolio.toml in:
    /// 1. $GHFOLIO_CONFIG environment variable
    /// 2. Current directory
    /// 3. ~/.config/ghfolio/ghfolio.toml
    #[arg(short, long, value_name = "FILE", env = "GHFOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level
    ///
    /// Valid values: trace, debug, info, warn, error
    #[arg(short, long, default_value = "warn", env = "GHFOLIO_LOG")]
    pub log_level: String,

    /// Output logs as JSON (for structured logging)
    #[arg(long, default_value = "false", env = "GHFOLIO_LOG_JSON")]
    pub log_json: bool,

    /// Number of repositories to fetch
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,

    /// Number of repositories visible at once
    #[arg(short, long, value_name = "N")]
    pub window: Option<usize>,

    /// Auto-advance period in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Stop after this many automatic advances (0 runs until Ctrl-C)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub cycles: u64,

    /// GitHub API base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut FolioConfig) {
        if let Some(user) = &self.user {
            config.profile.subject.clone_from(user);
        }
        if let Some(limit) = self.limit {
            config.profile.repo_limit = limit;
        }
        if let Some(window) = self.window {
            config.rotation.window_size = window;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.rotation.interval_ms = interval_ms;
        }
        if let Some(api_url) = &self.api_url {
            config.api.base_url.clone_from(api_url);
        }
    }
}
