//! # ghfolio-core
//!
//! Data layer for a GitHub portfolio: a memoizing fetch cache in front of the
//! GitHub REST API and a rotation engine that cycles a bounded window over
//! the fetched repositories.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`github`] - Record types, HTTP transport and API client
//! - [`cache`] - Memoizing, failure-absorbing fetch cache
//! - [`rotation`] - Cyclic window engine and its timer-driven driver
//! - [`config`] - Configuration types and loading
//! - [`error`] - Error types for the library
//!
//! ## Example
//!
//! ```rust,ignore
//! use ghfolio_core::{FolioConfig, Portfolio, RotationDriver, RotationEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ghfolio_core::Error> {
//!     let config = FolioConfig::load()?;
//!     let cache = ghfolio_core::connect(&config)?;
//!     let portfolio = Portfolio::load(&cache, &config.profile.subject, 6).await;
//!
//!     let engine = RotationEngine::with_items(portfolio.repositories, 3);
//!     let handle = RotationDriver::spawn(engine, config.rotation.interval());
//!     println!("{:?}", handle.snapshot().visible());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod rotation;

use std::sync::Arc;

pub use cache::{FetchCache, FetchSource, Fetched};
pub use config::FolioConfig;
pub use error::{Error, Result};
pub use github::{GithubClient, RepositoryItem, ReqwestTransport, UserProfile};
pub use rotation::{RotationDriver, RotationEngine, RotationHandle, RotationSnapshot, RotationState};

/// Build a fetch cache from configuration.
///
/// Uses the real HTTP transport, attaching the token from `api.token_env`
/// when that variable is set.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the base URL is
/// unusable.
pub fn connect(config: &FolioConfig) -> Result<FetchCache> {
    let token = config.api.token();
    tracing::debug!(
        base_url = %config.api.base_url,
        authenticated = token.is_some(),
        "building GitHub client"
    );

    let transport = ReqwestTransport::new(&config.api.user_agent, token.as_deref())?;
    let client = GithubClient::new(
        Arc::new(transport),
        &config.api.base_url,
        config.api.timeout(),
    )?;

    Ok(FetchCache::with_options(
        client,
        config.cache.ttl(),
        config.cache.single_flight,
    ))
}

/// A profile and its repositories, ready to hand to a rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portfolio {
    /// The subject's profile.
    pub profile: UserProfile,
    /// Repositories, most-starred first.
    pub repositories: Vec<RepositoryItem>,
    /// Whether any part is placeholder data.
    pub degraded: bool,
}

impl Portfolio {
    /// Fetch the profile and up to `limit` repositories for `subject`, then
    /// order repositories by stars.
    ///
    /// Never fails: unavailable parts are replaced with placeholder data and
    /// flagged through [`Portfolio::degraded`].
    pub async fn load(cache: &FetchCache, subject: &str, limit: usize) -> Self {
        let (profile, repositories) = tokio::join!(
            cache.lookup_user(subject),
            cache.lookup_repositories(subject, limit)
        );

        let degraded = profile.is_fallback() || repositories.is_fallback();
        let mut repositories = repositories.into_value();
        github::sort_by_stars(&mut repositories);

        tracing::debug!(
            subject,
            repositories = repositories.len(),
            degraded,
            "portfolio loaded"
        );

        Self {
            profile: profile.into_value(),
            repositories,
            degraded,
        }
    }
}
