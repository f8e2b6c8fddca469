//! GitHub REST client.
//!
//! Builds request URLs, enforces the request timeout, checks the status and
//! decodes the body. Every failure is reported as an [`Error`]; turning
//! failures into fallback data is the fetch cache's job.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::transport::HttpTransport;
use super::types::{RepositoryItem, UserProfile};
use crate::error::{Error, Result};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page size the repositories endpoint accepts.
pub const MAX_PER_PAGE: usize = 100;

/// Clamp a requested result count to the range the API accepts.
#[must_use]
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_PER_PAGE)
}

/// Check that a subject key can be used as a single URL path segment.
///
/// # Errors
///
/// Returns [`Error::InvalidSubject`] for empty keys and keys containing
/// whitespace, `/`, `?` or `#`.
pub fn validate_subject(subject: &str) -> Result<()> {
    let invalid = subject.is_empty()
        || subject
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'));

    if invalid {
        return Err(Error::InvalidSubject(subject.to_string()));
    }
    Ok(())
}

/// Read-only client for the user and repository endpoints.
#[derive(Clone)]
pub struct GithubClient {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    timeout: Duration,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("transport", &"<transport>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GithubClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid hierarchical URL.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "API base URL cannot be used as a base: {base_url}"
            )));
        }

        Ok(Self {
            transport,
            base_url,
            timeout,
        })
    }

    /// API root this client talks to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("invalid API base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of the profile endpoint for `subject`.
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is not a valid path segment.
    pub fn user_url(&self, subject: &str) -> Result<Url> {
        validate_subject(subject)?;
        self.endpoint(&["users", subject])
    }

    /// URL of the repositories endpoint for `subject`, sorted by last update.
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is not a valid path segment.
    pub fn repositories_url(&self, subject: &str, limit: usize) -> Result<Url> {
        validate_subject(subject)?;
        let mut url = self.endpoint(&["users", subject, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &clamp_limit(limit).to_string());
        Ok(url)
    }

    /// Fetch a user profile.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, non-2xx status, or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn fetch_user(&self, subject: &str) -> Result<UserProfile> {
        let url = self.user_url(subject)?;
        self.get_json(url).await
    }

    /// Fetch up to `limit` repositories owned by `subject`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, non-2xx status, or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn fetch_repositories(
        &self,
        subject: &str,
        limit: usize,
    ) -> Result<Vec<RepositoryItem>> {
        let url = self.repositories_url(subject, limit)?;
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "requesting");

        let response = tokio::time::timeout(self.timeout, self.transport.get(url.as_str()))
            .await
            .map_err(|_| Error::Timeout(self.timeout.as_secs()))??;

        if !response.is_success() {
            return Err(Error::HttpStatus {
                status: response.status,
                url: url.to_string(),
            });
        }

        serde_json::from_slice(&response.body).map_err(Error::Decode)
    }
}
