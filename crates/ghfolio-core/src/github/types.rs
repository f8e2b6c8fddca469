//! GitHub REST record types.
//!
//! Only the fields the showcase renders are modelled. Unknown fields in the
//! API payload are ignored so upstream additions never break decoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user profile from `GET /users/{login}`.
///
/// Immutable once fetched; a refetch replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account handle, unique per user.
    pub login: String,
    /// Display name.
    pub name: Option<String>,
    /// Biography text.
    pub bio: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Personal site.
    pub blog: Option<String>,
    /// Avatar image URI.
    #[serde(default)]
    pub avatar_url: String,
    /// Profile page URI.
    #[serde(default)]
    pub html_url: String,
    /// Number of public repositories.
    #[serde(default)]
    pub public_repos: u64,
    /// Number of public gists.
    #[serde(default)]
    pub public_gists: u64,
    /// Number of followers.
    #[serde(default)]
    pub followers: u64,
    /// Number of accounts this user follows.
    #[serde(default)]
    pub following: u64,
    /// Account creation time.
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Name to show in headings: the display name when set, the login otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

/// A repository from `GET /users/{login}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryItem {
    /// Repository id, unique across GitHub.
    pub id: u64,
    /// Short repository name.
    pub name: String,
    /// Description text.
    pub description: Option<String>,
    /// Repository page URI.
    #[serde(default)]
    pub html_url: String,
    /// Project homepage, if the owner set one.
    pub homepage: Option<String>,
    /// Primary language as detected by GitHub.
    pub language: Option<String>,
    /// Star count.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Fork count.
    #[serde(default)]
    pub forks_count: u64,
    /// Watcher count.
    #[serde(default)]
    pub watchers_count: u64,
    /// Topic labels.
    #[serde(default)]
    pub topics: Vec<String>,
    /// Whether this repository is a fork.
    #[serde(default)]
    pub fork: bool,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepositoryItem {
    /// Homepage link, ignoring the empty string GitHub returns for "unset".
    #[must_use]
    pub fn homepage_link(&self) -> Option<&str> {
        self.homepage
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }

    /// At most `max` topics, in API order.
    #[must_use]
    pub fn display_topics(&self, max: usize) -> &[String] {
        &self.topics[..self.topics.len().min(max)]
    }
}

/// Order repositories by star count, highest first.
///
/// The sort is stable: repositories with equal stars keep their API order.
pub fn sort_by_stars(items: &mut [RepositoryItem]) {
    items.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
}
