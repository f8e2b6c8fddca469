//! Placeholder records served when the API cannot be reached.

use super::types::{RepositoryItem, UserProfile};

/// Maximum number of placeholder repositories.
const MAX_PLACEHOLDER_REPOS: usize = 6;

const PLACEHOLDER_BIO: &str = "Software Developer & GitHub Enthusiast";
const PLACEHOLDER_AVATAR: &str = "/placeholder.svg?height=400&width=400";
const PLACEHOLDER_DESCRIPTION: &str = "Project description will appear here once loaded.";
const PLACEHOLDER_LANGUAGE: &str = "JavaScript";

/// Builds the default profile and repository list for a subject.
///
/// The output is deterministic for a given subject so that callers (and
/// tests) can compare against it exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackData {
    subject: String,
}

impl FallbackData {
    /// Create fallback data for the given subject key.
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    /// Subject this fallback was built for.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    fn profile_url(&self) -> String {
        format!("https://github.com/{}", self.subject)
    }

    /// The default profile.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            login: self.subject.clone(),
            name: Some(self.subject.clone()),
            bio: Some(PLACEHOLDER_BIO.to_string()),
            location: None,
            company: None,
            blog: None,
            avatar_url: PLACEHOLDER_AVATAR.to_string(),
            html_url: self.profile_url(),
            public_repos: 10,
            public_gists: 0,
            followers: 5,
            following: 0,
            created_at: None,
        }
    }

    /// The default repository list for a query of `limit` items.
    #[must_use]
    pub fn repositories(&self, limit: usize) -> Vec<RepositoryItem> {
        (0..limit.min(MAX_PLACEHOLDER_REPOS))
            .map(|index| RepositoryItem {
                id: index as u64,
                name: format!("Project {}", index + 1),
                description: Some(PLACEHOLDER_DESCRIPTION.to_string()),
                html_url: self.profile_url(),
                homepage: None,
                language: Some(PLACEHOLDER_LANGUAGE.to_string()),
                stargazers_count: 0,
                forks_count: 0,
                watchers_count: 0,
                topics: Vec::new(),
                fork: false,
                updated_at: None,
            })
            .collect()
    }
}
