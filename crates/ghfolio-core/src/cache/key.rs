//! Cache keys.

use std::fmt;

/// Identifies one memoized query.
///
/// Repository listings with different limits are different queries and
/// therefore different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Profile of a subject.
    User(String),
    /// Repository listing of a subject, capped at `limit` items.
    Repositories {
        /// Subject key.
        subject: String,
        /// Requested (already clamped) result count.
        limit: usize,
    },
}

impl CacheKey {
    /// Key for a profile lookup.
    #[must_use]
    pub fn user(subject: &str) -> Self {
        Self::User(subject.to_string())
    }

    /// Key for a repository listing.
    #[must_use]
    pub fn repositories(subject: &str, limit: usize) -> Self {
        Self::Repositories {
            subject: subject.to_string(),
            limit,
        }
    }

    /// Subject this key refers to.
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            Self::User(subject) | Self::Repositories { subject, .. } => subject,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(subject) => write!(f, "user:{subject}"),
            Self::Repositories { subject, limit } => write!(f, "repos:{subject}:{limit}"),
        }
    }
}
