//! GitHub REST API access.
//!
//! This module provides the record types, the HTTP transport seam, and the
//! client for the two read-only endpoints the showcase needs.

mod client;
mod fallback;
mod transport;
mod types;

pub use client::{DEFAULT_API_URL, GithubClient, MAX_PER_PAGE, clamp_limit, validate_subject};
pub use fallback::FallbackData;
pub use transport::{GITHUB_ACCEPT, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{RepositoryItem, UserProfile, sort_by_stars};
