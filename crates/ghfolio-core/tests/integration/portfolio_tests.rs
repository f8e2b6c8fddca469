use std::sync::Arc;
use std::time::Duration;

use ghfolio_core::github::{DEFAULT_API_URL, FallbackData, GithubClient};
use ghfolio_core::{FetchCache, Portfolio};

use crate::common::mock_transport::MockTransport;
use crate::common::test_utils::fixture;

#[allow(clippy::unwrap_used)]
fn cache_over(transport: &Arc<MockTransport>) -> FetchCache {
    FetchCache::new(
        GithubClient::new(transport.clone(), DEFAULT_API_URL, Duration::from_secs(2)).unwrap(),
    )
}

#[tokio::test]
async fn test_repositories_sorted_by_stars() {
    let transport = Arc::new(MockTransport::new());
    transport
        .ok("/users/octocat", fixture("user.json"))
        .ok(
            "/users/octocat/repos?sort=updated&per_page=10",
            fixture("repos.json"),
        );
    let cache = cache_over(&transport);

    let portfolio = Portfolio::load(&cache, "octocat", 10).await;
    assert!(!portfolio.degraded);

    let stars: Vec<u64> = portfolio
        .repositories
        .iter()
        .map(|repo| repo.stargazers_count)
        .collect();
    assert_eq!(stars, vec![12800, 2900, 2900, 120]);
    assert_eq!(portfolio.repositories[1].name, "Hello-World");
}

#[tokio::test]
async fn test_partial_failure_is_degraded() {
    let transport = Arc::new(MockTransport::new());
    transport.ok("/users/octocat", fixture("user.json"));
    let cache = cache_over(&transport);

    let portfolio = Portfolio::load(&cache, "octocat", 6).await;
    assert!(portfolio.degraded);
    assert_eq!(portfolio.profile.display_name(), "The Octocat");
    assert_eq!(
        portfolio.repositories,
        FallbackData::new("octocat").repositories(6)
    );
}

#[tokio::test]
async fn test_invalid_subject_never_reaches_network() {
    let transport = Arc::new(MockTransport::new());
    let cache = cache_over(&transport);

    let portfolio = Portfolio::load(&cache, "not/a/user", 6).await;
    assert!(portfolio.degraded);
    assert_eq!(portfolio.profile.login, "not/a/user");
    assert!(transport.requests().is_empty());
}
