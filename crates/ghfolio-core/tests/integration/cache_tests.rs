use std::sync::Arc;
use std::time::Duration;

use ghfolio_core::cache::ManualClock;
use ghfolio_core::github::{DEFAULT_API_URL, FallbackData, GithubClient};
use ghfolio_core::{FetchCache, FetchSource};

use crate::common::mock_transport::{MockBehavior, MockTransport};
use crate::common::test_utils::fixture;

const USER_PATH: &str = "/users/octocat";
const REPOS_PATH: &str = "/users/octocat/repos?sort=updated&per_page=6";

#[allow(clippy::unwrap_used)]
fn cache_over(transport: &Arc<MockTransport>, single_flight: bool) -> FetchCache {
    let client = GithubClient::new(transport.clone(), DEFAULT_API_URL, Duration::from_secs(2))
        .unwrap();
    FetchCache::with_options(client, None, single_flight)
}

#[tokio::test]
async fn test_fixture_profile_decodes_and_is_memoized() {
    let transport = Arc::new(MockTransport::new());
    transport.ok(USER_PATH, fixture("user.json"));
    let cache = cache_over(&transport, true);

    let profile = cache.get_user("octocat").await;
    assert_eq!(profile.login, "octocat");
    assert_eq!(profile.display_name(), "The Octocat");
    assert_eq!(profile.public_repos, 8);
    assert_eq!(profile.followers, 21000);
    assert!(profile.created_at.is_some());

    transport.on(USER_PATH, MockBehavior::Respond(500, String::new()));
    assert_eq!(cache.get_user("octocat").await, profile);
    assert_eq!(transport.calls_to(USER_PATH), 1);
}

#[tokio::test]
async fn test_second_repository_lookup_ignores_new_upstream_data() {
    let transport = Arc::new(MockTransport::new());
    transport.ok(REPOS_PATH, fixture("repos.json"));
    let cache = cache_over(&transport, true);

    let first = cache.get_repositories("octocat", 6).await;
    assert_eq!(first.len(), 4);

    transport.ok(REPOS_PATH, "[]");
    let second = cache.get_repositories("octocat", 6).await;
    assert_eq!(second, first);
    assert_eq!(transport.calls_to(REPOS_PATH), 1);
}

#[tokio::test]
async fn test_not_found_falls_back_and_recovers() {
    let transport = Arc::new(MockTransport::new());
    transport.on(
        USER_PATH,
        MockBehavior::Respond(404, r#"{"message":"Not Found"}"#.to_string()),
    );
    let cache = cache_over(&transport, true);

    let first = cache.lookup_user("octocat").await;
    assert_eq!(first.source, FetchSource::Fallback);
    assert_eq!(first.value, FallbackData::new("octocat").profile());
    assert_eq!(cache.cached_entries().await, 0);

    transport.ok(USER_PATH, fixture("user.json"));
    let second = cache.lookup_user("octocat").await;
    assert_eq!(second.source, FetchSource::Network);
    assert_eq!(second.value.display_name(), "The Octocat");
    assert_eq!(transport.calls_to(USER_PATH), 2);
}

#[tokio::test]
async fn test_unreachable_host_falls_back_for_both_kinds() {
    let transport = Arc::new(MockTransport::new());
    let cache = cache_over(&transport, true);
    let fallback = FallbackData::new("octocat");

    assert_eq!(cache.get_user("octocat").await, fallback.profile());
    assert_eq!(
        cache.get_repositories("octocat", 6).await,
        fallback.repositories(6)
    );
    assert_eq!(cache.cached_entries().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_request_times_out_to_fallback() {
    let transport = Arc::new(MockTransport::new());
    transport.on(USER_PATH, MockBehavior::Hang);
    let cache = cache_over(&transport, true);

    let fetched = cache.lookup_user("octocat").await;
    assert!(fetched.is_fallback());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_lookups_share_one_request() {
    let transport = Arc::new(MockTransport::with_delay(Duration::from_millis(200)));
    transport.ok(REPOS_PATH, fixture("repos.json"));
    let cache = cache_over(&transport, true);

    let (a, b, c) = tokio::join!(
        cache.lookup_repositories("octocat", 6),
        cache.lookup_repositories("octocat", 6),
        cache.lookup_repositories("octocat", 6),
    );

    assert_eq!(a.value, b.value);
    assert_eq!(b.value, c.value);
    assert_eq!(transport.calls_to(REPOS_PATH), 1);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_lookups_without_single_flight() {
    let transport = Arc::new(MockTransport::with_delay(Duration::from_millis(200)));
    transport.ok(REPOS_PATH, fixture("repos.json"));
    let cache = cache_over(&transport, false);

    let (a, b) = tokio::join!(
        cache.get_repositories("octocat", 6),
        cache.get_repositories("octocat", 6),
    );

    assert_eq!(a, b);
    assert_eq!(transport.calls_to(REPOS_PATH), 2);
}

#[tokio::test]
async fn test_ttl_expiry_refetches() {
    let transport = Arc::new(MockTransport::new());
    transport.ok(USER_PATH, fixture("user.json"));
    let clock = Arc::new(ManualClock::new());
    #[allow(clippy::unwrap_used)]
    let client =
        GithubClient::new(transport.clone(), DEFAULT_API_URL, Duration::from_secs(2)).unwrap();
    let cache = FetchCache::with_options(client, Some(Duration::from_secs(60)), true)
        .with_clock(clock.clone());

    assert_eq!(cache.lookup_user("octocat").await.source, FetchSource::Network);
    clock.advance(Duration::from_secs(59));
    assert_eq!(cache.lookup_user("octocat").await.source, FetchSource::Cache);
    clock.advance(Duration::from_secs(2));
    assert_eq!(cache.lookup_user("octocat").await.source, FetchSource::Network);
    assert_eq!(transport.calls_to(USER_PATH), 2);
}

#[tokio::test]
async fn test_distinct_subjects_are_distinct_keys() {
    let transport = Arc::new(MockTransport::new());
    transport.ok(USER_PATH, fixture("user.json"));
    transport.ok("/users/hubot", r#"{"login":"hubot","name":"Hubot"}"#);
    let cache = cache_over(&transport, true);

    assert_eq!(cache.get_user("octocat").await.login, "octocat");
    assert_eq!(cache.get_user("hubot").await.login, "hubot");
    assert_eq!(cache.cached_entries().await, 2);

    assert!(cache.invalidate_user("hubot").await);
    assert_eq!(cache.cached_entries().await, 1);
}
