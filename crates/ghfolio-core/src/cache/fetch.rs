//! Memoizing front for the GitHub client.
//!
//! Every lookup resolves to a value: a cached one, a freshly fetched one, or
//! the fallback for the subject. Failures are logged and never cached, so
//! the next lookup for the same key goes back to the network.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::key::CacheKey;
use super::store::MemoStore;
use crate::error::Result;
use crate::github::{FallbackData, GithubClient, RepositoryItem, UserProfile, clamp_limit};

/// Where a looked-up value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    /// Served from the cache without a request.
    Cache,
    /// Fetched from the API (possibly by a concurrent caller).
    Network,
    /// The request failed; the value is placeholder data.
    Fallback,
}

/// A looked-up value and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    /// The value.
    pub value: T,
    /// Where it came from.
    pub source: FetchSource,
}

impl<T> Fetched<T> {
    const fn new(value: T, source: FetchSource) -> Self {
        Self { value, source }
    }

    /// Whether this is placeholder data.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == FetchSource::Fallback
    }

    /// Discard the origin.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// A request in flight. `None` once resolved means the request failed.
type Pending<V> = Shared<BoxFuture<'static, Option<V>>>;

/// A spawned request and the id that lets it clear its own pending entry.
struct Flight<V> {
    id: u64,
    result: Pending<V>,
}

/// Cached values of one kind plus the requests currently fetching them.
struct Slot<V> {
    store: Mutex<MemoStore<V>>,
    pending: Mutex<HashMap<CacheKey, Flight<V>>>,
}

impl<V: Clone> Slot<V> {
    fn new(ttl: Option<Duration>) -> Self {
        Self {
            store: Mutex::new(MemoStore::new(ttl)),
            pending: Mutex::new(HashMap::new()),
        }
    }

    async fn cached(&self, key: &CacheKey, clock: &dyn Clock) -> Option<V> {
        self.store.lock().await.get(key, clock.now()).cloned()
    }
}

/// Memoizing, failure-absorbing access to user profiles and repositories.
///
/// With single-flight enabled (the default), concurrent lookups of the same
/// key share one request.
pub struct FetchCache {
    client: GithubClient,
    clock: Arc<dyn Clock>,
    single_flight: bool,
    next_flight: AtomicU64,
    users: Arc<Slot<UserProfile>>,
    repositories: Arc<Slot<Vec<RepositoryItem>>>,
}

impl std::fmt::Debug for FetchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCache")
            .field("client", &self.client)
            .field("clock", &self.clock)
            .field("single_flight", &self.single_flight)
            .finish_non_exhaustive()
    }
}

impl FetchCache {
    /// Create a process-lifetime cache in front of `client`.
    #[must_use]
    pub fn new(client: GithubClient) -> Self {
        Self::with_options(client, None, true)
    }

    /// Create a cache with an optional entry TTL and single-flight toggle.
    #[must_use]
    pub fn with_options(client: GithubClient, ttl: Option<Duration>, single_flight: bool) -> Self {
        Self {
            client,
            clock: Arc::new(SystemClock),
            single_flight,
            next_flight: AtomicU64::new(0),
            users: Arc::new(Slot::new(ttl)),
            repositories: Arc::new(Slot::new(ttl)),
        }
    }

    /// Replace the time source used for expiry.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The underlying API client.
    #[must_use]
    pub const fn client(&self) -> &GithubClient {
        &self.client
    }

    /// Profile for `subject`, or the fallback profile if it cannot be fetched.
    pub async fn get_user(&self, subject: &str) -> UserProfile {
        self.lookup_user(subject).await.into_value()
    }

    /// Like [`get_user`](Self::get_user), also reporting where the value came from.
    pub async fn lookup_user(&self, subject: &str) -> Fetched<UserProfile> {
        let client = self.client.clone();
        let owned = subject.to_string();
        let fetch = async move { client.fetch_user(&owned).await };

        match self.resolve(&self.users, CacheKey::user(subject), fetch).await {
            Some(fetched) => fetched,
            None => Fetched::new(
                FallbackData::new(subject).profile(),
                FetchSource::Fallback,
            ),
        }
    }

    /// Up to `limit` repositories for `subject`, or fallback repositories.
    ///
    /// `limit` is clamped to `1..=100`; the clamped value is part of the key.
    pub async fn get_repositories(&self, subject: &str, limit: usize) -> Vec<RepositoryItem> {
        self.lookup_repositories(subject, limit).await.into_value()
    }

    /// Like [`get_repositories`](Self::get_repositories), also reporting
    /// where the value came from.
    pub async fn lookup_repositories(
        &self,
        subject: &str,
        limit: usize,
    ) -> Fetched<Vec<RepositoryItem>> {
        let limit = clamp_limit(limit);
        let client = self.client.clone();
        let owned = subject.to_string();
        let fetch = async move { client.fetch_repositories(&owned, limit).await };

        let key = CacheKey::repositories(subject, limit);
        match self.resolve(&self.repositories, key, fetch).await {
            Some(fetched) => fetched,
            None => Fetched::new(
                FallbackData::new(subject).repositories(limit),
                FetchSource::Fallback,
            ),
        }
    }

    /// Forget the cached profile for `subject`.
    pub async fn invalidate_user(&self, subject: &str) -> bool {
        self.users
            .store
            .lock()
            .await
            .remove(&CacheKey::user(subject))
            .is_some()
    }

    /// Forget the cached repository listing for `(subject, limit)`.
    pub async fn invalidate_repositories(&self, subject: &str, limit: usize) -> bool {
        let key = CacheKey::repositories(subject, clamp_limit(limit));
        self.repositories.store.lock().await.remove(&key).is_some()
    }

    /// Forget everything.
    pub async fn clear(&self) {
        self.users.store.lock().await.clear();
        self.repositories.store.lock().await.clear();
    }

    /// Number of live cached values across both kinds.
    pub async fn cached_entries(&self) -> usize {
        let now = self.clock.now();
        let mut users = self.users.store.lock().await;
        users.purge_expired(now);
        let mut repositories = self.repositories.store.lock().await;
        repositories.purge_expired(now);
        users.len() + repositories.len()
    }

    async fn resolve<V, Fut>(
        &self,
        slot: &Arc<Slot<V>>,
        key: CacheKey,
        fetch: Fut,
    ) -> Option<Fetched<V>>
    where
        V: Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        if let Some(value) = slot.cached(&key, self.clock.as_ref()).await {
            debug!(key = %key, "cache hit");
            return Some(Fetched::new(value, FetchSource::Cache));
        }

        let outcome = if self.single_flight {
            let flight = {
                let mut pending = slot.pending.lock().await;
                // A flight may have landed between the first check and this lock.
                if let Some(value) = slot.cached(&key, self.clock.as_ref()).await {
                    debug!(key = %key, "cache hit");
                    return Some(Fetched::new(value, FetchSource::Cache));
                }
                if let Some(existing) = pending.get(&key) {
                    debug!(key = %key, "joining in-flight request");
                    existing.result.clone()
                } else {
                    let id = self.next_flight.fetch_add(1, Ordering::Relaxed);
                    // The request runs on its own task so it completes, stores
                    // and clears its entry even if every waiter goes away.
                    let task = tokio::spawn(fly(
                        Arc::clone(slot),
                        Arc::clone(&self.clock),
                        key.clone(),
                        id,
                        fetch,
                    ));
                    let result = async move { task.await.ok().flatten() }.boxed().shared();
                    pending.insert(
                        key.clone(),
                        Flight {
                            id,
                            result: result.clone(),
                        },
                    );
                    result
                }
            };
            flight.await
        } else {
            let outcome = absorb_failure(key.clone(), fetch).await;
            if let Some(value) = &outcome {
                self.store(slot, &key, value.clone()).await;
            }
            outcome
        };

        outcome.map(|value| Fetched::new(value, FetchSource::Network))
    }

    async fn store<V: Clone>(&self, slot: &Slot<V>, key: &CacheKey, value: V) {
        slot.store
            .lock()
            .await
            .insert(key.clone(), value, self.clock.now());
    }
}

/// Run one shared request to completion: store a success, then drop the
/// pending entry if it still belongs to this flight.
async fn fly<V, Fut>(
    slot: Arc<Slot<V>>,
    clock: Arc<dyn Clock>,
    key: CacheKey,
    id: u64,
    fetch: Fut,
) -> Option<V>
where
    V: Clone,
    Fut: Future<Output = Result<V>>,
{
    let outcome = absorb_failure(key.clone(), fetch).await;
    if let Some(value) = &outcome {
        slot.store
            .lock()
            .await
            .insert(key.clone(), value.clone(), clock.now());
    }

    let mut pending = slot.pending.lock().await;
    if pending.get(&key).is_some_and(|flight| flight.id == id) {
        pending.remove(&key);
    }
    outcome
}

async fn absorb_failure<V, Fut>(key: CacheKey, fetch: Fut) -> Option<V>
where
    Fut: Future<Output = Result<V>>,
{
    match fetch.await {
        Ok(value) => {
            info!(key = %key, "fetched from API");
            Some(value)
        }
        Err(err) => {
            warn!(
                key = %key,
                kind = %err.failure_kind(),
                error = %err,
                "fetch failed, serving fallback"
            );
            None
        }
    }
}
