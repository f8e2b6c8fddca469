//! Keyed value storage with optional time-based expiry.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use super::key::CacheKey;

/// A stored value and the instant it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<V> {
    /// Cached value.
    pub value: V,
    /// When the value was stored.
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, ttl: Option<Duration>, now: Instant) -> bool {
        ttl.is_some_and(|ttl| now.saturating_duration_since(self.stored_at) >= ttl)
    }
}

/// Map from [`CacheKey`] to values.
///
/// Without a TTL entries live as long as the store. With a TTL an entry
/// older than the TTL reads as absent and is evicted on access.
#[derive(Debug)]
pub struct MemoStore<V> {
    entries: HashMap<CacheKey, CacheEntry<V>>,
    ttl: Option<Duration>,
}

impl<V> Default for MemoStore<V> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<V> MemoStore<V> {
    /// Create an empty store.
    #[must_use]
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Get a live entry, evicting it if it has expired.
    pub fn get(&mut self, key: &CacheKey, now: Instant) -> Option<&V> {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(self.ttl, now));
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Store a value, replacing any previous one.
    pub fn insert(&mut self, key: CacheKey, value: V, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: now,
            },
        );
    }

    /// Remove an entry.
    pub fn remove(&mut self, key: &CacheKey) -> Option<V> {
        self.entries.remove(key).map(|entry| entry.value)
    }

    /// Drop all expired entries.
    pub fn purge_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| !entry.is_expired(ttl, now));
    }

    /// Number of stored entries, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
