//! Short-lived lookup cache with a single shared freshness timestamp
//!
//! The whole cache expires at once: when more than `ttl` has passed since the
//! last write (or clear), the next read wipes every entry before looking up.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;
use tokio::time::Instant;

struct Inner<K, V> {
    entries: HashMap<K, V>,
    /// `None` means "as old as the epoch": the next read treats the cache as stale
    last_update: Option<Instant>,
}

impl<K, V> Inner<K, V> {
    fn is_stale(&self, ttl: Duration) -> bool {
        match self.last_update {
            Some(at) => at.elapsed() > ttl,
            None => true,
        }
    }
}

/// TTL cache keyed by item identifier
pub struct LookupCache<K, V> {
    ttl: Duration,
    inner: Mutex<Inner<K, V>>,
}

impl<K, V> LookupCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                last_update: Some(Instant::now()),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up `key`, clearing the whole cache first if it has gone stale
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock();
        if inner.is_stale(self.ttl) {
            if !inner.entries.is_empty() {
                tracing::trace!(entries = inner.entries.len(), "Lookup cache expired");
            }
            inner.entries.clear();
            return None;
        }
        inner.entries.get(key).cloned()
    }

    /// Insert or overwrite `key`; refreshes freshness of every entry
    pub fn set(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        inner.entries.insert(key, value);
        inner.last_update = Some(Instant::now());
    }

    /// Drop all entries and restart the freshness window
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.last_update = Some(Instant::now());
    }

    /// Drop all entries and mark the cache stale
    pub fn invalidate(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.last_update = None;
    }

    /// Number of entries currently held, stale or not
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(30);

    #[tokio::test(start_paused = true)]
    async fn test_get_within_ttl() {
        let cache = LookupCache::new(TTL);
        cache.set("salmon".to_string(), 12);

        tokio::time::advance(Duration::from_secs(29)).await;
        assert_eq!(cache.get(&"salmon".to_string()), Some(12));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_read_clears_everything() {
        let cache = LookupCache::new(TTL);
        cache.set("salmon".to_string(), 12);
        cache.set("rice".to_string(), 40);

        tokio::time::advance(TTL + Duration::from_millis(1)).await;
        assert_eq!(cache.get(&"salmon".to_string()), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exactly_ttl_is_still_fresh() {
        let cache = LookupCache::new(TTL);
        cache.set("nori", 3);

        tokio::time::advance(TTL).await;
        assert_eq!(cache.get(&"nori"), Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_refreshes_all_entries() {
        let cache = LookupCache::new(TTL);
        cache.set("salmon", 12);

        tokio::time::advance(Duration::from_secs(20)).await;
        cache.set("rice", 40);

        tokio::time::advance(Duration::from_secs(20)).await;
        // 40s after the salmon write, but only 20s after the last write to any key
        assert_eq!(cache.get(&"salmon"), Some(12));
        assert_eq!(cache.get(&"rice"), Some(40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_restarts_window() {
        let cache = LookupCache::new(TTL);
        cache.set("salmon", 12);
        cache.clear();
        assert!(cache.is_empty());

        cache.set("rice", 40);
        assert_eq!(cache.get(&"rice"), Some(40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_forces_stale() {
        let cache: LookupCache<&str, i32> = LookupCache::new(TTL);
        cache.invalidate();
        assert_eq!(cache.get(&"salmon"), None);

        cache.set("salmon", 12);
        assert_eq!(cache.get(&"salmon"), Some(12));
    }
}
