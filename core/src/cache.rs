//! In-memory TTL cache for slow-changing reference data.

use moka::future::Cache;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

/// Default lifetime of cached entries.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Default maximum number of cached entries.
pub const DEFAULT_CACHE_CAPACITY: u64 = 1_000;

/// In-memory cache whose entries expire a fixed time after insertion.
///
/// Cloning is cheap; clones share the same entries.
#[derive(Clone)]
pub struct MemoryCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<K, V>,
    ttl: Duration,
}

impl<K, V> MemoryCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache with the given entry lifetime and capacity.
    #[must_use]
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();

        Self { inner, ttl }
    }

    /// Lifetime of each entry.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached value for `key`, if present and not expired.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).await
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub async fn insert(&self, key: K, value: V) {
        self.inner.insert(key, value).await;
    }

    /// Drop the entry for `key`.
    pub async fn invalidate(&self, key: &K) {
        self.inner.invalidate(key).await;
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Return the cached value for `key`, or run `init` and cache its result.
    ///
    /// Concurrent callers for the same missing key share one `init` run.
    /// Only successful results are cached; an error goes to every waiting
    /// caller and the next call runs `init` again.
    ///
    /// # Errors
    ///
    /// Returns whatever error `init` returns.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, init: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: Clone + Send + Sync + 'static,
    {
        self.inner
            .try_get_with(key, init())
            .await
            .map_err(Arc::unwrap_or_clone)
    }
}

impl<K, V> Default for MemoryCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL, DEFAULT_CACHE_CAPACITY)
    }
}

impl<K, V> std::fmt::Debug for MemoryCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_cache_miss_when_no_entry_exists() {
        let cache: MemoryCache<String, u32> = MemoryCache::default();
        assert!(cache.get(&"venues".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_hit_after_insert() {
        let cache = MemoryCache::new(Duration::from_secs(60), 10);
        cache.insert("venues", 3).await;
        assert_eq!(cache.get(&"venues").await, Some(3));

        cache.invalidate(&"venues").await;
        assert!(cache.get(&"venues").await.is_none());
    }

    #[tokio::test]
    async fn test_get_or_try_insert_runs_init_once() {
        let cache = MemoryCache::new(Duration::from_secs(60), 10);
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls = Arc::clone(&calls);
            let value: Result<u32, String> = cache
                .get_or_try_insert_with("locations", || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(42)
                })
                .await;
            assert_eq!(value, Ok(42));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache: MemoryCache<&str, u32> = MemoryCache::new(Duration::from_secs(60), 10);

        let first: Result<u32, String> = cache
            .get_or_try_insert_with("locations", || async { Err("boom".to_string()) })
            .await;
        assert_eq!(first, Err("boom".to_string()));

        let second: Result<u32, String> = cache
            .get_or_try_insert_with("locations", || async { Ok(7) })
            .await;
        assert_eq!(second, Ok(7));
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_init() {
        let cache: MemoryCache<&str, u32> = MemoryCache::new(Duration::from_secs(60), 10);
        let calls = Arc::new(AtomicUsize::new(0));

        let load = || {
            let calls = Arc::clone(&calls);
            cache.get_or_try_insert_with("venues", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok::<_, String>(5)
            })
        };
        let (first, second) = tokio::join!(load(), load());

        assert_eq!(first, Ok(5));
        assert_eq!(second, Ok(5));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clear_drops_every_entry() {
        let cache = MemoryCache::new(Duration::from_secs(60), 10);
        cache.insert("venues", 1).await;
        cache.insert("locations", 2).await;

        cache.clear();

        assert!(cache.get(&"venues").await.is_none());
        assert!(cache.get(&"locations").await.is_none());
        assert_eq!(
            cache.get_or_try_insert_with("venues", || async { Ok::<_, String>(3) }).await,
            Ok(3)
        );
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let cache = MemoryCache::new(Duration::from_millis(100), 10);
        cache.insert("venues", 1).await;
        assert_eq!(cache.get(&"venues").await, Some(1));

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(cache.get(&"venues").await.is_none());
    }
}
