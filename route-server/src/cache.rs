//! Caching layer for route query responses.
//!
//! Query results are a pure function of the timetable and the station pair,
//! so a response stays valid until the timetable changes. Entries also
//! expire after a TTL; ingestion clears the whole cache.
//!
//! Keys carry the cache generation current when the request started. A
//! query that was already running when the cache was cleared stores its
//! stale body under the old generation, where no later request looks.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::future::Cache as MokaCache;

use crate::config::CacheConfig;

/// Which report a cached response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Nearest/farthest by distance
    Distance,
    /// Fastest-first by travel time
    Duration,
}

/// Cache key: (generation, query kind, origin station name, destination
/// station name).
pub type QueryKey = (u64, QueryKind, String, String);

/// Cached response body, already serialized to JSON.
pub type CachedBody = Arc<serde_json::Value>;

/// Cache for route query responses.
pub struct QueryCache {
    responses: MokaCache<QueryKey, CachedBody>,

    /// Bumped by every `invalidate_all`.
    generation: AtomicU64,
}

impl QueryCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let responses = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            responses,
            generation: AtomicU64::new(0),
        }
    }

    /// Build a cache key for a station pair in the current generation.
    ///
    /// Take the key before reading the timetable the response is built from.
    pub fn key(&self, kind: QueryKind, origin: &str, destination: &str) -> QueryKey {
        (
            self.generation.load(Ordering::Acquire),
            kind,
            origin.to_string(),
            destination.to_string(),
        )
    }

    /// Get a cached response.
    pub async fn get(&self, key: &QueryKey) -> Option<CachedBody> {
        self.responses.get(key).await
    }

    /// Insert a response into the cache.
    pub async fn insert(&self, key: QueryKey, body: CachedBody) {
        self.responses.insert(key, body).await;
    }

    /// Number of cached responses (for monitoring).
    ///
    /// Moka applies writes lazily, so this may lag recent inserts.
    pub fn entry_count(&self) -> u64 {
        self.responses.entry_count()
    }

    /// Invalidate all cached responses.
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.responses.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn cache() -> QueryCache {
        QueryCache::new(&CacheConfig::default())
    }

    #[tokio::test]
    async fn insert_and_get() {
        let cache = cache();
        let key = cache.key(QueryKind::Distance, "A", "C");
        assert!(cache.get(&key).await.is_none());

        cache.insert(key.clone(), Arc::new(json!({"count": 1}))).await;
        let hit = cache.get(&key).await.unwrap();
        assert_eq!(hit["count"], 1);
    }

    #[tokio::test]
    async fn kinds_do_not_collide() {
        let cache = cache();
        cache
            .insert(
                cache.key(QueryKind::Distance, "A", "C"),
                Arc::new(json!("distance")),
            )
            .await;

        let duration_key = cache.key(QueryKind::Duration, "A", "C");
        assert!(cache.get(&duration_key).await.is_none());

        let reversed = cache.key(QueryKind::Distance, "C", "A");
        assert!(cache.get(&reversed).await.is_none());
    }

    #[tokio::test]
    async fn invalidate_all_empties_cache() {
        let cache = cache();
        let key = cache.key(QueryKind::Duration, "A", "C");
        cache.insert(key.clone(), Arc::new(json!([]))).await;
        assert!(cache.get(&key).await.is_some());

        cache.invalidate_all();
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn insert_racing_invalidation_is_not_served() {
        let cache = cache();
        let stale_key = cache.key(QueryKind::Distance, "A", "C");

        cache.invalidate_all();
        cache.insert(stale_key.clone(), Arc::new(json!("stale"))).await;

        let fresh_key = cache.key(QueryKind::Distance, "A", "C");
        assert_ne!(stale_key, fresh_key);
        assert!(cache.get(&fresh_key).await.is_none());
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = QueryCache::new(&CacheConfig {
            ttl: Duration::from_millis(50),
            max_capacity: 10,
        });
        let key = cache.key(QueryKind::Distance, "A", "B");
        cache.insert(key.clone(), Arc::new(json!(null))).await;

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(cache.get(&key).await.is_none());
    }

    #[test]
    fn cache_creation() {
        assert_eq!(cache().entry_count(), 0);
    }
}
