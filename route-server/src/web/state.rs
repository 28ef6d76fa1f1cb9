//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::QueryCache;
use crate::config::{CacheConfig, IngestConfig};
use crate::ingest::{IngestError, ingest_file};
use crate::store::TimetableStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Timetable records and query snapshots
    pub store: TimetableStore,

    /// Cached route query responses
    pub cache: Arc<QueryCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: TimetableStore, cache: QueryCache) -> Self {
        Self {
            store,
            cache: Arc::new(cache),
        }
    }

    /// State over an empty in-memory store with default caching.
    pub fn in_memory() -> Self {
        Self::new(
            TimetableStore::in_memory(),
            QueryCache::new(&CacheConfig::default()),
        )
    }

    /// Load a timetable CSV into the store.
    ///
    /// Cached responses were computed against the old timetable, so the
    /// cache is cleared once the rows are in.
    pub async fn ingest(&self, config: &IngestConfig) -> Result<usize, IngestError> {
        let inserted = ingest_file(&self.store, config).await?;
        self.cache.invalidate_all();
        Ok(inserted)
    }
}
