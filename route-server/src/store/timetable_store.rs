//! In-process timetable store.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::domain::StopRecord;
use crate::planner::TimetableIndex;

use super::error::StoreError;
use super::filter::StopFilter;
use super::snapshot::SnapshotFile;

#[derive(Debug, Default)]
struct StoreState {
    records: Vec<StopRecord>,
    /// Index over `records`, dropped on every write and rebuilt on demand.
    index: Option<Arc<TimetableIndex>>,
}

/// Thread-safe timetable store.
///
/// Queries never see a half-applied write: each one runs against an
/// `Arc<TimetableIndex>` snapshot that is replaced, not mutated, when the
/// timetable changes.
#[derive(Clone)]
pub struct TimetableStore {
    inner: Arc<RwLock<StoreState>>,
    file: Option<SnapshotFile>,
    page_size: usize,
}

impl TimetableStore {
    /// Open the store, loading the snapshot file if one is configured.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let file = config.snapshot_path.as_ref().map(SnapshotFile::new);

        let records = match &file {
            Some(file) => {
                let records = file.load()?;
                info!(
                    path = %file.path().display(),
                    records = records.len(),
                    "loaded timetable snapshot"
                );
                records
            }
            None => Vec::new(),
        };

        Ok(Self {
            inner: Arc::new(RwLock::new(StoreState {
                records,
                index: None,
            })),
            file,
            page_size: config.page_size,
        })
    }

    /// Create an empty, memory-only store.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreState::default())),
            file: None,
            page_size: StoreConfig::default().page_size,
        }
    }

    /// Insert one stop record.
    pub async fn insert(&self, record: StopRecord) {
        let mut guard = self.inner.write().await;
        guard.records.push(record);
        guard.index = None;
    }

    /// Insert a batch of stop records under a single write lock.
    pub async fn insert_many(&self, records: impl IntoIterator<Item = StopRecord>) {
        let mut guard = self.inner.write().await;
        guard.records.extend(records);
        guard.index = None;
    }

    /// Replace the whole timetable.
    ///
    /// Snapshots taken before the swap keep the old records.
    pub async fn replace_all(&self, records: Vec<StopRecord>) {
        let mut guard = self.inner.write().await;
        guard.records = records;
        guard.index = None;
    }

    /// Remove and return every record, leaving the store empty.
    pub async fn take_all(&self) -> Vec<StopRecord> {
        let mut guard = self.inner.write().await;
        guard.index = None;
        std::mem::take(&mut guard.records)
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }

    /// Immutable index over the current timetable.
    pub async fn snapshot(&self) -> Arc<TimetableIndex> {
        if let Some(index) = &self.inner.read().await.index {
            return index.clone();
        }

        let mut guard = self.inner.write().await;
        // Another task may have rebuilt it while we waited for the lock
        if let Some(index) = &guard.index {
            return index.clone();
        }

        let index = Arc::new(TimetableIndex::new(guard.records.clone()));
        debug!(
            records = index.len(),
            trains = index.train_count(),
            "rebuilt timetable index"
        );
        guard.index = Some(index.clone());
        index
    }

    /// One page of stop records, in store order.
    ///
    /// Page `n` skips `n * page_size` records.
    pub async fn page(&self, page: usize) -> Vec<StopRecord> {
        let guard = self.inner.read().await;
        guard
            .records
            .iter()
            .skip(page.saturating_mul(self.page_size))
            .take(self.page_size)
            .cloned()
            .collect()
    }

    /// All records matching a field filter, in store order.
    pub async fn search(&self, filter: &StopFilter) -> Vec<StopRecord> {
        let guard = self.inner.read().await;
        guard
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    /// Write the current timetable to the snapshot file, if configured.
    ///
    /// Returns the number of records written.
    pub async fn persist(&self) -> Result<usize, StoreError> {
        let Some(file) = self.file.clone() else {
            return Ok(0);
        };

        let records = self.inner.read().await.records.clone();
        let count = records.len();

        tokio::task::spawn_blocking(move || file.save(&records))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))??;

        info!(records = count, "persisted timetable snapshot");
        Ok(count)
    }
}
