//! Concurrent bulk loading of timetable rows into the store.

use std::fs::File;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::config::IngestConfig;
use crate::domain::StopRecord;
use crate::store::TimetableStore;

use super::error::IngestError;
use super::parse::parse_csv;

/// Insert records into the store with bounded concurrency.
///
/// Each record gets its own task, and each task holds a permit from a
/// semaphore owned by this call while it inserts. All tasks are joined
/// before returning, so the store holds every record on success.
pub async fn bulk_insert(
    store: &TimetableStore,
    records: Vec<StopRecord>,
    max_concurrent: usize,
) -> Result<usize, IngestError> {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let count = records.len();

    let mut handles = Vec::with_capacity(count);
    for record in records {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| IngestError::Task("semaphore closed".to_string()))?;
        let store = store.clone();

        handles.push(tokio::spawn(async move {
            store.insert(record).await;
            drop(permit);
        }));
    }

    let mut failures = 0usize;
    for result in join_all(handles).await {
        if let Err(e) = result {
            warn!(error = %e, "insert task failed");
            failures += 1;
        }
    }

    if failures > 0 {
        return Err(IngestError::Task(format!(
            "{failures} of {count} insert tasks failed"
        )));
    }

    Ok(count)
}

/// Replace the store's timetable with the configured CSV and persist the
/// snapshot.
///
/// Rows are inserted into a staging store first and swapped in only once
/// every row has landed, so re-running ingestion never duplicates stops and
/// a failed run leaves the current timetable untouched.
///
/// Returns the number of rows loaded.
pub async fn ingest_file(
    store: &TimetableStore,
    config: &IngestConfig,
) -> Result<usize, IngestError> {
    let started = Instant::now();

    let path = config.csv_path.clone();
    let has_headers = config.has_headers;
    let records = tokio::task::spawn_blocking(move || {
        let file = File::open(&path).map_err(|source| IngestError::Open {
            path: path.clone(),
            source,
        })?;
        parse_csv(file, has_headers)
    })
    .await
    .map_err(|e| IngestError::Task(e.to_string()))??;

    info!(
        path = %config.csv_path.display(),
        rows = records.len(),
        "parsed timetable CSV"
    );

    let staging = TimetableStore::in_memory();
    let inserted = bulk_insert(&staging, records, config.max_concurrent).await?;
    store.replace_all(staging.take_all().await).await;
    store.persist().await?;

    info!(
        rows = inserted,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "timetable ingestion finished"
    );
    Ok(inserted)
}
