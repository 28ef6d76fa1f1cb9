//! Ingestion error types.

use std::path::PathBuf;

use crate::store::StoreError;

/// Errors that abort a timetable ingestion run.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The CSV file could not be opened
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The CSV reader failed (I/O or malformed quoting)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row does not describe a valid stop
    #[error("line {line}: {message}")]
    Row { line: u64, message: String },

    /// An insert task panicked or was cancelled
    #[error("insert task failed: {0}")]
    Task(String),

    /// Persisting the ingested timetable failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IngestError::Row {
            line: 42,
            message: "expected 12 columns, found 11".into(),
        };
        assert_eq!(err.to_string(), "line 42: expected 12 columns, found 11");

        let err = IngestError::Task("task panicked".into());
        assert_eq!(err.to_string(), "insert task failed: task panicked");

        let err = IngestError::from(StoreError::Task("join".into()));
        assert_eq!(err.to_string(), "store task failed: join");
    }
}
