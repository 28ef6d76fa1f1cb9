//! Timetable store error types.

use std::path::PathBuf;

/// Errors that can occur when loading or persisting the timetable.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the snapshot file failed
    #[error("snapshot I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The snapshot file is not valid JSON for a timetable
    #[error("snapshot JSON error at {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A background persistence task panicked or was cancelled
    #[error("store task failed: {0}")]
    Task(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::Io {
            path: PathBuf::from("/data/timetable.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "snapshot I/O error at /data/timetable.json: no such file"
        );

        let err = StoreError::Task("join error".into());
        assert_eq!(err.to_string(), "store task failed: join error");
    }
}
