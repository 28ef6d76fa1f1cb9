//! JSON snapshot file for the timetable.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::StopRecord;

use super::error::StoreError;

/// On-disk timetable with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct SavedTimetable {
    /// When the snapshot was written.
    saved_at: DateTime<Utc>,
    /// The stop records, in store order.
    records: Vec<StopRecord>,
}

/// A timetable snapshot file on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Create a handle for the snapshot at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stop records.
    ///
    /// A missing file is an empty timetable; an unreadable or corrupt file
    /// is an error, so bad data is never served as "no trains".
    pub fn load(&self) -> Result<Vec<StopRecord>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let saved: SavedTimetable =
            serde_json::from_str(&contents).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;

        Ok(saved.records)
    }

    /// Write the stop records, replacing any previous snapshot.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, records: &[StopRecord]) -> Result<(), StoreError> {
        let saved = SavedTimetable {
            saved_at: Utc::now(),
            records: records.to_vec(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string(&saved).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Get the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn records() -> Vec<StopRecord> {
        vec![
            StopRecord::new("107", 1, "SWV", "SAWANTWADI R").with_times("00:00:00", "10:25:00"),
            StopRecord::new("107", 2, "THVM", "THIVIM")
                .with_times("11:06:00", "11:08:00")
                .with_distance(51),
        ]
    }

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("timetable.json"));

        file.save(&records()).unwrap();

        let loaded = file.load().unwrap();
        assert_eq!(loaded, records());
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("absent.json"));

        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timetable.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = SnapshotFile::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("timetable.json");
        let file = SnapshotFile::new(&path);

        file.save(&records()).unwrap();
        assert!(path.exists());
        assert_eq!(file.path(), path.as_path());
    }
}
