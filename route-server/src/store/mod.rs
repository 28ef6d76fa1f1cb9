//! Timetable storage.
//!
//! Holds the decoded stop records that queries run against, serves the
//! paged listing and field-filter read paths, and optionally persists the
//! timetable to a JSON snapshot file so ingestion survives restarts.

mod error;
mod filter;
mod snapshot;
mod timetable_store;

pub use error::StoreError;
pub use filter::StopFilter;
pub use snapshot::SnapshotFile;
pub use timetable_store::TimetableStore;
