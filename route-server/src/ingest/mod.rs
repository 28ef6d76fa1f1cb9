//! Timetable CSV ingestion.
//!
//! Decodes the railway timetable CSV into stop records and loads them into
//! the store with bounded concurrency.

mod error;
mod loader;
mod parse;

pub use error::IngestError;
pub use loader::{bulk_insert, ingest_file};
pub use parse::{parse_csv, parse_row};
