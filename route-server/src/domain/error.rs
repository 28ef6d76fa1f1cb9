//! Domain error types.
//!
//! These errors mean the timetable data itself is malformed. They are
//! distinct from query validation errors and from store/IO errors, and are
//! never retried.

use super::TimeError;

/// Which clock field of a stop failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Arrival,
    Departure,
}

impl std::fmt::Display for TimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeField::Arrival => f.write_str("arrival"),
            TimeField::Departure => f.write_str("departure"),
        }
    }
}

/// Data integrity failures found while building a segment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Cumulative distance decreases along the train's route
    #[error(
        "train {train_no}: distance decreases from {origin_distance} at seq {origin_seq} \
         to {destination_distance} at seq {destination_seq}"
    )]
    NegativeDistance {
        train_no: String,
        origin_seq: u32,
        origin_distance: u32,
        destination_seq: u32,
        destination_distance: u32,
    },

    /// A clock time could not be parsed as HH:MM:SS
    #[error("train {train_no} seq {sequence}: bad {field} time {value:?}: {source}")]
    InvalidTime {
        train_no: String,
        sequence: u32,
        field: TimeField,
        value: String,
        source: TimeError,
    },

    /// Origin and destination stops belong to different trains
    #[error("segment stops belong to different trains ({0} and {1})")]
    TrainMismatch(String, String),

    /// Destination does not come after origin in the route
    #[error("invalid segment: {0}")]
    InvalidSegment(&'static str),
}
