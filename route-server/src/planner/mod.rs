//! Route query engine.
//!
//! This module answers "which trains run from station X to station Y, how
//! far, and how long?" over an immutable timetable snapshot:
//!
//! 1. [`TimetableIndex`] buckets stop records by train and by station name
//! 2. [`match_segments`] pairs each origin visit with later destination
//!    visits on the same train
//! 3. [`Segment::measure`](crate::domain::Segment::measure) computes
//!    distance and day-wrapped travel time
//! 4. the rankers pick nearest/farthest per boarding stop, or sort
//!    fastest-first
//!
//! Everything here is synchronous and side-effect free.

mod matcher;
mod query;
mod rank;
mod timetable_index;

pub use matcher::{Candidate, match_segments};
pub use query::{
    DistanceReport, DurationReport, QueryError, RouteQuery, distance_query, duration_query,
    measured_segments,
};
pub use rank::{Extremes, extremes_by_origin, overall_extremes, rank_by_duration};
pub use timetable_index::TimetableIndex;
