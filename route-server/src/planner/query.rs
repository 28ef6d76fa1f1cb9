//! Route queries over a timetable snapshot.
//!
//! Ties the engine together: match candidate segments, measure each one,
//! then reduce with the selector for the query kind. Evaluation is a pure
//! function of the index and the query.

use tracing::debug;

use crate::domain::{DomainError, Segment};

use super::matcher::match_segments;
use super::rank::{Extremes, extremes_by_origin, overall_extremes, rank_by_duration};
use super::timetable_index::TimetableIndex;

/// Error from route query evaluation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueryError {
    /// Query parameters are missing or empty
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The timetable data touched by the query is malformed
    #[error("timetable data integrity error: {0}")]
    DataIntegrity(#[from] DomainError),
}

/// A validated origin/destination station pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteQuery {
    origin: String,
    destination: String,
}

impl RouteQuery {
    /// Create a query, rejecting empty station names.
    ///
    /// Names are otherwise used verbatim; station name matching is exact.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Result<Self, QueryError> {
        let origin = origin.into();
        let destination = destination.into();

        if origin.trim().is_empty() {
            return Err(QueryError::InvalidQuery(
                "origin station name is required".to_string(),
            ));
        }
        if destination.trim().is_empty() {
            return Err(QueryError::InvalidQuery(
                "destination station name is required".to_string(),
            ));
        }

        Ok(Self {
            origin,
            destination,
        })
    }

    /// Origin station name.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Destination station name.
    pub fn destination(&self) -> &str {
        &self.destination
    }
}

/// Result of a nearest/farthest distance query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceReport<'a> {
    /// One entry per boarding stop at the origin, in first-seen order.
    pub by_origin: Vec<Extremes<'a>>,

    /// Nearest and farthest across every boarding stop.
    pub overall: Option<Extremes<'a>>,
}

impl DistanceReport<'_> {
    /// True when no train runs from origin to destination.
    pub fn is_empty(&self) -> bool {
        self.by_origin.is_empty()
    }
}

/// Result of a fastest-first duration query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationReport<'a> {
    /// Segments ordered by ascending travel time.
    pub segments: Vec<Segment<'a>>,
}

impl DurationReport<'_> {
    /// Number of ranked segments.
    pub fn count(&self) -> usize {
        self.segments.len()
    }

    /// True when no train runs from origin to destination.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Match and measure all segments for a query.
///
/// The first malformed segment aborts the whole evaluation; bad rows are
/// never silently dropped.
pub fn measured_segments<'a>(
    index: &'a TimetableIndex,
    query: &RouteQuery,
) -> Result<Vec<Segment<'a>>, QueryError> {
    let candidates = match_segments(index, query.origin(), query.destination());

    let segments = candidates
        .into_iter()
        .map(|c| Segment::measure(c.origin, c.destination))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        origin = query.origin(),
        destination = query.destination(),
        segments = segments.len(),
        "measured route segments"
    );

    Ok(segments)
}

/// Nearest and farthest destination stop per boarding stop.
pub fn distance_query<'a>(
    index: &'a TimetableIndex,
    query: &RouteQuery,
) -> Result<DistanceReport<'a>, QueryError> {
    let segments = measured_segments(index, query)?;

    Ok(DistanceReport {
        by_origin: extremes_by_origin(&segments),
        overall: overall_extremes(&segments),
    })
}

/// All matching segments, fastest first.
pub fn duration_query<'a>(
    index: &'a TimetableIndex,
    query: &RouteQuery,
) -> Result<DurationReport<'a>, QueryError> {
    let segments = measured_segments(index, query)?;

    Ok(DurationReport {
        segments: rank_by_duration(segments),
    })
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
