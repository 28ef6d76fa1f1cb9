//! Selection and ranking over measured segments.
//!
//! Two independent reducers: nearest/farthest selection per boarding stop,
//! and a global fastest-first ordering.

use std::collections::HashMap;

use crate::domain::{Segment, StopKey};

/// Nearest and farthest segment from a single boarding stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extremes<'a> {
    pub nearest: Segment<'a>,
    pub farthest: Segment<'a>,
}

impl<'a> Extremes<'a> {
    fn seed(segment: Segment<'a>) -> Self {
        Self {
            nearest: segment,
            farthest: segment,
        }
    }

    /// Strict comparisons, so the first-seen segment wins ties.
    fn offer(&mut self, segment: Segment<'a>) {
        if segment.distance() < self.nearest.distance() {
            self.nearest = segment;
        }
        if segment.distance() > self.farthest.distance() {
            self.farthest = segment;
        }
    }
}

/// Pick the nearest and farthest segment for each boarding stop.
///
/// Groups are keyed by the origin stop (train number and sequence) and
/// returned in first-seen order. Ties keep the segment encountered first.
pub fn extremes_by_origin<'a>(segments: &[Segment<'a>]) -> Vec<Extremes<'a>> {
    let mut groups: Vec<Extremes<'a>> = Vec::new();
    let mut group_of: HashMap<StopKey<'a>, usize> = HashMap::new();

    for &segment in segments {
        match group_of.get(&segment.origin().key()) {
            Some(&idx) => groups[idx].offer(segment),
            None => {
                group_of.insert(segment.origin().key(), groups.len());
                groups.push(Extremes::seed(segment));
            }
        }
    }

    groups
}

/// Pick the nearest and farthest segment across all boarding stops.
///
/// Same first-seen tie-break as [`extremes_by_origin`].
pub fn overall_extremes<'a>(segments: &[Segment<'a>]) -> Option<Extremes<'a>> {
    let (first, rest) = segments.split_first()?;
    let mut extremes = Extremes::seed(*first);
    for &segment in rest {
        extremes.offer(segment);
    }
    Some(extremes)
}

/// Sort segments fastest-first.
///
/// The sort is stable: segments with equal duration keep their input order.
pub fn rank_by_duration(mut segments: Vec<Segment<'_>>) -> Vec<Segment<'_>> {
    segments.sort_by_key(|s| s.duration());
    segments
}
