//! Same-train segment matching.
//!
//! For an origin and destination station name, finds every pair of stops
//! where one train calls at the origin and later at the destination.

use crate::domain::StopRecord;

use super::timetable_index::TimetableIndex;

/// An unmeasured origin/destination pair on one train.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub origin: &'a StopRecord,
    pub destination: &'a StopRecord,
}

/// Find every same-train passage from `origin` to `destination`.
///
/// Output order is deterministic: origin visits in index input order, then
/// destination stops in route order. A train contributes more than one
/// candidate only if the destination name recurs later in its route.
///
/// Equal station names never match, even on a train that loops back.
pub fn match_segments<'a>(
    index: &'a TimetableIndex,
    origin: &str,
    destination: &str,
) -> Vec<Candidate<'a>> {
    let mut candidates = Vec::new();
    if origin == destination {
        return candidates;
    }

    for origin_stop in index.stops_at_station(origin) {
        let onward = index
            .stops_for_train(&origin_stop.train_no)
            .skip_while(|s| s.sequence <= origin_stop.sequence)
            .filter(|s| s.station_name == destination);

        for destination_stop in onward {
            candidates.push(Candidate {
                origin: origin_stop,
                destination: destination_stop,
            });
        }
    }

    candidates
}
