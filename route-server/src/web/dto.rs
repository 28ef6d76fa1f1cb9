//! Data transfer objects for web requests and responses.
//!
//! Query parameter and field names follow the public API (`sName`,
//! `trainNo`, ...) rather than Rust naming.

use serde::{Deserialize, Serialize};

use crate::domain::{Segment, StopRecord};
use crate::planner::{DistanceReport, DurationReport, Extremes};
use crate::store::StopFilter;

/// Message sent with a successful `/sortDist` response.
pub const FETCHED_MSG: &str = "Data Fetched Successfully";

/// Message sent when no train runs between the stations.
pub const NO_TRAINS_MSG: &str = "No trains found";

/// Request for one page of stop records.
#[derive(Debug, Default, Deserialize)]
pub struct FetchRequest {
    /// Zero-based page number, kept as text so a bad value can be reported
    pub page: Option<String>,
}

/// Exact-match search over stop record fields.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    /// Train number
    #[serde(rename = "tNo")]
    pub train_no: Option<String>,

    /// Arrival time, `HH:MM:SS`
    #[serde(rename = "aTime")]
    pub arrival_time: Option<String>,

    /// Departure time, `HH:MM:SS`
    #[serde(rename = "dTime")]
    pub departure_time: Option<String>,

    /// Station name
    #[serde(rename = "sName")]
    pub station_name: Option<String>,
}

impl SearchRequest {
    /// Convert to a store filter. Empty parameters are ignored.
    pub fn into_filter(self) -> StopFilter {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        StopFilter {
            train_no: non_empty(self.train_no),
            arrival_time: non_empty(self.arrival_time),
            departure_time: non_empty(self.departure_time),
            station_name: non_empty(self.station_name),
        }
    }
}

/// Origin/destination station pair for route queries.
#[derive(Debug, Default, Deserialize)]
pub struct RouteRequest {
    /// Origin station name
    #[serde(rename = "sName")]
    pub origin: Option<String>,

    /// Destination station name
    #[serde(rename = "dName")]
    pub destination: Option<String>,
}

/// A measured segment in query results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentResult {
    pub train_no: String,
    pub train_name: String,
    pub origin: StopRecord,
    pub destination: StopRecord,
    pub distance: u32,
    /// Travel time, `HH:MM:SS`
    pub time_taken: String,
}

/// Nearest and farthest segment from one boarding stop.
#[derive(Debug, Clone, Serialize)]
pub struct ExtremesResult {
    pub nearest: SegmentResult,
    pub farthest: SegmentResult,
}

/// Response for `/searchDist`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceResponse {
    /// One entry per boarding stop at the origin
    pub by_origin: Vec<ExtremesResult>,

    /// Nearest segment across all boarding stops
    pub nearest: Option<SegmentResult>,

    /// Farthest segment across all boarding stops
    pub farthest: Option<SegmentResult>,
}

/// Response for `/sortDist`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortDistResponse {
    pub is_error: bool,
    pub msg: String,
    pub count: usize,
    /// Segments, fastest first
    pub data: Vec<SegmentResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl SegmentResult {
    /// Create from a measured segment.
    pub fn from_segment(segment: &Segment<'_>) -> Self {
        let origin = segment.origin();
        Self {
            train_no: origin.train_no.clone(),
            train_name: origin.train_name.clone(),
            origin: origin.clone(),
            destination: segment.destination().clone(),
            distance: segment.distance(),
            time_taken: segment.duration().to_string(),
        }
    }
}

impl ExtremesResult {
    /// Create from a nearest/farthest pair.
    pub fn from_extremes(extremes: &Extremes<'_>) -> Self {
        Self {
            nearest: SegmentResult::from_segment(&extremes.nearest),
            farthest: SegmentResult::from_segment(&extremes.farthest),
        }
    }
}

impl DistanceResponse {
    /// Create from a distance report.
    pub fn from_report(report: &DistanceReport<'_>) -> Self {
        Self {
            by_origin: report
                .by_origin
                .iter()
                .map(ExtremesResult::from_extremes)
                .collect(),
            nearest: report
                .overall
                .as_ref()
                .map(|e| SegmentResult::from_segment(&e.nearest)),
            farthest: report
                .overall
                .as_ref()
                .map(|e| SegmentResult::from_segment(&e.farthest)),
        }
    }
}

impl SortDistResponse {
    /// Create from a duration report.
    pub fn from_report(report: &DurationReport<'_>) -> Self {
        let msg = if report.is_empty() {
            NO_TRAINS_MSG
        } else {
            FETCHED_MSG
        };

        Self {
            is_error: false,
            msg: msg.to_string(),
            count: report.count(),
            data: report
                .segments
                .iter()
                .map(SegmentResult::from_segment)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{RouteQuery, TimetableIndex, distance_query, duration_query};

    fn index() -> TimetableIndex {
        TimetableIndex::new(vec![
            StopRecord::new("12", 1, "AA", "Alpha")
                .with_train_name("Night Mail")
                .with_times("00:00:00", "23:50:00"),
            StopRecord::new("12", 2, "BB", "Beta")
                .with_train_name("Night Mail")
                .with_times("00:10:00", "00:15:00")
                .with_distance(40),
            StopRecord::new("12", 3, "CC", "Gamma")
                .with_train_name("Night Mail")
                .with_times("01:00:00", "01:00:00")
                .with_distance(95),
        ])
    }

    #[test]
    fn segment_json_shape() {
        let index = index();
        let query = RouteQuery::new("Alpha", "Beta").unwrap();
        let report = duration_query(&index, &query).unwrap();
        let json = serde_json::to_value(SegmentResult::from_segment(&report.segments[0])).unwrap();

        assert_eq!(json["trainNo"], "12");
        assert_eq!(json["trainName"], "Night Mail");
        assert_eq!(json["distance"], 40);
        assert_eq!(json["timeTaken"], "00:20:00");
        assert_eq!(json["origin"]["StationName"], "Alpha");
        assert_eq!(json["destination"]["SEQ"], 2);
    }

    #[test]
    fn distance_response_from_report() {
        let index = index();
        let query = RouteQuery::new("Alpha", "Gamma").unwrap();
        let report = distance_query(&index, &query).unwrap();
        let response = DistanceResponse::from_report(&report);

        assert_eq!(response.by_origin.len(), 1);
        assert_eq!(response.nearest.as_ref().unwrap().distance, 95);
        assert_eq!(response.farthest.as_ref().unwrap().time_taken, "01:10:00");

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["byOrigin"].is_array());
    }

    #[test]
    fn empty_reports_serialize_as_empty() {
        let index = index();
        let query = RouteQuery::new("Gamma", "Alpha").unwrap();

        let distance = DistanceResponse::from_report(&distance_query(&index, &query).unwrap());
        assert!(distance.by_origin.is_empty());
        assert!(distance.nearest.is_none());

        let sorted = SortDistResponse::from_report(&duration_query(&index, &query).unwrap());
        let json = serde_json::to_value(&sorted).unwrap();
        assert_eq!(json["isError"], false);
        assert_eq!(json["msg"], NO_TRAINS_MSG);
        assert_eq!(json["count"], 0);
        assert_eq!(json["data"], serde_json::json!([]));
    }

    #[test]
    fn search_request_ignores_empty_params() {
        let req = SearchRequest {
            train_no: Some("12".into()),
            arrival_time: Some(String::new()),
            departure_time: None,
            station_name: Some("Beta".into()),
        };
        let filter = req.into_filter();
        assert_eq!(filter.train_no.as_deref(), Some("12"));
        assert!(filter.arrival_time.is_none());
        assert_eq!(filter.station_name.as_deref(), Some("Beta"));
    }
}
