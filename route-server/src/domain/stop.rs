//! Timetable stop records.
//!
//! A `StopRecord` is one row of the timetable: a single train's visit to a
//! single station. Records are decoded once, at the store or CSV boundary,
//! and are never mutated by the query engine.

use serde::{Deserialize, Serialize};

/// Identifies one stop within the whole timetable.
///
/// `sequence` alone is only unique within a train, so the pair is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopKey<'a> {
    pub train_no: &'a str,
    pub sequence: u32,
}

/// A train's scheduled visit to one station.
///
/// Clock times are kept as the text that was ingested; they are validated
/// when a segment is measured, so a malformed time surfaces as a data
/// integrity error on the query that touches it.
///
/// # Examples
///
/// ```
/// use route_server::domain::StopRecord;
///
/// let stop = StopRecord::new("12951", 3, "BRC", "VADODARA JN")
///     .with_times("20:05:00", "20:15:00")
///     .with_distance(392);
///
/// assert_eq!(stop.key().train_no, "12951");
/// assert_eq!(stop.key().sequence, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRecord {
    #[serde(rename = "TrainNo")]
    pub train_no: String,
    #[serde(rename = "TrainName", default)]
    pub train_name: String,
    /// Position of this stop in the train's route.
    #[serde(rename = "SEQ")]
    pub sequence: u32,
    #[serde(rename = "StationCode", default)]
    pub station_code: String,
    /// Lookup key for queries. Not unique across station codes.
    #[serde(rename = "StationName")]
    pub station_name: String,
    /// Arrival clock time, "HH:MM:SS".
    #[serde(rename = "ArrivalTime")]
    pub arrival_time: String,
    /// Departure clock time, "HH:MM:SS".
    #[serde(rename = "DepartureTime")]
    pub departure_time: String,
    /// Cumulative distance from the train's own origin.
    #[serde(rename = "Distance")]
    pub distance: u32,
    #[serde(rename = "SourceStation", default)]
    pub source_station: String,
    #[serde(rename = "SourceStationName", default)]
    pub source_station_name: String,
    #[serde(rename = "DestinationStation", default)]
    pub destination_station: String,
    #[serde(rename = "DestinationStationName", default)]
    pub destination_station_name: String,
}

impl StopRecord {
    /// Creates a stop with midnight times, zero distance and empty
    /// descriptive fields.
    pub fn new(
        train_no: impl Into<String>,
        sequence: u32,
        station_code: impl Into<String>,
        station_name: impl Into<String>,
    ) -> Self {
        Self {
            train_no: train_no.into(),
            train_name: String::new(),
            sequence,
            station_code: station_code.into(),
            station_name: station_name.into(),
            arrival_time: "00:00:00".to_string(),
            departure_time: "00:00:00".to_string(),
            distance: 0,
            source_station: String::new(),
            source_station_name: String::new(),
            destination_station: String::new(),
            destination_station_name: String::new(),
        }
    }

    /// Set the arrival and departure clock times.
    pub fn with_times(mut self, arrival: impl Into<String>, departure: impl Into<String>) -> Self {
        self.arrival_time = arrival.into();
        self.departure_time = departure.into();
        self
    }

    /// Set the cumulative distance.
    pub fn with_distance(mut self, distance: u32) -> Self {
        self.distance = distance;
        self
    }

    /// Set the train's display name.
    pub fn with_train_name(mut self, name: impl Into<String>) -> Self {
        self.train_name = name.into();
        self
    }

    /// Returns the key identifying this stop across the timetable.
    pub fn key(&self) -> StopKey<'_> {
        StopKey {
            train_no: &self.train_no,
            sequence: self.sequence,
        }
    }
}
