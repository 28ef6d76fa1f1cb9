//! Measured same-train segments.
//!
//! A `Segment` is an origin/destination pair of stops on one train,
//! together with the distance and travel time between them. Segments borrow
//! their stops from the timetable snapshot a query runs against and live
//! only as long as that query.

use super::{ClockTime, DomainError, StopRecord, TimeField, TravelTime};

/// A measured passage between two stops of the same train.
///
/// # Invariants
///
/// - Both stops have the same `train_no`
/// - `origin.sequence < destination.sequence`
/// - `distance` is the (non-negative) difference of cumulative distances
/// - `duration` is departure-to-arrival with day-wrap correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    origin: &'a StopRecord,
    destination: &'a StopRecord,
    distance: u32,
    duration: TravelTime,
}

impl<'a> Segment<'a> {
    /// Measure the segment between two stops, validating the timetable data.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - the stops belong to different trains
    /// - the destination does not come after the origin
    /// - cumulative distance decreases between the stops
    /// - the origin departure or destination arrival is not `HH:MM:SS`
    ///
    /// # Examples
    ///
    /// ```
    /// use route_server::domain::{Segment, StopRecord};
    ///
    /// let from = StopRecord::new("107", 1, "SWV", "SAWANTWADI R")
    ///     .with_times("00:00:00", "10:25:00");
    /// let to = StopRecord::new("107", 4, "MAO", "MADGOAN JN.")
    ///     .with_times("12:25:00", "12:30:00")
    ///     .with_distance(102);
    ///
    /// let segment = Segment::measure(&from, &to).unwrap();
    /// assert_eq!(segment.distance(), 102);
    /// assert_eq!(segment.duration().to_string(), "02:00:00");
    ///
    /// // Travelling backwards along the route is rejected
    /// assert!(Segment::measure(&to, &from).is_err());
    /// ```
    pub fn measure(
        origin: &'a StopRecord,
        destination: &'a StopRecord,
    ) -> Result<Self, DomainError> {
        if origin.train_no != destination.train_no {
            return Err(DomainError::TrainMismatch(
                origin.train_no.clone(),
                destination.train_no.clone(),
            ));
        }

        if destination.sequence <= origin.sequence {
            return Err(DomainError::InvalidSegment(
                "destination must come after origin in the route",
            ));
        }

        let distance = destination
            .distance
            .checked_sub(origin.distance)
            .ok_or_else(|| DomainError::NegativeDistance {
                train_no: origin.train_no.clone(),
                origin_seq: origin.sequence,
                origin_distance: origin.distance,
                destination_seq: destination.sequence,
                destination_distance: destination.distance,
            })?;

        let departure = parse_clock(origin, TimeField::Departure)?;
        let arrival = parse_clock(destination, TimeField::Arrival)?;

        Ok(Self {
            origin,
            destination,
            distance,
            duration: arrival.travel_time_since(departure),
        })
    }

    /// Returns the boarding stop.
    pub fn origin(&self) -> &'a StopRecord {
        self.origin
    }

    /// Returns the alighting stop.
    pub fn destination(&self) -> &'a StopRecord {
        self.destination
    }

    /// Distance travelled between the two stops.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Travel time from origin departure to destination arrival.
    pub fn duration(&self) -> TravelTime {
        self.duration
    }

    /// Train number shared by both stops.
    pub fn train_no(&self) -> &'a str {
        &self.origin.train_no
    }
}

fn parse_clock(stop: &StopRecord, field: TimeField) -> Result<ClockTime, DomainError> {
    let value = match field {
        TimeField::Arrival => &stop.arrival_time,
        TimeField::Departure => &stop.departure_time,
    };

    ClockTime::parse_hhmmss(value).map_err(|source| DomainError::InvalidTime {
        train_no: stop.train_no.clone(),
        sequence: stop.sequence,
        field,
        value: value.clone(),
        source,
    })
}
