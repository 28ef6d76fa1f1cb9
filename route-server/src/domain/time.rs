//! Wall-clock time handling for timetable stops.
//!
//! The timetable records only a time of day ("HH:MM:SS") for each arrival
//! and departure, never a date. Travel times are therefore computed on an
//! implicit common day, with a single 24 hour correction when the arrival
//! clock reads earlier than the departure clock.

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;

/// Seconds in one wall-clock day.
const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day as printed in the timetable.
///
/// # Examples
///
/// ```
/// use route_server::domain::ClockTime;
///
/// let time = ClockTime::parse_hhmmss("14:30:05").unwrap();
/// assert_eq!(time.to_string(), "14:30:05");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a clock time from hour, minute and second components.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, TimeError> {
        NaiveTime::from_hms_opt(hour, minute, second)
            .map(Self)
            .ok_or_else(|| TimeError::new("time component out of range"))
    }

    /// Parse a time from "HH:MM:SS" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmmss("00:00:00").is_ok());
    /// assert!(ClockTime::parse_hhmmss("23:59:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmmss("23:59").is_err());
    /// assert!(ClockTime::parse_hhmmss("24:00:00").is_err());
    /// assert!(ClockTime::parse_hhmmss("12-00-00").is_err());
    /// ```
    pub fn parse_hhmmss(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 8 characters: HH:MM:SS
        if s.len() != 8 {
            return Err(TimeError::new("expected HH:MM:SS format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' || bytes[5] != b':' {
            return Err(TimeError::new("expected colons at positions 2 and 5"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second = parse_two_digits(&bytes[6..8])
            .ok_or_else(|| TimeError::new("invalid second digits"))?;
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Self::from_hms(hour, minute, second)
    }

    /// Returns the time component.
    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Seconds elapsed since midnight.
    pub fn seconds_from_midnight(&self) -> i64 {
        i64::from(self.0.num_seconds_from_midnight())
    }

    /// Travel time from `departure` to this clock time.
    ///
    /// If this time reads earlier than `departure` the journey is assumed to
    /// cross midnight and a day is added. Journeys of a day or more cannot
    /// be told apart from their remainder modulo 24 hours, because the
    /// timetable carries no date.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_server::domain::ClockTime;
    ///
    /// let dep = ClockTime::parse_hhmmss("23:50:00").unwrap();
    /// let arr = ClockTime::parse_hhmmss("00:10:00").unwrap();
    /// assert_eq!(arr.travel_time_since(dep).to_string(), "00:20:00");
    /// ```
    pub fn travel_time_since(&self, departure: ClockTime) -> TravelTime {
        let mut raw = self.seconds_from_midnight() - departure.seconds_from_midnight();
        if raw < 0 {
            raw += SECS_PER_DAY;
        }
        TravelTime(Duration::seconds(raw))
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({self})")
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.0.hour(),
            self.0.minute(),
            self.0.second()
        )
    }
}

/// Elapsed time between two clock readings, always within `[0, 24h)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TravelTime(Duration);

impl TravelTime {
    /// Build a travel time from a number of seconds, reduced modulo one day.
    pub fn from_seconds(secs: i64) -> Self {
        Self(Duration::seconds(secs.rem_euclid(SECS_PER_DAY)))
    }

    /// Total whole seconds.
    pub fn num_seconds(&self) -> i64 {
        self.0.num_seconds()
    }

    /// Total whole minutes.
    pub fn num_minutes(&self) -> i64 {
        self.0.num_minutes()
    }
}

impl fmt::Debug for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TravelTime({self})")
    }
}

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.num_seconds();
        write!(
            f,
            "{:02}:{:02}:{:02}",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(s: &str) -> ClockTime {
        ClockTime::parse_hhmmss(s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        let t = clock("00:00:00");
        assert_eq!(t.seconds_from_midnight(), 0);

        let t = clock("23:59:59");
        assert_eq!(t.seconds_from_midnight(), SECS_PER_DAY - 1);

        let t = clock("14:30:15");
        assert_eq!(t.time(), NaiveTime::from_hms_opt(14, 30, 15).unwrap());
    }

    #[test]
    fn parse_invalid_format() {
        // Wrong length
        assert!(ClockTime::parse_hhmmss("14:30").is_err());
        assert!(ClockTime::parse_hhmmss("143000").is_err());
        assert!(ClockTime::parse_hhmmss("14:30:000").is_err());
        assert!(ClockTime::parse_hhmmss("").is_err());

        // Wrong separators
        assert!(ClockTime::parse_hhmmss("14-30-00").is_err());
        assert!(ClockTime::parse_hhmmss("14:30.00").is_err());

        // Non-digit characters
        assert!(ClockTime::parse_hhmmss("ab:cd:ef").is_err());
        assert!(ClockTime::parse_hhmmss("1a:30:00").is_err());
        assert!(ClockTime::parse_hhmmss(" 9:30:00").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(ClockTime::parse_hhmmss("24:00:00").is_err());
        assert!(ClockTime::parse_hhmmss("12:60:00").is_err());
        assert!(ClockTime::parse_hhmmss("12:00:60").is_err());
    }

    #[test]
    fn display_format() {
        assert_eq!(clock("00:00:00").to_string(), "00:00:00");
        assert_eq!(clock("09:05:07").to_string(), "09:05:07");
        assert_eq!(format!("{:?}", clock("23:59:59")), "ClockTime(23:59:59)");
    }

    #[test]
    fn same_day_travel_time() {
        let dep = clock("10:15:00");
        let arr = clock("12:45:30");
        let travel = arr.travel_time_since(dep);

        assert_eq!(travel.num_seconds(), 2 * 3600 + 30 * 60 + 30);
        assert_eq!(travel.to_string(), "02:30:30");
    }

    #[test]
    fn travel_time_wraps_past_midnight() {
        let travel = clock("00:10:00").travel_time_since(clock("23:50:00"));
        assert_eq!(travel.to_string(), "00:20:00");
        assert_eq!(travel.num_minutes(), 20);
    }

    #[test]
    fn equal_clocks_give_zero() {
        let t = clock("08:00:00");
        assert_eq!(t.travel_time_since(t).to_string(), "00:00:00");
    }

    #[test]
    fn day_long_journeys_collapse_modulo_24h() {
        // A 25 hour journey reads as 1 hour; there is no date to disambiguate.
        let travel = clock("11:00:00").travel_time_since(clock("10:00:00"));
        assert_eq!(travel, TravelTime::from_seconds(25 * 3600));
        assert_eq!(travel.to_string(), "01:00:00");
    }

    #[test]
    fn travel_time_ordering() {
        let short = TravelTime::from_seconds(300);
        let long = TravelTime::from_seconds(600);
        assert!(short < long);
        assert_eq!(format!("{:?}", short), "TravelTime(00:05:00)");
    }
}
