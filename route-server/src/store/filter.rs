//! Exact-match filter over stop record fields.

use crate::domain::StopRecord;

/// Field filter for the search read path.
///
/// Every field that is set must match exactly; an empty filter matches
/// every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopFilter {
    pub train_no: Option<String>,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
    pub station_name: Option<String>,
}

impl StopFilter {
    /// Check whether a record satisfies every set field.
    pub fn matches(&self, record: &StopRecord) -> bool {
        field_matches(&self.train_no, &record.train_no)
            && field_matches(&self.arrival_time, &record.arrival_time)
            && field_matches(&self.departure_time, &record.departure_time)
            && field_matches(&self.station_name, &record.station_name)
    }

    /// True if no field is set.
    pub fn is_empty(&self) -> bool {
        self.train_no.is_none()
            && self.arrival_time.is_none()
            && self.departure_time.is_none()
            && self.station_name.is_none()
    }
}

fn field_matches(wanted: &Option<String>, actual: &str) -> bool {
    wanted.as_deref().is_none_or(|w| w == actual)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StopRecord {
        StopRecord::new("107", 2, "THVM", "THIVIM").with_times("11:06:00", "11:08:00")
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = StopFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&record()));
    }

    #[test]
    fn all_set_fields_must_match() {
        let filter = StopFilter {
            train_no: Some("107".into()),
            station_name: Some("THIVIM".into()),
            ..Default::default()
        };
        assert!(!filter.is_empty());
        assert!(filter.matches(&record()));

        let filter = StopFilter {
            train_no: Some("107".into()),
            departure_time: Some("11:06:00".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&record()));
    }

    #[test]
    fn matching_is_exact() {
        let filter = StopFilter {
            station_name: Some("thivim".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&record()));

        let filter = StopFilter {
            arrival_time: Some("11:06:00".into()),
            ..Default::default()
        };
        assert!(filter.matches(&record()));
    }
}
