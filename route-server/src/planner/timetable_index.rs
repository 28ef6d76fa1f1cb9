//! Timetable index for same-train segment matching.
//!
//! Every query starts from "which trains call at the origin?" and then
//! walks that train's route in order. The index buckets the flat list of
//! stop records by train and by station name once, so both lookups are a
//! single hash lookup.

use std::collections::HashMap;

use crate::domain::StopRecord;

/// Index over an immutable snapshot of stop records.
///
/// Owns the records; lookups hand out borrows, so segments built from
/// them cannot outlive the snapshot.
#[derive(Debug, Default)]
pub struct TimetableIndex {
    /// All records, in the order they were supplied.
    records: Vec<StopRecord>,

    /// Train number -> record positions, ordered by sequence.
    by_train: HashMap<String, Vec<usize>>,

    /// Station name -> record positions, in input order.
    by_station: HashMap<String, Vec<usize>>,
}

impl TimetableIndex {
    /// Build the index from an unordered collection of stop records.
    pub fn new(records: Vec<StopRecord>) -> Self {
        let mut by_train: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_station: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, record) in records.iter().enumerate() {
            by_train
                .entry(record.train_no.clone())
                .or_default()
                .push(idx);
            by_station
                .entry(record.station_name.clone())
                .or_default()
                .push(idx);
        }

        // Stable, so duplicate sequence numbers keep their input order
        for positions in by_train.values_mut() {
            positions.sort_by_key(|&i| records[i].sequence);
        }

        Self {
            records,
            by_train,
            by_station,
        }
    }

    /// Stops of one train, ordered by sequence ascending.
    ///
    /// Unknown trains yield an empty iterator.
    pub fn stops_for_train<'a>(
        &'a self,
        train_no: &str,
    ) -> impl Iterator<Item = &'a StopRecord> + 'a {
        self.positions(&self.by_train, train_no)
            .iter()
            .map(move |&i| &self.records[i])
    }

    /// Every train's visit to a station name, in input order.
    pub fn stops_at_station<'a>(
        &'a self,
        station_name: &str,
    ) -> impl Iterator<Item = &'a StopRecord> + 'a {
        self.positions(&self.by_station, station_name)
            .iter()
            .map(move |&i| &self.records[i])
    }

    /// Check whether any train calls at a station name.
    pub fn has_station(&self, station_name: &str) -> bool {
        self.by_station.contains_key(station_name)
    }

    /// All indexed records, in input order.
    pub fn records(&self) -> &[StopRecord] {
        &self.records
    }

    /// Number of stop records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct trains.
    pub fn train_count(&self) -> usize {
        self.by_train.len()
    }

    /// Number of distinct station names.
    pub fn station_count(&self) -> usize {
        self.by_station.len()
    }

    fn positions<'a>(&self, map: &'a HashMap<String, Vec<usize>>, key: &str) -> &'a [usize] {
        map.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }
}
