//! Timetable CSV decoding.
//!
//! Rows have twelve columns, in this order:
//!
//! | # | column                   |
//! |---|--------------------------|
//! | 0 | train number             |
//! | 1 | train name               |
//! | 2 | sequence (`SEQ`)         |
//! | 3 | station code             |
//! | 4 | station name             |
//! | 5 | arrival time             |
//! | 6 | departure time           |
//! | 7 | cumulative distance      |
//! | 8 | source station code      |
//! | 9 | source station name      |
//! | 10| destination station code |
//! | 11| destination station name |

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::StopRecord;

use super::error::IngestError;

/// Number of columns in a timetable row.
const COLUMNS: usize = 12;

/// Decode every row of a timetable CSV.
///
/// Fields are trimmed. The first malformed row aborts decoding with its
/// line number; numeric columns are never defaulted. Clock times are kept
/// as text and validated when a query measures them.
pub fn parse_csv<R: Read>(reader: R, has_headers: bool) -> Result<Vec<StopRecord>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in reader.records() {
        records.push(parse_row(&row?)?);
    }

    Ok(records)
}

/// Decode a single CSV row into a stop record.
pub fn parse_row(row: &StringRecord) -> Result<StopRecord, IngestError> {
    let line = row.position().map(|p| p.line()).unwrap_or(0);

    if row.len() != COLUMNS {
        return Err(IngestError::Row {
            line,
            message: format!("expected {COLUMNS} columns, found {}", row.len()),
        });
    }

    let field = |i: usize| row.get(i).unwrap_or_default().to_string();
    let number = |i: usize, name: &str| {
        let raw = row.get(i).unwrap_or_default();
        raw.parse::<u32>().map_err(|_| IngestError::Row {
            line,
            message: format!("{name} must be a non-negative integer, got {raw:?}"),
        })
    };

    let train_no = field(0);
    if train_no.is_empty() {
        return Err(IngestError::Row {
            line,
            message: "train number is empty".to_string(),
        });
    }

    Ok(StopRecord {
        train_no,
        train_name: field(1),
        sequence: number(2, "SEQ")?,
        station_code: field(3),
        station_name: field(4),
        arrival_time: field(5),
        departure_time: field(6),
        distance: number(7, "Distance")?,
        source_station: field(8),
        source_station_name: field(9),
        destination_station: field(10),
        destination_station_name: field(11),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Train No,Train Name,SEQ,Station Code,Station Name,Arrival time,Departure Time,Distance,Source Station,Source Station Name,Destination Station,Destination Station Name
107,SWV-MAO-VLNK,1,SWV,SAWANTWADI R,00:00:00,10:25:00,0,SWV,SAWANTWADI ROAD,MAO,MADGOAN JN.
107,SWV-MAO-VLNK,2,THVM,THIVIM,11:06:00,11:08:00,51,SWV,SAWANTWADI ROAD,MAO,MADGOAN JN.
107, SWV-MAO-VLNK ,3,KRMI, KARMALI ,11:28:00,11:30:00,62,SWV,SAWANTWADI ROAD,MAO,MADGOAN JN.
";

    #[test]
    fn parses_sample_rows() {
        let records = parse_csv(SAMPLE.as_bytes(), true).unwrap();
        assert_eq!(records.len(), 3);

        let first = &records[0];
        assert_eq!(first.train_no, "107");
        assert_eq!(first.train_name, "SWV-MAO-VLNK");
        assert_eq!(first.sequence, 1);
        assert_eq!(first.station_code, "SWV");
        assert_eq!(first.station_name, "SAWANTWADI R");
        assert_eq!(first.arrival_time, "00:00:00");
        assert_eq!(first.departure_time, "10:25:00");
        assert_eq!(first.distance, 0);
        assert_eq!(first.source_station_name, "SAWANTWADI ROAD");
        assert_eq!(first.destination_station, "MAO");
        assert_eq!(first.destination_station_name, "MADGOAN JN.");

        assert_eq!(records[1].distance, 51);
    }

    #[test]
    fn trims_fields() {
        let records = parse_csv(SAMPLE.as_bytes(), true).unwrap();
        assert_eq!(records[2].train_name, "SWV-MAO-VLNK");
        assert_eq!(records[2].station_name, "KARMALI");
    }

    #[test]
    fn headerless_input() {
        let body = SAMPLE.lines().skip(1).collect::<Vec<_>>().join("\n");
        let records = parse_csv(body.as_bytes(), false).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn header_row_without_flag_is_rejected() {
        // "SEQ" in the header is not a number
        let err = parse_csv(SAMPLE.as_bytes(), false).unwrap_err();
        match err {
            IngestError::Row { line, message } => {
                assert_eq!(line, 1);
                assert!(message.contains("SEQ"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wrong_column_count_reports_line() {
        let input = "\
107,SWV-MAO-VLNK,1,SWV,SAWANTWADI R,00:00:00,10:25:00,0,SWV,SAWANTWADI ROAD,MAO,MADGOAN JN.
107,SWV-MAO-VLNK,2,THVM,THIVIM,11:06:00,11:08:00,51,SWV,SAWANTWADI ROAD,MAO
";
        let err = parse_csv(input.as_bytes(), false).unwrap_err();
        match err {
            IngestError::Row { line, message } => {
                assert_eq!(line, 2);
                assert_eq!(message, "expected 12 columns, found 11");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_distance_is_rejected() {
        let input = "107,X,1,SWV,SAWANTWADI R,00:00:00,10:25:00,far,SWV,S,MAO,M\n";
        let err = parse_csv(input.as_bytes(), false).unwrap_err();
        assert!(err.to_string().contains("Distance"));
    }

    #[test]
    fn negative_sequence_is_rejected() {
        let input = "107,X,-1,SWV,SAWANTWADI R,00:00:00,10:25:00,0,SWV,S,MAO,M\n";
        assert!(parse_csv(input.as_bytes(), false).is_err());
    }

    #[test]
    fn empty_train_number_is_rejected() {
        let input = ",X,1,SWV,SAWANTWADI R,00:00:00,10:25:00,0,SWV,S,MAO,M\n";
        let err = parse_csv(input.as_bytes(), false).unwrap_err();
        assert!(err.to_string().contains("train number is empty"));
    }

    #[test]
    fn times_are_not_validated_at_load() {
        let input = "107,X,1,SWV,SAWANTWADI R,--,10:25,0,SWV,S,MAO,M\n";
        let records = parse_csv(input.as_bytes(), false).unwrap();
        assert_eq!(records[0].arrival_time, "--");
        assert_eq!(records[0].departure_time, "10:25");
    }

    #[test]
    fn empty_input() {
        assert!(parse_csv("".as_bytes(), true).unwrap().is_empty());
    }
}
