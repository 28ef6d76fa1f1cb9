//! Domain types for the route query engine.
//!
//! This module contains the timetable data model: stop records as decoded
//! from the store, validated clock times, and measured segments. Segments
//! enforce their invariants at construction time, so code that receives a
//! `Segment` can trust its distance and duration.

mod error;
mod segment;
mod stop;
mod time;

pub use error::{DomainError, TimeField};
pub use segment::Segment;
pub use stop::{StopKey, StopRecord};
pub use time::{ClockTime, TimeError, TravelTime};
