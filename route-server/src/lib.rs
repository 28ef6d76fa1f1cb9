//! Route query server for railway timetables.
//!
//! Answers "which trains run from station X to station Y, how far, and how
//! long?" over a timetable loaded from CSV, and serves the answers over
//! HTTP.

pub mod cache;
pub mod config;
pub mod domain;
pub mod ingest;
pub mod logging;
pub mod planner;
pub mod store;
pub mod web;
