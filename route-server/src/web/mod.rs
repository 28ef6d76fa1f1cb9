//! Web layer for the route query server.
//!
//! Provides HTTP endpoints for browsing the timetable and running route
//! queries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
