//! HTTP route handlers.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::cache::QueryKind;
use crate::domain::StopRecord;
use crate::planner::{QueryError, RouteQuery, TimetableIndex, distance_query, duration_query};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/fetch", get(fetch))
        .route("/search", get(search))
        .route("/searchDist", get(search_dist))
        .route("/sortDist", get(sort_dist))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// One page of stop records in store order.
async fn fetch(
    State(state): State<AppState>,
    Query(req): Query<FetchRequest>,
) -> Result<Json<Vec<StopRecord>>, AppError> {
    let page = match req.page.as_deref() {
        None | Some("") => 0,
        Some(raw) => raw.parse::<usize>().map_err(|_| AppError::BadRequest {
            message: format!("Invalid page: {raw}"),
        })?,
    };

    Ok(Json(state.store.page(page).await))
}

/// Stop records matching every supplied field.
async fn search(
    State(state): State<AppState>,
    Query(req): Query<SearchRequest>,
) -> Json<Vec<StopRecord>> {
    let filter = req.into_filter();
    Json(state.store.search(&filter).await)
}

/// Nearest and farthest destination stop per boarding stop.
async fn search_dist(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let query = route_query(req)?;
    cached_query(&state, QueryKind::Distance, &query, |index, query| {
        let report = distance_query(index, query)?;
        to_json(&DistanceResponse::from_report(&report))
    })
    .await
}

/// Matching segments, fastest first.
async fn sort_dist(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let query = route_query(req)?;
    cached_query(&state, QueryKind::Duration, &query, |index, query| {
        let report = duration_query(index, query)?;
        to_json(&SortDistResponse::from_report(&report))
    })
    .await
}

fn route_query(req: RouteRequest) -> Result<RouteQuery, AppError> {
    let origin = req.origin.unwrap_or_default();
    let destination = req.destination.unwrap_or_default();
    Ok(RouteQuery::new(origin, destination)?)
}

/// Serve a query from the cache, or run it against the current snapshot
/// and cache the response.
///
/// Errors are never cached. The key is taken before the snapshot, so a
/// response built from a timetable that ingestion has since replaced is
/// filed under a generation no later request reads.
async fn cached_query<F>(
    state: &AppState,
    kind: QueryKind,
    query: &RouteQuery,
    run: F,
) -> Result<Json<serde_json::Value>, AppError>
where
    F: FnOnce(&TimetableIndex, &RouteQuery) -> Result<serde_json::Value, AppError>,
{
    let key = state.cache.key(kind, query.origin(), query.destination());

    if let Some(cached) = state.cache.get(&key).await {
        debug!(
            ?kind,
            origin = query.origin(),
            destination = query.destination(),
            "cache hit"
        );
        return Ok(Json(cached.as_ref().clone()));
    }

    let index = state.store.snapshot().await;
    let body = run(&index, query)?;

    state.cache.insert(key, Arc::new(body.clone())).await;
    Ok(Json(body))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::Internal {
        message: format!("Serialization error: {e}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unprocessable { message: String },
    Internal { message: String },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::InvalidQuery(message) => AppError::BadRequest { message },
            QueryError::DataIntegrity(_) => AppError::Unprocessable {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
