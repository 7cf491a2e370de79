use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use db::models::api_response_log::Model as LogModel;
use serde::Deserialize;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::db_error;

/// Lookback for the raw log listing.
const RECENT_WINDOW_DAYS: i64 = 7;

/// Accepted statistics windows, in hours.
const MIN_WINDOW_HOURS: i64 = 1;
const MAX_WINDOW_HOURS: i64 = 168;
const DEFAULT_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
pub struct LogListParams {
    pub endpoint: Option<String>,
}

/// GET /api/api-logs
///
/// Raw request logs from the last 7 days, newest first. `endpoint` filters
/// by substring match on the request path.
pub async fn get_api_logs(
    State(state): State<AppState>,
    Query(params): Query<LogListParams>,
) -> Response {
    let since = Utc::now() - Duration::days(RECENT_WINDOW_DAYS);
    match LogModel::recent(state.db(), since, params.endpoint.as_deref()).await {
        Ok(logs) => (
            StatusCode::OK,
            Json(ApiResponse::success(logs, "API logs retrieved successfully")),
        )
            .into_response(),
        Err(err) => db_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatisticsParams {
    pub hours: Option<i64>,
}

/// GET /api/api-logs/statistics
///
/// Per-endpoint traffic statistics over a trailing window. `hours` defaults
/// to 24 and must be between 1 and 168 (one week).
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "endpoint": "/api/courses",
///       "total_requests": 120,
///       "average_response_time": 41.3,
///       "min_response_time": 3.1,
///       "max_response_time": 310.0,
///       "cache_hit_rate": 40.0,
///       "error_rate": 2.5
///     }
///   ],
///   "message": "Endpoint statistics computed successfully"
/// }
/// ```
/// - `400 Bad Request` when `hours` is outside the accepted range
pub async fn get_statistics(
    State(state): State<AppState>,
    Query(params): Query<StatisticsParams>,
) -> Response {
    let hours = params.hours.unwrap_or(DEFAULT_WINDOW_HOURS);
    if !(MIN_WINDOW_HOURS..=MAX_WINDOW_HOURS).contains(&hours) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format!(
                "hours must be between {MIN_WINDOW_HOURS} and {MAX_WINDOW_HOURS}"
            ))),
        )
            .into_response();
    }

    let since = Utc::now() - Duration::hours(hours);
    match LogModel::statistics(state.db(), since).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                stats,
                "Endpoint statistics computed successfully",
            )),
        )
            .into_response(),
        Err(err) => db_error(err),
    }
}
