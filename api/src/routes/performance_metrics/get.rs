use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::user_performance_metric::{MetricFilter, MetricType, Model as MetricModel};
use serde::Deserialize;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::db_error;

#[derive(Debug, Deserialize)]
pub struct MetricListParams {
    pub metric_type: Option<String>,
    pub is_optimized: Option<bool>,
}

/// GET /api/performance-metrics
///
/// Metric samples, newest first. Filters compose:
/// - `metric_type` — `page_load`, `api_response`, `engagement`, `conversion`
/// - `is_optimized` — `true`/`false`
pub async fn get_performance_metrics(
    State(state): State<AppState>,
    Query(params): Query<MetricListParams>,
) -> Response {
    let metric_type = match params.metric_type.as_deref() {
        Some(raw) => match raw.parse::<MetricType>() {
            Ok(metric_type) => Some(metric_type),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<()>::error(format!(
                        "Unknown metric_type '{raw}'"
                    ))),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let filter = MetricFilter {
        metric_type,
        is_optimized: params.is_optimized,
    };
    match MetricModel::filtered(state.db(), &filter).await {
        Ok(samples) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                samples,
                "Performance metrics retrieved successfully",
            )),
        )
            .into_response(),
        Err(err) => db_error(err),
    }
}

/// GET /api/performance-metrics/comparison
///
/// Before/after averages per metric type, with the improvement percentage
/// signed so positive always means improved. Metric types missing samples
/// in either group are omitted.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "metric_type": "api_response",
///       "before_optimization": 250.0,
///       "after_optimization": 175.0,
///       "improvement_percentage": 30.0,
///       "sample_size": 6
///     }
///   ],
///   "message": "Metric comparison computed successfully"
/// }
/// ```
pub async fn get_comparison(State(state): State<AppState>) -> Response {
    match MetricModel::compare_all(state.db()).await {
        Ok(comparisons) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                comparisons,
                "Metric comparison computed successfully",
            )),
        )
            .into_response(),
        Err(err) => db_error(err),
    }
}
