use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::system_metric::{MetricName, Model as SystemMetricModel};
use serde::Deserialize;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::db_error;

/// Cap on the sample listing.
const LIST_LIMIT: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct SystemMetricParams {
    pub metric_name: Option<String>,
}

/// GET /api/system-metrics
///
/// System-level metric samples, newest first, capped at 100. `metric_name`
/// restricts the listing to one named series.
pub async fn get_system_metrics(
    State(state): State<AppState>,
    Query(params): Query<SystemMetricParams>,
) -> Response {
    let metric_name = match params.metric_name.as_deref() {
        Some(raw) => match raw.parse::<MetricName>() {
            Ok(metric_name) => Some(metric_name),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<()>::error(format!(
                        "Unknown metric_name '{raw}'"
                    ))),
                )
                    .into_response();
            }
        },
        None => None,
    };

    match SystemMetricModel::recent(state.db(), metric_name, LIST_LIMIT).await {
        Ok(samples) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                samples,
                "System metrics retrieved successfully",
            )),
        )
            .into_response(),
        Err(err) => db_error(err),
    }
}
