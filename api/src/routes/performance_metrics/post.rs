use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::user::Model as UserModel;
use db::models::user_performance_metric::{MetricType, Model as MetricModel};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::{db_error, validation_message};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMetricRequest {
    pub user_id: i64,
    pub metric_type: MetricType,
    #[validate(range(min = 0.0, message = "value cannot be negative"))]
    pub value: f64,
    #[serde(default)]
    pub is_optimized: bool,
}

/// POST /api/performance-metrics
///
/// Records one metric sample for a user.
///
/// ### Responses
/// - `201 Created` with the stored sample
/// - `400 Bad Request` on a negative value or unknown user
pub async fn create_metric(
    State(state): State<AppState>,
    Json(req): Json<CreateMetricRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(validation_message(&errors))),
        )
            .into_response();
    }

    let db = state.db();
    match UserModel::exists(db, req.user_id).await {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(format!(
                    "User {} does not exist",
                    req.user_id
                ))),
            )
                .into_response();
        }
        Err(err) => return db_error(err),
    }

    match MetricModel::record(db, req.user_id, req.metric_type, req.value, req.is_optimized).await {
        Ok(sample) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                sample,
                "Performance metric recorded successfully",
            )),
        )
            .into_response(),
        Err(err) => db_error(err),
    }
}
