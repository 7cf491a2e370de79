use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::learning_progress::Model as ProgressModel;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::db_error;

/// GET /api/learning-progress
///
/// All progress records, most recently accessed first.
pub async fn get_learning_progress(State(state): State<AppState>) -> Response {
    match ProgressModel::get_all(state.db()).await {
        Ok(records) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                records,
                "Learning progress retrieved successfully",
            )),
        )
            .into_response(),
        Err(err) => db_error(err),
    }
}
