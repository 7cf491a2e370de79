use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::learning_progress::{BulkProgressItem, Model as ProgressModel};
use serde_json::json;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::db_error;

/// POST /api/learning-progress/bulk-update
///
/// Applies an array of progress updates. Items are independent; a failing
/// item never blocks the others, and the response always reports how many
/// landed.
///
/// ### Request body
/// ```json
/// [
///   { "user_id": 1, "course_id": 2, "lessons_completed": 5, "time_spent_minutes": 30 }
/// ]
/// ```
///
/// ### Responses
/// - `200 OK` — every item applied:
///   `{ "data": { "status": "success", "updated_count": 3 } }`
/// - `400 Bad Request` — some items failed; `data` carries `updated_count`
///   and one `{index, user_id, course_id, message}` entry per failed item.
/// - `500 Internal Server Error` — the datastore itself failed.
pub async fn bulk_update(
    State(state): State<AppState>,
    Json(items): Json<Vec<BulkProgressItem>>,
) -> Response {
    let outcome = match ProgressModel::bulk_upsert(state.db(), &items).await {
        Ok(outcome) => outcome,
        Err(err) => return db_error(err),
    };

    if outcome.errors.is_empty() {
        return (
            StatusCode::OK,
            Json(ApiResponse::success(
                json!({
                    "status": "success",
                    "updated_count": outcome.updated_count,
                }),
                "Progress updated successfully",
            )),
        )
            .into_response();
    }

    let failed = outcome.errors.len();
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse {
            success: false,
            data: outcome,
            message: format!("{failed} progress update(s) failed"),
        }),
    )
        .into_response()
}
