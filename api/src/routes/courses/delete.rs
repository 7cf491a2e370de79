use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::course::Model as CourseModel;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::db_error;

/// DELETE /api/courses/{course_id}
///
/// Deletes a course. Progress records for the course cascade away at the
/// database level.
pub async fn delete_course(State(state): State<AppState>, Path(course_id): Path<i64>) -> Response {
    let db = state.db();

    match CourseModel::get_by_id(db, course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error(format!(
                    "Course {course_id} not found"
                ))),
            )
                .into_response();
        }
        Err(err) => return db_error(err),
    }

    match CourseModel::delete_by_id(db, course_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Course deleted successfully")),
        )
            .into_response(),
        Err(err) => db_error(err),
    }
}
