use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::course::Model as CourseModel;
use util::state::AppState;
use validator::Validate;

use super::common::UpdateCourseRequest;
use crate::response::ApiResponse;
use crate::routes::{db_error, validation_message};

/// PUT /api/courses/{course_id}
///
/// Replaces a course's editable fields. `updated_at` is refreshed.
///
/// ### Responses
/// - `200 OK` with the updated course
/// - `400 Bad Request` on validation failure
/// - `404 Not Found` when the course does not exist
pub async fn edit_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(req): Json<UpdateCourseRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(validation_message(&errors))),
        )
            .into_response();
    }

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

    match CourseModel::edit(
        db,
        course_id,
        &req.title,
        &req.description,
        req.difficulty,
        req.is_active,
        req.total_lessons,
    )
    .await
    {
        Ok(course) => (
            StatusCode::OK,
            Json(ApiResponse::success(course, "Course updated successfully")),
        )
            .into_response(),
        Err(err) => db_error(err),
    }
}
