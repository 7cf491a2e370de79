use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::course::Model as CourseModel;
use util::state::AppState;
use validator::Validate;

use super::common::CreateCourseRequest;
use crate::response::ApiResponse;
use crate::routes::{db_error, validation_message};

/// POST /api/courses
///
/// Creates a course. The body is validated before any write.
///
/// ### Responses
/// - `201 Created` with the new course
/// - `400 Bad Request` with a field-level message
pub async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<CreateCourseRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(validation_message(&errors))),
        )
            .into_response();
    }

    match CourseModel::create(
        state.db(),
        &req.title,
        &req.description,
        req.difficulty,
        req.total_lessons,
    )
    .await
    {
        Ok(course) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(course, "Course created successfully")),
        )
            .into_response(),
        Err(err) => db_error(err),
    }
}
