use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::course::{CourseFilter, Difficulty, Model as CourseModel};
use db::models::learning_progress::Model as ProgressModel;
use serde::Deserialize;
use std::time::Duration;
use util::{config, state::AppState};

use super::common::RankedCourse;
use crate::response::ApiResponse;
use crate::routes::{db_error, json_body};

/// How many courses the popular ranking returns.
const POPULAR_LIMIT: usize = 10;

/// Cache key for the popular ranking; matches the mounted request path so
/// the telemetry middleware sees hits.
const POPULAR_CACHE_KEY: &str = "/api/courses/popular";

#[derive(Debug, Deserialize)]
pub struct CourseListParams {
    pub is_active: Option<bool>,
    pub difficulty: Option<String>,
}

/// GET /api/courses
///
/// Course list, ordered by title. Supports two explicit filters, applied
/// together when both are present:
/// - `is_active` — `true`/`false`
/// - `difficulty` — `beginner`, `intermediate` or `advanced`
///
/// Unknown difficulty values are a `400 Bad Request`; unknown query
/// parameters are ignored.
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseListParams>,
) -> Response {
    let difficulty = match params.difficulty.as_deref() {
        Some(raw) => match raw.parse::<Difficulty>() {
            Ok(difficulty) => Some(difficulty),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<()>::error(format!(
                        "Unknown difficulty '{raw}'"
                    ))),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let filter = CourseFilter {
        is_active: params.is_active,
        difficulty,
    };
    match CourseModel::filter(state.db(), &filter).await {
        Ok(courses) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                courses,
                "Courses retrieved successfully",
            )),
        )
            .into_response(),
        Err(err) => db_error(err),
    }
}

/// GET /api/courses/popular
///
/// The 10 most enrolled courses with their enrollment counts, descending.
/// The serialized response is cached; within the TTL all callers get the
/// same body without touching the database.
pub async fn get_popular_courses(State(state): State<AppState>) -> Response {
    if let Some(body) = state.cache().get(POPULAR_CACHE_KEY).await {
        return json_body(body);
    }

    let ranked = match CourseModel::popular(state.db(), POPULAR_LIMIT).await {
        Ok(ranked) => ranked,
        Err(err) => return db_error(err),
    };
    let data: Vec<RankedCourse> = ranked
        .into_iter()
        .map(|(course, enrollment_count)| RankedCourse {
            course,
            enrollment_count,
        })
        .collect();

    let envelope = ApiResponse::success(data, "Popular courses retrieved successfully");
    let body = match serde_json::to_string(&envelope) {
        Ok(body) => body,
        Err(err) => {
            tracing::error!("Failed to serialize popular courses: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("An internal server error occurred")),
            )
                .into_response();
        }
    };

    state
        .cache()
        .put(
            POPULAR_CACHE_KEY,
            body.clone(),
            Duration::from_secs(config::popular_courses_cache_seconds()),
        )
        .await;
    json_body(body)
}

/// GET /api/courses/{course_id}
pub async fn get_course(State(state): State<AppState>, Path(course_id): Path<i64>) -> Response {
    match CourseModel::get_by_id(state.db(), course_id).await {
        Ok(Some(course)) => (
            StatusCode::OK,
            Json(ApiResponse::success(course, "Course retrieved successfully")),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(format!(
                "Course {course_id} not found"
            ))),
        )
            .into_response(),
        Err(err) => db_error(err),
    }
}

/// GET /api/courses/{course_id}/students
///
/// Progress records of everyone enrolled in the course, most recently
/// accessed first.
pub async fn get_course_students(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Response {
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

    match ProgressModel::for_course(db, course_id).await {
        Ok(records) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                records,
                "Enrolled students retrieved successfully",
            )),
        )
            .into_response(),
        Err(err) => db_error(err),
    }
}
