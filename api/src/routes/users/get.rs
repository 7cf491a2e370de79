use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::{
    learning_progress::{self, Model as ProgressModel},
    user::Model as UserModel,
    user_performance_metric::Model as MetricModel,
};
use sea_orm::{EntityTrait, QuerySelect};
use serde::Serialize;
use std::collections::HashMap;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::db_error;

/// Cap on the metric history returned for one user.
const USER_METRIC_LIMIT: u64 = 100;

/// A user together with enrollment counts derived from progress records.
#[derive(Serialize)]
pub struct UserListItem {
    #[serde(flatten)]
    pub user: UserModel,
    pub enrollment_count: i64,
    pub completed_courses: i64,
}

/// GET /api/users
///
/// All users ordered by username, each with the number of courses they are
/// enrolled in and the number they have completed.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 1,
///       "username": "alice",
///       "email": "alice@example.com",
///       "enrollment_count": 3,
///       "completed_courses": 1
///     }
///   ],
///   "message": "Users retrieved successfully"
/// }
/// ```
pub async fn get_users(State(state): State<AppState>) -> Response {
    let db = state.db();

    let users = match UserModel::get_all(db).await {
        Ok(users) => users,
        Err(err) => return db_error(err),
    };

    let rows: Vec<(i64, f64)> = match learning_progress::Entity::find()
        .select_only()
        .column(learning_progress::Column::UserId)
        .column(learning_progress::Column::CompletionPercentage)
        .into_tuple()
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(err) => return db_error(err),
    };

    let mut enrollments: HashMap<i64, (i64, i64)> = HashMap::new();
    for (user_id, completion) in rows {
        let entry = enrollments.entry(user_id).or_default();
        entry.0 += 1;
        if completion >= 100.0 {
            entry.1 += 1;
        }
    }

    let items: Vec<UserListItem> = users
        .into_iter()
        .map(|user| {
            let (enrollment_count, completed_courses) =
                enrollments.get(&user.id).copied().unwrap_or((0, 0));
            UserListItem {
                user,
                enrollment_count,
                completed_courses,
            }
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(items, "Users retrieved successfully")),
    )
        .into_response()
}

/// GET /api/users/{user_id}/performance
///
/// Metric samples for one user, newest first, capped at 100.
///
/// ### Responses
/// - `200 OK` with the sample list
/// - `404 Not Found` when the user does not exist
pub async fn get_user_performance(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Response {
    let db = state.db();

    match UserModel::exists(db, user_id).await {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error(format!("User {user_id} not found"))),
            )
                .into_response();
        }
        Err(err) => return db_error(err),
    }

    match MetricModel::for_user(db, user_id, USER_METRIC_LIMIT).await {
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

/// GET /api/users/{user_id}/learning-progress
///
/// Progress records for one user, most recently accessed first.
pub async fn get_user_learning_progress(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Response {
    let db = state.db();

    match UserModel::exists(db, user_id).await {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error(format!("User {user_id} not found"))),
            )
                .into_response();
        }
        Err(err) => return db_error(err),
    }

    match ProgressModel::for_user(db, user_id).await {
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
