//! Route registration for the API.
//!
//! Each resource lives in its own module with one file per HTTP verb and a
//! `*_routes()` builder; this module nests them into the final tree. The
//! server binary mounts the whole tree under `/api` and wraps it in the
//! telemetry middleware.

pub mod api_logs;
pub mod courses;
pub mod dashboard;
pub mod health;
pub mod learning_progress;
pub mod performance_metrics;
pub mod system_metrics;
pub mod users;

use crate::response::ApiResponse;
use axum::{
    Json, Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use util::state::AppState;

/// Builds the application's route tree.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/users", users::users_routes())
        .nest("/courses", courses::courses_routes())
        .nest(
            "/learning-progress",
            learning_progress::learning_progress_routes(),
        )
        .nest(
            "/performance-metrics",
            performance_metrics::performance_metrics_routes(),
        )
        .nest("/api-logs", api_logs::api_logs_routes())
        .nest("/system-metrics", system_metrics::system_metrics_routes())
        .nest("/dashboard", dashboard::dashboard_routes())
        .with_state(app_state)
}

/// 500 response for unexpected database failures. The error detail goes to
/// the log, never to the client.
pub(crate) fn db_error(err: DbErr) -> Response {
    tracing::error!("Database error: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("An internal server error occurred")),
    )
        .into_response()
}

/// Flattens `validator` output into one field-level message string.
pub(crate) fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// Serves a pre-serialized `ApiResponse` body, as stored in the response
/// cache.
pub(crate) fn json_body(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
