use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;
use util::state::AppState;

use crate::response::ApiResponse;

/// GET /api/health
///
/// Liveness probe. Static payload, no database access.
async fn health() -> impl IntoResponse {
    Json(ApiResponse::success(
        json!({ "status": "ok" }),
        "Service is healthy",
    ))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}
