//! Routes under `/api-logs`.

pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

use self::get::{get_api_logs, get_statistics};

pub fn api_logs_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_api_logs))
        .route("/statistics", get(get_statistics))
}
