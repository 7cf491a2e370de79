//! Routes under `/dashboard`.

pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

use self::get::get_dashboard;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}
