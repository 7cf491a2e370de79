//! Routes under `/system-metrics`.

pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

use self::get::get_system_metrics;

pub fn system_metrics_routes() -> Router<AppState> {
    Router::new().route("/", get(get_system_metrics))
}
