//! Routes under `/performance-metrics`.

pub mod get;
pub mod post;

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

use self::get::{get_comparison, get_performance_metrics};
use self::post::create_metric;

pub fn performance_metrics_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_performance_metrics))
        .route("/", post(create_metric))
        .route("/comparison", get(get_comparison))
}
