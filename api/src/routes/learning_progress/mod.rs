//! Routes under `/learning-progress`.

pub mod get;
pub mod post;

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

use self::get::get_learning_progress;
use self::post::bulk_update;

pub fn learning_progress_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_learning_progress))
        .route("/bulk-update", post(bulk_update))
}
