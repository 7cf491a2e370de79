//! Routes under `/users`.

pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

use self::get::{get_user_learning_progress, get_user_performance, get_users};

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/{user_id}/performance", get(get_user_performance))
        .route(
            "/{user_id}/learning-progress",
            get(get_user_learning_progress),
        )
}
