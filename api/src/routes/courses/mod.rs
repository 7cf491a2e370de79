//! Routes under `/courses`.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use util::state::AppState;

use self::delete::delete_course;
use self::get::{get_course, get_course_students, get_courses, get_popular_courses};
use self::post::create_course;
use self::put::edit_course;

pub fn courses_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_courses))
        .route("/", post(create_course))
        .route("/popular", get(get_popular_courses))
        .route("/{course_id}", get(get_course))
        .route("/{course_id}", put(edit_course))
        .route("/{course_id}", delete(delete_course))
        .route("/{course_id}/students", get(get_course_students))
}
