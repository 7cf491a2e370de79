mod helpers;

use axum::http::StatusCode;
use db::models::course::{Difficulty, Model as CourseModel};
use db::models::learning_progress::Model as ProgressModel;
use db::models::user::Model as UserModel;
use serde_json::json;

#[tokio::test]
async fn create_list_edit_delete_roundtrip() {
    let (app, state) = helpers::make_test_app().await;

    let (status, body) = helpers::post_json(
        &app,
        "/api/courses",
        json!({
            "title": "Rust Basics",
            "description": "Ownership and borrowing",
            "difficulty": "beginner",
            "total_lessons": 12
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["title"], "Rust Basics");
    assert_eq!(body["data"]["is_active"], true);
    let course_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = helpers::get(&app, &format!("/api/courses/{course_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_lessons"], 12);

    let (status, body) = helpers::put_json(
        &app,
        &format!("/api/courses/{course_id}"),
        json!({
            "title": "Rust Basics",
            "description": "Ownership and borrowing",
            "difficulty": "intermediate",
            "is_active": false,
            "total_lessons": 14
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["difficulty"], "intermediate");
    assert_eq!(body["data"]["is_active"], false);

    let (status, _body) = helpers::delete(&app, &format!("/api/courses/{course_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        CourseModel::get_by_id(state.db(), course_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn list_filters_compose() {
    let (app, state) = helpers::make_test_app().await;
    let db = state.db();

    CourseModel::create(db, "A", "", Difficulty::Beginner, 5)
        .await
        .unwrap();
    let b = CourseModel::create(db, "B", "", Difficulty::Advanced, 5)
        .await
        .unwrap();
    let c = CourseModel::create(db, "C", "", Difficulty::Advanced, 5)
        .await
        .unwrap();
    CourseModel::edit(db, c.id, "C", "", Difficulty::Advanced, false, 5)
        .await
        .unwrap();

    let (status, body) =
        helpers::get(&app, "/api/courses?is_active=true&difficulty=advanced").await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"].as_i64().unwrap(), b.id);
}

#[tokio::test]
async fn unknown_difficulty_is_rejected() {
    let (app, _state) = helpers::make_test_app().await;

    let (status, body) = helpers::get(&app, "/api/courses?difficulty=legendary").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("legendary"));
}

#[tokio::test]
async fn invalid_create_payload_is_rejected() {
    let (app, _state) = helpers::make_test_app().await;

    let (status, body) = helpers::post_json(
        &app,
        "/api/courses",
        json!({ "title": "", "total_lessons": -3 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("title"));
    assert!(message.contains("total_lessons"));
}

#[tokio::test]
async fn popular_ranking_is_cached() {
    let (app, state) = helpers::make_test_app().await;
    let db = state.db();

    let quiet = CourseModel::create(db, "Quiet", "", Difficulty::Beginner, 10)
        .await
        .unwrap();
    let busy = CourseModel::create(db, "Busy", "", Difficulty::Beginner, 10)
        .await
        .unwrap();
    for i in 0..3 {
        let user = UserModel::create(db, &format!("u{i}"), &format!("u{i}@example.com"))
            .await
            .unwrap();
        ProgressModel::upsert(db, user.id, busy.id, 1, 5).await.unwrap();
        if i == 0 {
            ProgressModel::upsert(db, user.id, quiet.id, 1, 5).await.unwrap();
        }
    }

    let (status, first) = helpers::get(&app, "/api/courses/popular").await;
    assert_eq!(status, StatusCode::OK);
    let data = first["data"].as_array().unwrap();
    assert_eq!(data[0]["id"].as_i64().unwrap(), busy.id);
    assert_eq!(data[0]["enrollment_count"], 3);
    assert_eq!(data[1]["enrollment_count"], 1);

    assert!(state.cache().contains("/api/courses/popular").await);

    // A new enrollment is invisible until the cache entry expires.
    let late = UserModel::create(db, "late", "late@example.com").await.unwrap();
    ProgressModel::upsert(db, late.id, quiet.id, 1, 5).await.unwrap();

    let (status, second) = helpers::get(&app, "/api/courses/popular").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, first);
}

#[tokio::test]
async fn missing_course_is_not_found() {
    let (app, _state) = helpers::make_test_app().await;

    let (status, body) = helpers::get(&app, "/api/courses/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _body) = helpers::delete(&app, "/api/courses/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn students_lists_course_enrollments() {
    let (app, state) = helpers::make_test_app().await;
    let db = state.db();

    let course = CourseModel::create(db, "Course", "", Difficulty::Beginner, 10)
        .await
        .unwrap();
    let user = UserModel::create(db, "alice", "alice@example.com").await.unwrap();
    ProgressModel::upsert(db, user.id, course.id, 4, 20).await.unwrap();

    let (status, body) = helpers::get(&app, &format!("/api/courses/{}/students", course.id)).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["user_id"].as_i64().unwrap(), user.id);
}
