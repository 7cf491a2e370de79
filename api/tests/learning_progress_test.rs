mod helpers;

use axum::http::StatusCode;
use db::models::course::{Difficulty, Model as CourseModel};
use db::models::learning_progress::Model as ProgressModel;
use db::models::user::Model as UserModel;
use sea_orm::DatabaseConnection;
use serde_json::json;

async fn seed(db: &DatabaseConnection) -> (UserModel, CourseModel) {
    let user = UserModel::create(db, "learner", "learner@example.com")
        .await
        .unwrap();
    let course = CourseModel::create(db, "Course", "", Difficulty::Beginner, 10)
        .await
        .unwrap();
    (user, course)
}

#[tokio::test]
async fn bulk_update_applies_all_items() {
    let (app, state) = helpers::make_test_app().await;
    let (user, course) = seed(state.db()).await;
    let other = UserModel::create(state.db(), "other", "other@example.com")
        .await
        .unwrap();

    let (status, body) = helpers::post_json(
        &app,
        "/api/learning-progress/bulk-update",
        json!([
            { "user_id": user.id, "course_id": course.id, "lessons_completed": 5, "time_spent_minutes": 30 },
            { "user_id": other.id, "course_id": course.id, "lessons_completed": 10, "time_spent_minutes": 45 }
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "success");
    assert_eq!(body["data"]["updated_count"], 2);

    let records = ProgressModel::for_user(state.db(), user.id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert!((records[0].completion_percentage - 50.0).abs() < 1e-6);

    let done = ProgressModel::for_user(state.db(), other.id).await.unwrap();
    assert!(done[0].completed_at.is_some());
}

#[tokio::test]
async fn bulk_update_reports_partial_failure() {
    let (app, state) = helpers::make_test_app().await;
    let (user, course) = seed(state.db()).await;

    let (status, body) = helpers::post_json(
        &app,
        "/api/learning-progress/bulk-update",
        json!([
            { "user_id": user.id, "course_id": course.id, "lessons_completed": 3, "time_spent_minutes": 10 },
            { "user_id": 999, "course_id": course.id, "lessons_completed": 1, "time_spent_minutes": 5 },
            { "user_id": user.id, "course_id": course.id, "lessons_completed": 11, "time_spent_minutes": 5 }
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["updated_count"], 1);

    let errors = body["data"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["index"], 1);
    assert!(errors[0]["message"].as_str().unwrap().contains("999"));
    assert_eq!(errors[1]["index"], 2);
    assert!(errors[1]["message"].as_str().unwrap().contains("10"));

    // The valid item still landed.
    let records = ProgressModel::for_user(state.db(), user.id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].lessons_completed, 3);
}

#[tokio::test]
async fn list_returns_recently_accessed_first() {
    let (app, state) = helpers::make_test_app().await;
    let (user, course) = seed(state.db()).await;
    let second = CourseModel::create(state.db(), "Second", "", Difficulty::Advanced, 5)
        .await
        .unwrap();

    ProgressModel::upsert(state.db(), user.id, course.id, 1, 5)
        .await
        .unwrap();
    ProgressModel::upsert(state.db(), user.id, second.id, 1, 5)
        .await
        .unwrap();

    let (status, body) = helpers::get(&app, "/api/learning-progress").await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
}
