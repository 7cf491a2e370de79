mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn health_reports_ok() {
    let (app, _state) = helpers::make_test_app().await;

    let (status, body) = helpers::get(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}
