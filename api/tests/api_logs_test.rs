mod helpers;

use axum::http::StatusCode;
use db::models::api_response_log::{Model as LogModel, RequestRecord};
use sea_orm::DatabaseConnection;

async fn seed_logs(db: &DatabaseConnection) {
    for i in 0..4 {
        let record = RequestRecord {
            endpoint: "/seeded".to_owned(),
            method: "GET".to_owned(),
            response_time_ms: 100.0 + f64::from(i),
            status_code: if i == 3 { 500 } else { 200 },
            user_id: None,
            cache_hit: i < 2,
            query_count: 1,
            request_size_bytes: 0,
            response_size_bytes: 64,
        };
        LogModel::insert_record(db, record).await.unwrap();
    }
}

#[tokio::test]
async fn telemetry_records_every_handled_request() {
    let (app, state) = helpers::make_test_app().await;

    let (status, _body) = helpers::get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _body) = helpers::get(&app, "/api/courses/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let since = chrono::Utc::now() - chrono::Duration::hours(1);
    let logs = LogModel::recent(state.db(), since, None).await.unwrap();
    assert_eq!(logs.len(), 2);

    let health = logs.iter().find(|l| l.endpoint == "/api/health").unwrap();
    assert_eq!(health.method, "GET");
    assert_eq!(health.status_code, 200);
    assert!(health.response_time_ms >= 0.0);

    let missing = logs.iter().find(|l| l.endpoint == "/api/courses/999").unwrap();
    assert_eq!(missing.status_code, 404);
}

#[tokio::test]
async fn listing_filters_by_endpoint_fragment() {
    let (app, state) = helpers::make_test_app().await;
    seed_logs(state.db()).await;

    let (status, body) = helpers::get(&app, "/api/api-logs?endpoint=seeded").await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 4);
    assert!(data.iter().all(|row| row["endpoint"] == "/seeded"));
}

#[tokio::test]
async fn statistics_aggregate_per_endpoint() {
    let (app, state) = helpers::make_test_app().await;
    seed_logs(state.db()).await;

    let (status, body) = helpers::get(&app, "/api/api-logs/statistics?hours=24").await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    let seeded = data.iter().find(|row| row["endpoint"] == "/seeded").unwrap();
    assert_eq!(seeded["total_requests"], 4);
    assert_eq!(seeded["cache_hit_rate"], 50.0);
    assert_eq!(seeded["error_rate"], 25.0);
    assert_eq!(seeded["min_response_time"], 100.0);
    assert_eq!(seeded["max_response_time"], 103.0);
    assert_eq!(seeded["average_response_time"], 101.5);
}

#[tokio::test]
async fn statistics_window_is_bounded() {
    let (app, _state) = helpers::make_test_app().await;

    for uri in ["/api/api-logs/statistics?hours=0", "/api/api-logs/statistics?hours=169"] {
        let (status, body) = helpers::get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("168"));
    }

    // Default window is accepted.
    let (status, _body) = helpers::get(&app, "/api/api-logs/statistics").await;
    assert_eq!(status, StatusCode::OK);
}
