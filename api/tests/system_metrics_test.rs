mod helpers;

use axum::http::StatusCode;
use db::models::system_metric::{MetricName, Model as SystemMetricModel};

#[tokio::test]
async fn list_filters_by_metric_name() {
    let (app, state) = helpers::make_test_app().await;
    let db = state.db();

    SystemMetricModel::record(db, MetricName::CacheHitRate, 82.5, "%")
        .await
        .unwrap();
    SystemMetricModel::record(db, MetricName::TotalUsers, 1200.0, "count")
        .await
        .unwrap();

    let (status, body) = helpers::get(&app, "/api/system-metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) =
        helpers::get(&app, "/api/system-metrics?metric_name=cache_hit_rate").await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["value"], 82.5);
    assert_eq!(data[0]["unit"], "%");
}

#[tokio::test]
async fn unknown_metric_name_is_rejected() {
    let (app, _state) = helpers::make_test_app().await;

    let (status, body) = helpers::get(&app, "/api/system-metrics?metric_name=uptime").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("uptime"));
}
