use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use db::models::api_response_log::Model as LogModel;
use db::models::course::Model as CourseModel;
use db::models::learning_progress::Model as ProgressModel;
use db::models::user::Model as UserModel;
use db::models::user_performance_metric::{MetricType, Model as MetricModel};
use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;
use util::{config, state::AppState};

use crate::response::ApiResponse;
use crate::routes::{db_error, json_body};

/// Cache key; matches the mounted request path so the telemetry middleware
/// sees hits.
const DASHBOARD_CACHE_KEY: &str = "/api/dashboard";

/// Point-in-time aggregate over the whole platform. Averages and rates are
/// rounded to two decimals.
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub total_users: u64,
    pub active_users_24h: u64,
    pub total_courses: u64,
    pub total_enrollments: u64,
    pub average_completion_rate: f64,
    /// Mean page_load metric value over the last 24h, 0 without samples.
    pub avg_page_load_time: f64,
    /// Mean logged response time over the last 24h, 0 without traffic.
    pub avg_api_response_time: f64,
    pub cache_hit_rate: f64,
    /// Before/after improvement for api_response samples, 0 without a baseline.
    pub performance_improvement: f64,
    /// Before/after improvement for engagement samples, 0 without a baseline.
    pub engagement_improvement: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

async fn improvement(db: &DatabaseConnection, metric_type: MetricType) -> Result<f64, DbErr> {
    let before = MetricModel::average(db, metric_type, Some(false), None).await?;
    let after = MetricModel::average(db, metric_type, Some(true), None).await?;
    Ok(match (before, after) {
        (Some(before), Some(after)) if before != 0.0 => {
            round2(metric_type.improvement_percentage(before, after))
        }
        _ => 0.0,
    })
}

async fn snapshot(db: &DatabaseConnection) -> Result<DashboardSnapshot, DbErr> {
    let day_ago = Utc::now() - Duration::hours(24);

    Ok(DashboardSnapshot {
        total_users: UserModel::count(db).await?,
        active_users_24h: UserModel::active_since(db, day_ago).await?,
        total_courses: CourseModel::count_active(db).await?,
        total_enrollments: ProgressModel::count(db).await?,
        average_completion_rate: round2(ProgressModel::average_completion(db).await?),
        avg_page_load_time: round2(
            MetricModel::average(db, MetricType::PageLoad, None, Some(day_ago))
                .await?
                .unwrap_or(0.0),
        ),
        avg_api_response_time: round2(
            LogModel::average_response_time(db, None, day_ago).await?,
        ),
        cache_hit_rate: round2(LogModel::cache_hit_rate(db, day_ago).await?),
        performance_improvement: improvement(db, MetricType::ApiResponse).await?,
        engagement_improvement: improvement(db, MetricType::Engagement).await?,
    })
}

/// GET /api/dashboard
///
/// Aggregate snapshot for the admin dashboard. The serialized response is
/// cached; within the TTL every caller gets the same body without touching
/// the database, so the snapshot may lag writes by up to the TTL.
pub async fn get_dashboard(State(state): State<AppState>) -> Response {
    if let Some(body) = state.cache().get(DASHBOARD_CACHE_KEY).await {
        return json_body(body);
    }

    let snapshot = match snapshot(state.db()).await {
        Ok(snapshot) => snapshot,
        Err(err) => return db_error(err),
    };

    let envelope = ApiResponse::success(snapshot, "Dashboard retrieved successfully");
    let body = match serde_json::to_string(&envelope) {
        Ok(body) => body,
        Err(err) => {
            tracing::error!("Failed to serialize dashboard snapshot: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("An internal server error occurred")),
            )
                .into_response();
        }
    };

    state
        .cache()
        .put(
            DASHBOARD_CACHE_KEY,
            body.clone(),
            std::time::Duration::from_secs(config::dashboard_cache_seconds()),
        )
        .await;
    json_body(body)
}
