use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, QueryOrder, Set};
use serde::Serialize;
use std::collections::HashMap;

use super::round2;

/// One logged HTTP call. Append-only; rows are written by the telemetry
/// middleware as a side effect of serving requests.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "api_response_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Request path, e.g. `/api/courses`.
    pub endpoint: String,
    pub method: String,
    pub response_time_ms: f64,
    pub status_code: i32,
    pub timestamp: DateTime<Utc>,
    pub user_id: Option<i64>,
    /// Whether the response was served from the response cache.
    pub cache_hit: bool,
    pub query_count: i32,
    pub request_size_bytes: i32,
    pub response_size_bytes: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields captured for one request by the telemetry middleware.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    pub endpoint: String,
    pub method: String,
    pub response_time_ms: f64,
    pub status_code: i32,
    pub user_id: Option<i64>,
    pub cache_hit: bool,
    pub query_count: i32,
    pub request_size_bytes: i32,
    pub response_size_bytes: i32,
}

/// Aggregated statistics for one endpoint over a time window.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointStats {
    pub endpoint: String,
    pub total_requests: usize,
    pub average_response_time: f64,
    pub min_response_time: f64,
    pub max_response_time: f64,
    /// Percentage of requests served from cache, in [0, 100].
    pub cache_hit_rate: f64,
    /// Percentage of requests with status >= 400, in [0, 100].
    pub error_rate: f64,
}

/// Share of `part` in `total` as a percentage. Guards the empty-window case
/// so callers can reuse it on arbitrary counts.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

impl Model {
    /// Appends one log row.
    pub async fn insert_record(
        db: &DatabaseConnection,
        record: RequestRecord,
    ) -> Result<Self, DbErr> {
        let row = ActiveModel {
            id: NotSet,
            endpoint: Set(record.endpoint),
            method: Set(record.method),
            response_time_ms: Set(record.response_time_ms),
            status_code: Set(record.status_code),
            timestamp: Set(Utc::now()),
            user_id: Set(record.user_id),
            cache_hit: Set(record.cache_hit),
            query_count: Set(record.query_count),
            request_size_bytes: Set(record.request_size_bytes),
            response_size_bytes: Set(record.response_size_bytes),
        };
        row.insert(db).await
    }

    /// Logs at or after `since`, newest first, optionally restricted to
    /// endpoints containing `endpoint_fragment`.
    pub async fn recent(
        db: &DatabaseConnection,
        since: DateTime<Utc>,
        endpoint_fragment: Option<&str>,
    ) -> Result<Vec<Self>, DbErr> {
        let mut query = Entity::find().filter(Column::Timestamp.gte(since));
        if let Some(fragment) = endpoint_fragment {
            query = query.filter(Column::Endpoint.contains(fragment));
        }
        query.order_by_desc(Column::Timestamp).all(db).await
    }

    /// Mean response time over the window, optionally for one endpoint.
    /// 0 when the window is empty.
    pub async fn average_response_time(
        db: &DatabaseConnection,
        endpoint: Option<&str>,
        since: DateTime<Utc>,
    ) -> Result<f64, DbErr> {
        let mut query = Entity::find().filter(Column::Timestamp.gte(since));
        if let Some(endpoint) = endpoint {
            query = query.filter(Column::Endpoint.eq(endpoint));
        }
        let rows = query.all(db).await?;
        if rows.is_empty() {
            return Ok(0.0);
        }
        let sum: f64 = rows.iter().map(|r| r.response_time_ms).sum();
        Ok(sum / rows.len() as f64)
    }

    /// Percentage of requests in the window served from cache.
    pub async fn cache_hit_rate(
        db: &DatabaseConnection,
        since: DateTime<Utc>,
    ) -> Result<f64, DbErr> {
        let rows = Entity::find().filter(Column::Timestamp.gte(since)).all(db).await?;
        let hits = rows.iter().filter(|r| r.cache_hit).count();
        Ok(percentage(hits, rows.len()))
    }

    /// Per-endpoint statistics over the window, ordered by request count
    /// descending (ties break on endpoint for a stable order).
    pub async fn statistics(
        db: &DatabaseConnection,
        since: DateTime<Utc>,
    ) -> Result<Vec<EndpointStats>, DbErr> {
        let rows = Entity::find().filter(Column::Timestamp.gte(since)).all(db).await?;

        let mut by_endpoint: HashMap<String, Vec<&Self>> = HashMap::new();
        for row in &rows {
            by_endpoint.entry(row.endpoint.clone()).or_default().push(row);
        }

        let mut stats: Vec<EndpointStats> = by_endpoint
            .into_iter()
            .map(|(endpoint, rows)| {
                let total = rows.len();
                let sum: f64 = rows.iter().map(|r| r.response_time_ms).sum();
                let min = rows
                    .iter()
                    .map(|r| r.response_time_ms)
                    .fold(f64::INFINITY, f64::min);
                let max = rows
                    .iter()
                    .map(|r| r.response_time_ms)
                    .fold(f64::NEG_INFINITY, f64::max);
                let cache_hits = rows.iter().filter(|r| r.cache_hit).count();
                let errors = rows.iter().filter(|r| r.status_code >= 400).count();

                EndpointStats {
                    endpoint,
                    total_requests: total,
                    average_response_time: round2(sum / total as f64),
                    min_response_time: round2(min),
                    max_response_time: round2(max),
                    cache_hit_rate: round2(percentage(cache_hits, total)),
                    error_rate: round2(percentage(errors, total)),
                }
            })
            .collect();

        stats.sort_by(|a, b| {
            b.total_requests
                .cmp(&a.total_requests)
                .then_with(|| a.endpoint.cmp(&b.endpoint))
        });
        Ok(stats)
    }
}
