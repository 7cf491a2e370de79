use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A named scalar sample of system-wide state. Append-only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "system_metrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub metric_name: MetricName,
    pub value: f64,
    /// Unit of measurement (ms, %, count, ...).
    pub unit: String,
    pub timestamp: DateTime<Utc>,
}

/// The fixed set of system-level metric names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "system_metric_name")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MetricName {
    #[sea_orm(string_value = "total_users")]
    TotalUsers,
    #[sea_orm(string_value = "active_users")]
    ActiveUsers,
    #[sea_orm(string_value = "avg_page_load")]
    AvgPageLoad,
    #[sea_orm(string_value = "avg_api_response")]
    AvgApiResponse,
    #[sea_orm(string_value = "db_query_avg")]
    DbQueryAvg,
    #[sea_orm(string_value = "cache_hit_rate")]
    CacheHitRate,
    #[sea_orm(string_value = "error_rate")]
    ErrorRate,
    #[sea_orm(string_value = "concurrent_users")]
    ConcurrentUsers,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Appends one sample.
    pub async fn record(
        db: &DatabaseConnection,
        metric_name: MetricName,
        value: f64,
        unit: &str,
    ) -> Result<Self, DbErr> {
        let sample = ActiveModel {
            id: NotSet,
            metric_name: Set(metric_name),
            value: Set(value),
            unit: Set(unit.to_owned()),
            timestamp: Set(Utc::now()),
        };
        sample.insert(db).await
    }

    /// Samples, newest first, optionally restricted to one metric name and
    /// capped at `limit`.
    pub async fn recent(
        db: &DatabaseConnection,
        metric_name: Option<MetricName>,
        limit: u64,
    ) -> Result<Vec<Self>, DbErr> {
        let mut query = Entity::find();
        if let Some(metric_name) = metric_name {
            query = query.filter(Column::MetricName.eq(metric_name));
        }
        query
            .order_by_desc(Column::Timestamp)
            .limit(limit)
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::{MetricName, Model as SystemMetricModel};
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn record_and_list_by_name() {
        let db = setup_test_db().await;

        SystemMetricModel::record(&db, MetricName::CacheHitRate, 82.5, "%")
            .await
            .unwrap();
        SystemMetricModel::record(&db, MetricName::TotalUsers, 1200.0, "count")
            .await
            .unwrap();
        SystemMetricModel::record(&db, MetricName::CacheHitRate, 84.0, "%")
            .await
            .unwrap();

        let all = SystemMetricModel::recent(&db, None, 100).await.unwrap();
        assert_eq!(all.len(), 3);

        let hits = SystemMetricModel::recent(&db, Some(MetricName::CacheHitRate), 100)
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|m| m.unit == "%"));
    }
}
