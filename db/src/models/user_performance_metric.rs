use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString, IntoEnumIterator};

use super::round2;

/// One timestamped performance observation for a user. Append-only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "user_performance_metrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub metric_type: MetricType,
    /// Milliseconds for timing metrics, percentage points for rates/scores.
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    /// Whether the sample was recorded after optimizations were applied.
    pub is_optimized: bool,
}

/// The kinds of per-user performance samples we track.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "performance_metric_type")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MetricType {
    #[sea_orm(string_value = "page_load")]
    PageLoad,
    #[sea_orm(string_value = "api_response")]
    ApiResponse,
    #[sea_orm(string_value = "engagement")]
    Engagement,
    #[sea_orm(string_value = "conversion")]
    Conversion,
}

/// Whether a smaller or larger value counts as better for a metric type.
///
/// This makes the improvement sign convention explicit: timing metrics get
/// better as they shrink, scores and rates get better as they grow, and a
/// positive improvement percentage always means "improved".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImprovementDirection {
    LowerIsBetter,
    HigherIsBetter,
}

impl MetricType {
    pub fn improvement_direction(self) -> ImprovementDirection {
        match self {
            MetricType::PageLoad | MetricType::ApiResponse => ImprovementDirection::LowerIsBetter,
            MetricType::Engagement | MetricType::Conversion => {
                ImprovementDirection::HigherIsBetter
            }
        }
    }

    /// Improvement percentage going from a `before` average to an `after`
    /// average, signed so that positive means improved. Returns 0 when the
    /// baseline is 0.
    pub fn improvement_percentage(self, before: f64, after: f64) -> f64 {
        if before == 0.0 {
            return 0.0;
        }
        match self.improvement_direction() {
            ImprovementDirection::LowerIsBetter => (before - after) / before * 100.0,
            ImprovementDirection::HigherIsBetter => (after - before) / before * 100.0,
        }
    }
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

/// Before/after averages for one metric type.
///
/// Only produced when both groups have at least one sample; `sample_size` is
/// the combined count across the two groups.
#[derive(Debug, Clone, Serialize)]
pub struct MetricComparison {
    pub metric_type: MetricType,
    pub before_optimization: f64,
    pub after_optimization: f64,
    pub improvement_percentage: f64,
    pub sample_size: usize,
}

/// Recognized filters for the metric list endpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricFilter {
    pub metric_type: Option<MetricType>,
    pub is_optimized: Option<bool>,
}

impl Model {
    /// Appends a new sample.
    pub async fn record(
        db: &DatabaseConnection,
        user_id: i64,
        metric_type: MetricType,
        value: f64,
        is_optimized: bool,
    ) -> Result<Self, DbErr> {
        let sample = ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            metric_type: Set(metric_type),
            value: Set(value),
            timestamp: Set(Utc::now()),
            is_optimized: Set(is_optimized),
        };
        sample.insert(db).await
    }

    /// Samples for a user, newest first, capped at `limit`.
    pub async fn for_user(
        db: &DatabaseConnection,
        user_id: i64,
        limit: u64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::Timestamp)
            .limit(limit)
            .all(db)
            .await
    }

    /// Samples matching the given filters, newest first.
    pub async fn filtered(
        db: &DatabaseConnection,
        filter: &MetricFilter,
    ) -> Result<Vec<Self>, DbErr> {
        let mut query = Entity::find();
        if let Some(metric_type) = filter.metric_type {
            query = query.filter(Column::MetricType.eq(metric_type));
        }
        if let Some(is_optimized) = filter.is_optimized {
            query = query.filter(Column::IsOptimized.eq(is_optimized));
        }
        query.order_by_desc(Column::Timestamp).all(db).await
    }

    /// Mean sample value for a metric type, optionally restricted to one
    /// optimization group and/or a trailing window. `None` when no samples
    /// match.
    pub async fn average(
        db: &DatabaseConnection,
        metric_type: MetricType,
        is_optimized: Option<bool>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Option<f64>, DbErr> {
        let mut query = Entity::find().filter(Column::MetricType.eq(metric_type));
        if let Some(is_optimized) = is_optimized {
            query = query.filter(Column::IsOptimized.eq(is_optimized));
        }
        if let Some(since) = since {
            query = query.filter(Column::Timestamp.gte(since));
        }
        let values: Vec<f64> = query
            .select_only()
            .column(Column::Value)
            .into_tuple()
            .all(db)
            .await?;
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(values.iter().sum::<f64>() / values.len() as f64))
    }

    /// Before/after comparison for every metric type that has samples in
    /// both groups. Types missing either group are omitted entirely rather
    /// than reported as zero.
    pub async fn compare_all(db: &DatabaseConnection) -> Result<Vec<MetricComparison>, DbErr> {
        let samples = Entity::find().all(db).await?;

        let mut groups: HashMap<(MetricType, bool), Vec<f64>> = HashMap::new();
        for sample in &samples {
            groups
                .entry((sample.metric_type, sample.is_optimized))
                .or_default()
                .push(sample.value);
        }

        let mut comparisons = Vec::new();
        for metric_type in MetricType::iter() {
            let before = groups.get(&(metric_type, false));
            let after = groups.get(&(metric_type, true));
            let (Some(before), Some(after)) = (before, after) else {
                continue;
            };

            let before_avg = before.iter().sum::<f64>() / before.len() as f64;
            let after_avg = after.iter().sum::<f64>() / after.len() as f64;
            comparisons.push(MetricComparison {
                metric_type,
                before_optimization: round2(before_avg),
                after_optimization: round2(after_avg),
                improvement_percentage: round2(
                    metric_type.improvement_percentage(before_avg, after_avg),
                ),
                sample_size: before.len() + after.len(),
            });
        }

        Ok(comparisons)
    }
}
