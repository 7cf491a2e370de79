use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, PaginatorTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};

/// Represents a course offered on the platform.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Course title.
    pub title: String,
    /// Free-form course description.
    pub description: String,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Whether the course is currently offered.
    pub is_active: bool,
    /// Number of lessons in the course.
    pub total_lessons: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course difficulty tiers, stored as strings in the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "course_difficulty")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    #[sea_orm(string_value = "beginner")]
    Beginner,
    #[sea_orm(string_value = "intermediate")]
    Intermediate,
    #[sea_orm(string_value = "advanced")]
    Advanced,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::learning_progress::Entity")]
    LearningProgress,
}

impl Related<super::learning_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LearningProgress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Recognized filters for the course list endpoint.
///
/// Filters are explicit and enumerated; unknown query parameters are ignored
/// at the HTTP layer rather than being forwarded here.
#[derive(Debug, Default, Clone, Copy)]
pub struct CourseFilter {
    pub is_active: Option<bool>,
    pub difficulty: Option<Difficulty>,
}

impl Model {
    /// Creates a new course record.
    pub async fn create(
        db: &DatabaseConnection,
        title: &str,
        description: &str,
        difficulty: Difficulty,
        total_lessons: i32,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let course = ActiveModel {
            id: NotSet,
            title: Set(title.to_owned()),
            description: Set(description.to_owned()),
            difficulty: Set(difficulty),
            is_active: Set(true),
            total_lessons: Set(total_lessons),
            created_at: Set(now),
            updated_at: Set(now),
        };
        course.insert(db).await
    }

    /// Retrieves a course by its ID.
    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Updates a course's editable fields. `updated_at` is refreshed.
    #[allow(clippy::too_many_arguments)]
    pub async fn edit(
        db: &DatabaseConnection,
        id: i64,
        title: &str,
        description: &str,
        difficulty: Difficulty,
        is_active: bool,
        total_lessons: i32,
    ) -> Result<Self, DbErr> {
        let Some(course) = Entity::find_by_id(id).one(db).await? else {
            return Err(DbErr::RecordNotFound(format!("Course {id} not found")));
        };
        let mut active: ActiveModel = course.into();
        active.title = Set(title.to_owned());
        active.description = Set(description.to_owned());
        active.difficulty = Set(difficulty);
        active.is_active = Set(is_active);
        active.total_lessons = Set(total_lessons);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    /// Deletes a course by ID. Progress records cascade at the database level.
    pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<(), DbErr> {
        Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }

    /// Courses matching the given filters, ordered by title.
    pub async fn filter(
        db: &DatabaseConnection,
        filter: &CourseFilter,
    ) -> Result<Vec<Self>, DbErr> {
        let mut query = Entity::find();
        if let Some(is_active) = filter.is_active {
            query = query.filter(Column::IsActive.eq(is_active));
        }
        if let Some(difficulty) = filter.difficulty {
            query = query.filter(Column::Difficulty.eq(difficulty));
        }
        query.order_by_asc(Column::Title).all(db).await
    }

    /// Number of active courses.
    pub async fn count_active(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::IsActive.eq(true))
            .count(db)
            .await
    }

    /// Number of users enrolled in the course.
    pub async fn enrollment_count(db: &DatabaseConnection, course_id: i64) -> Result<u64, DbErr> {
        super::learning_progress::Entity::find()
            .filter(super::learning_progress::Column::CourseId.eq(course_id))
            .count(db)
            .await
    }

    /// The `limit` most enrolled courses, paired with their enrollment counts,
    /// in descending order of enrollment. Ties break on title so the ranking
    /// is stable.
    pub async fn popular(
        db: &DatabaseConnection,
        limit: usize,
    ) -> Result<Vec<(Self, i64)>, DbErr> {
        use super::learning_progress::{Column as ProgressColumn, Entity as ProgressEntity};

        let counts: Vec<(i64, i64)> = ProgressEntity::find()
            .select_only()
            .column(ProgressColumn::CourseId)
            .column_as(ProgressColumn::Id.count(), "enrollments")
            .group_by(ProgressColumn::CourseId)
            .into_tuple()
            .all(db)
            .await?;
        let by_course: HashMap<i64, i64> = counts.into_iter().collect();

        let mut ranked: Vec<(Self, i64)> = Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|course| {
                let enrollments = by_course.get(&course.id).copied().unwrap_or(0);
                (course, enrollments)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.title.cmp(&b.0.title)));
        ranked.truncate(limit);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::{CourseFilter, Difficulty, Model as CourseModel};
    use crate::models::{learning_progress::Model as ProgressModel, user::Model as UserModel};
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn create_and_find() {
        let db = setup_test_db().await;

        let created = CourseModel::create(&db, "Rust Basics", "Intro", Difficulty::Beginner, 10)
            .await
            .unwrap();
        assert!(created.is_active);

        let found = CourseModel::get_by_id(&db, created.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Rust Basics");
        assert_eq!(found.difficulty, Difficulty::Beginner);
        assert_eq!(found.total_lessons, 10);
    }

    #[tokio::test]
    async fn filter_composes_active_and_difficulty() {
        let db = setup_test_db().await;

        CourseModel::create(&db, "A", "", Difficulty::Beginner, 5)
            .await
            .unwrap();
        let b = CourseModel::create(&db, "B", "", Difficulty::Advanced, 5)
            .await
            .unwrap();
        let c = CourseModel::create(&db, "C", "", Difficulty::Advanced, 5)
            .await
            .unwrap();
        CourseModel::edit(&db, c.id, "C", "", Difficulty::Advanced, false, 5)
            .await
            .unwrap();

        let filter = CourseFilter {
            is_active: Some(true),
            difficulty: Some(Difficulty::Advanced),
        };
        let matched = CourseModel::filter(&db, &filter).await.unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, b.id);

        assert_eq!(CourseModel::count_active(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn popular_orders_by_enrollment() {
        let db = setup_test_db().await;

        let quiet = CourseModel::create(&db, "Quiet", "", Difficulty::Beginner, 10)
            .await
            .unwrap();
        let busy = CourseModel::create(&db, "Busy", "", Difficulty::Beginner, 10)
            .await
            .unwrap();

        for i in 0..3 {
            let user = UserModel::create(&db, &format!("u{i}"), &format!("u{i}@example.com"))
                .await
                .unwrap();
            ProgressModel::upsert(&db, user.id, busy.id, 1, 5).await.unwrap();
            if i == 0 {
                ProgressModel::upsert(&db, user.id, quiet.id, 1, 5).await.unwrap();
            }
        }

        let ranked = CourseModel::popular(&db, 10).await.unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0.id, busy.id);
        assert_eq!(ranked[0].1, 3);
        assert_eq!(ranked[1].0.id, quiet.id);
        assert_eq!(ranked[1].1, 1);

        assert_eq!(CourseModel::enrollment_count(&db, busy.id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn delete_cascades_to_progress() {
        let db = setup_test_db().await;

        let course = CourseModel::create(&db, "Doomed", "", Difficulty::Beginner, 4)
            .await
            .unwrap();
        let user = UserModel::create(&db, "u", "u@example.com").await.unwrap();
        ProgressModel::upsert(&db, user.id, course.id, 2, 10).await.unwrap();

        CourseModel::delete_by_id(&db, course.id).await.unwrap();

        let remaining = ProgressModel::for_user(&db, user.id).await.unwrap();
        assert!(remaining.is_empty());
    }
}
