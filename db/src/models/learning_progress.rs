use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, PaginatorTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One user's enrollment and completion state for one course.
///
/// At most one record exists per (user, course) pair; writes go through
/// [`Model::upsert`], which keeps the derived fields consistent.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "learning_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub lessons_completed: i32,
    /// The lesson the user is currently on (1-based).
    pub current_lesson: i32,
    /// Derived: lessons_completed / course.total_lessons * 100.
    pub completion_percentage: f64,
    pub started_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
    /// Set once, the first time completion reaches 100%. Never overwritten.
    pub completed_at: Option<DateTime<Utc>>,
    /// Cumulative minutes spent on the course.
    pub time_spent_minutes: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Failure modes for progress writes.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("User {0} does not exist")]
    UserNotFound(i64),
    #[error("Course {0} does not exist")]
    CourseNotFound(i64),
    #[error("lessons_completed cannot exceed the course total of {max}")]
    LessonsExceedTotal { max: i32 },
    #[error("{field} cannot be negative")]
    NegativeValue { field: &'static str },
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

/// One item of a bulk progress update.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BulkProgressItem {
    pub user_id: i64,
    pub course_id: i64,
    pub lessons_completed: i32,
    pub time_spent_minutes: i32,
}

/// Per-item failure reported back from a bulk update.
#[derive(Debug, Serialize)]
pub struct BulkItemError {
    /// Index of the failed item in the submitted array.
    pub index: usize,
    pub user_id: i64,
    pub course_id: i64,
    pub message: String,
}

/// Result of applying a bulk update: items are independent, so some may
/// succeed while others fail.
#[derive(Debug, Serialize)]
pub struct BulkOutcome {
    pub updated_count: usize,
    pub errors: Vec<BulkItemError>,
}

impl Model {
    /// Upserts the progress record for a (user, course) pair.
    ///
    /// `lessons_completed` is the new absolute count and must not exceed the
    /// course's `total_lessons`; `time_spent_minutes` is added to the
    /// cumulative total. The completion percentage is recomputed on every
    /// write (0 when the course has no lessons), and `completed_at` is set
    /// the first time it reaches 100% and then left untouched, even if a
    /// later write lowers the lesson count.
    pub async fn upsert(
        db: &DatabaseConnection,
        user_id: i64,
        course_id: i64,
        lessons_completed: i32,
        time_spent_minutes: i32,
    ) -> Result<Self, ProgressError> {
        if lessons_completed < 0 {
            return Err(ProgressError::NegativeValue {
                field: "lessons_completed",
            });
        }
        if time_spent_minutes < 0 {
            return Err(ProgressError::NegativeValue {
                field: "time_spent_minutes",
            });
        }
        let Some(course) = super::course::Entity::find_by_id(course_id).one(db).await? else {
            return Err(ProgressError::CourseNotFound(course_id));
        };
        if !super::user::Model::exists(db, user_id).await? {
            return Err(ProgressError::UserNotFound(user_id));
        }
        if lessons_completed > course.total_lessons {
            return Err(ProgressError::LessonsExceedTotal {
                max: course.total_lessons,
            });
        }

        let completion_percentage = if course.total_lessons > 0 {
            f64::from(lessons_completed) / f64::from(course.total_lessons) * 100.0
        } else {
            0.0
        };
        let current_lesson = (lessons_completed + 1).min(course.total_lessons.max(1));
        let now = Utc::now();

        let existing = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .one(db)
            .await?;

        let record = match existing {
            Some(record) => {
                let completed_at = match record.completed_at {
                    Some(ts) => Some(ts),
                    None if completion_percentage >= 100.0 => Some(now),
                    None => None,
                };
                let total_minutes = record.time_spent_minutes + time_spent_minutes;
                let mut active: ActiveModel = record.into();
                active.lessons_completed = Set(lessons_completed);
                active.current_lesson = Set(current_lesson);
                active.completion_percentage = Set(completion_percentage);
                active.last_accessed = Set(now);
                active.completed_at = Set(completed_at);
                active.time_spent_minutes = Set(total_minutes);
                active.update(db).await?
            }
            None => {
                let completed_at = (completion_percentage >= 100.0).then_some(now);
                let active = ActiveModel {
                    id: NotSet,
                    user_id: Set(user_id),
                    course_id: Set(course_id),
                    lessons_completed: Set(lessons_completed),
                    current_lesson: Set(current_lesson),
                    completion_percentage: Set(completion_percentage),
                    started_at: Set(now),
                    last_accessed: Set(now),
                    completed_at: Set(completed_at),
                    time_spent_minutes: Set(time_spent_minutes),
                };
                active.insert(db).await?
            }
        };

        Ok(record)
    }

    /// Applies a list of progress updates, each independently. A failing
    /// item never affects the others.
    pub async fn bulk_upsert(
        db: &DatabaseConnection,
        items: &[BulkProgressItem],
    ) -> Result<BulkOutcome, DbErr> {
        let mut updated_count = 0;
        let mut errors = Vec::new();

        for (index, item) in items.iter().enumerate() {
            match Self::upsert(
                db,
                item.user_id,
                item.course_id,
                item.lessons_completed,
                item.time_spent_minutes,
            )
            .await
            {
                Ok(_) => updated_count += 1,
                Err(ProgressError::Db(err)) => return Err(err),
                Err(err) => errors.push(BulkItemError {
                    index,
                    user_id: item.user_id,
                    course_id: item.course_id,
                    message: err.to_string(),
                }),
            }
        }

        Ok(BulkOutcome {
            updated_count,
            errors,
        })
    }

    /// Whether the course has been completed.
    pub fn is_completed(&self) -> bool {
        self.completion_percentage >= 100.0
    }

    /// Progress records for a user, most recently accessed first.
    pub async fn for_user(db: &DatabaseConnection, user_id: i64) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::LastAccessed)
            .all(db)
            .await
    }

    /// Progress records for a course, most recently accessed first.
    pub async fn for_course(db: &DatabaseConnection, course_id: i64) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::LastAccessed)
            .all(db)
            .await
    }

    /// All progress records, most recently accessed first.
    pub async fn get_all(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .order_by_desc(Column::LastAccessed)
            .all(db)
            .await
    }

    /// Total enrollment count.
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Entity::find().count(db).await
    }

    /// Mean completion percentage across all progress records, or 0 when
    /// there are none.
    pub async fn average_completion(db: &DatabaseConnection) -> Result<f64, DbErr> {
        let records = Entity::find().all(db).await?;
        if records.is_empty() {
            return Ok(0.0);
        }
        let sum: f64 = records.iter().map(|r| r.completion_percentage).sum();
        Ok(sum / records.len() as f64)
    }
}
