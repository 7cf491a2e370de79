use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, PaginatorTrait, QueryOrder, Set};
use serde::Serialize;

/// Represents a user in the `users` table.
///
/// Identity is owned by an external provider; this table only carries the
/// fields the analytics queries need.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique username.
    pub username: String,
    /// User's unique email address.
    pub email: String,
    /// Timestamp when the user joined.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the user's most recent login, if any.
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::learning_progress::Entity")]
    LearningProgress,
    #[sea_orm(has_many = "super::user_performance_metric::Entity")]
    PerformanceMetrics,
}

impl Related<super::learning_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LearningProgress.def()
    }
}

impl Related<super::user_performance_metric::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PerformanceMetrics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a new user.
    pub async fn create(
        db: &DatabaseConnection,
        username: &str,
        email: &str,
    ) -> Result<Self, DbErr> {
        let user = ActiveModel {
            id: NotSet,
            username: Set(username.to_owned()),
            email: Set(email.to_owned()),
            created_at: Set(Utc::now()),
            last_login: Set(None),
        };
        user.insert(db).await
    }

    /// Records a login at the current time.
    pub async fn touch_last_login(db: &DatabaseConnection, user_id: i64) -> Result<(), DbErr> {
        let Some(user) = Entity::find_by_id(user_id).one(db).await? else {
            return Err(DbErr::RecordNotFound(format!("User {user_id} not found")));
        };
        let mut active: ActiveModel = user.into();
        active.last_login = Set(Some(Utc::now()));
        active.update(db).await?;
        Ok(())
    }

    /// Returns true if a user with the given id exists.
    pub async fn exists(db: &DatabaseConnection, user_id: i64) -> Result<bool, DbErr> {
        Ok(Entity::find_by_id(user_id).one(db).await?.is_some())
    }

    /// All users, ordered by username.
    pub async fn get_all(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        Entity::find().order_by_asc(Column::Username).all(db).await
    }

    /// Total user count.
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Entity::find().count(db).await
    }

    /// Number of users whose last login is at or after `cutoff`.
    pub async fn active_since(
        db: &DatabaseConnection,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::LastLogin.gte(cutoff))
            .count(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::Model as UserModel;
    use crate::test_utils::setup_test_db;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn create_and_count() {
        let db = setup_test_db().await;

        UserModel::create(&db, "alice", "alice@example.com")
            .await
            .unwrap();
        UserModel::create(&db, "bob", "bob@example.com").await.unwrap();

        assert_eq!(UserModel::count(&db).await.unwrap(), 2);
        assert!(UserModel::exists(&db, 1).await.unwrap());
        assert!(!UserModel::exists(&db, 99).await.unwrap());
    }

    #[tokio::test]
    async fn active_since_counts_only_recent_logins() {
        let db = setup_test_db().await;

        let alice = UserModel::create(&db, "alice", "alice@example.com")
            .await
            .unwrap();
        UserModel::create(&db, "bob", "bob@example.com").await.unwrap();

        UserModel::touch_last_login(&db, alice.id).await.unwrap();

        let cutoff = Utc::now() - Duration::hours(24);
        assert_eq!(UserModel::active_since(&db, cutoff).await.unwrap(), 1);
    }
}
