use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202508100001_create_users::Migration),
            Box::new(migrations::m202508100002_create_courses::Migration),
            Box::new(migrations::m202508100003_create_learning_progress::Migration),
            Box::new(migrations::m202508100004_create_user_performance_metrics::Migration),
            Box::new(migrations::m202508100005_create_api_response_logs::Migration),
            Box::new(migrations::m202508100006_create_system_metrics::Migration),
        ]
    }
}
