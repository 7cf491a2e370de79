use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202508100005_create_api_response_logs"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("api_response_logs"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("endpoint")).string().not_null())
                    .col(ColumnDef::new(Alias::new("method")).string().not_null())
                    .col(ColumnDef::new(Alias::new("response_time_ms")).double().not_null())
                    .col(ColumnDef::new(Alias::new("status_code")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("timestamp")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("user_id")).integer().null())
                    .col(ColumnDef::new(Alias::new("cache_hit")).boolean().not_null().default(false))
                    .col(ColumnDef::new(Alias::new("query_count")).integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("request_size_bytes")).integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("response_size_bytes")).integer().not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_api_response_logs_user")
                            .from(Alias::new("api_response_logs"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_api_response_logs_endpoint_timestamp")
                    .table(Alias::new("api_response_logs"))
                    .col(Alias::new("endpoint"))
                    .col(Alias::new("timestamp"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_api_response_logs_cache_hit_timestamp")
                    .table(Alias::new("api_response_logs"))
                    .col(Alias::new("cache_hit"))
                    .col(Alias::new("timestamp"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("api_response_logs")).to_owned())
            .await
    }
}
