use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202508100006_create_system_metrics"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("system_metrics"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(
                        ColumnDef::new(Alias::new("metric_name"))
                            .enumeration(
                                Alias::new("system_metric_name"),
                                vec![
                                    Alias::new("total_users"),
                                    Alias::new("active_users"),
                                    Alias::new("avg_page_load"),
                                    Alias::new("avg_api_response"),
                                    Alias::new("db_query_avg"),
                                    Alias::new("cache_hit_rate"),
                                    Alias::new("error_rate"),
                                    Alias::new("concurrent_users"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("value")).double().not_null())
                    .col(ColumnDef::new(Alias::new("unit")).string().not_null().default("count"))
                    .col(ColumnDef::new(Alias::new("timestamp")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_system_metrics_name_timestamp")
                    .table(Alias::new("system_metrics"))
                    .col(Alias::new("metric_name"))
                    .col(Alias::new("timestamp"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("system_metrics")).to_owned())
            .await
    }
}
