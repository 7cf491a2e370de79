use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202508100004_create_user_performance_metrics"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("user_performance_metrics"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("user_id")).integer().not_null())
                    .col(
                        ColumnDef::new(Alias::new("metric_type"))
                            .enumeration(
                                Alias::new("performance_metric_type"),
                                vec![
                                    Alias::new("page_load"),
                                    Alias::new("api_response"),
                                    Alias::new("engagement"),
                                    Alias::new("conversion"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("value")).double().not_null())
                    .col(ColumnDef::new(Alias::new("timestamp")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("is_optimized")).boolean().not_null().default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_performance_metrics_user")
                            .from(Alias::new("user_performance_metrics"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_performance_metrics_type_optimized")
                    .table(Alias::new("user_performance_metrics"))
                    .col(Alias::new("metric_type"))
                    .col(Alias::new("is_optimized"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_performance_metrics_user_timestamp")
                    .table(Alias::new("user_performance_metrics"))
                    .col(Alias::new("user_id"))
                    .col(Alias::new("timestamp"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new("user_performance_metrics"))
                    .to_owned(),
            )
            .await
    }
}
