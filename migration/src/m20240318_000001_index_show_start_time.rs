use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Past/upcoming windows filter on start_time
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_show_start_time")
                    .table("show")
                    .col("start_time")
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_show_start_time")
                    .table("show")
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
