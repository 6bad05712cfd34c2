use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table("show")
                    .if_not_exists()
                    .col(
                        ColumnDef::new("id")
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new("venue_id").integer().not_null())
                    .col(ColumnDef::new("artist_id").integer().not_null())
                    .col(ColumnDef::new("start_time").timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_show_venue_id")
                            .from("show", "venue_id")
                            .to("venue", "id")
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_show_artist_id")
                            .from("show", "artist_id")
                            .to("artist", "id")
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_show_venue_id")
                    .table("show")
                    .col("venue_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_show_artist_id")
                    .table("show")
                    .col("artist_id")
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table("show").to_owned())
            .await?;

        Ok(())
    }
}
